// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;

use super::{Cpu, Hardware, Host, HostError, HostResult, OsRelease, Platform};

/// A host answering from fixed values.
///
/// Facts set to `None` report [`HostError::Unavailable`], which makes it
/// easy to exercise partial failures.
#[derive(Debug, Clone, Default)]
pub struct FixedHost {
	pub platform: Option<Platform>,
	pub os_release: Option<OsRelease>,
	pub hostname: Option<String>,
	pub computer_name: Option<String>,
	pub hardware: Option<Hardware>,
	pub cpu: Option<Cpu>,
	pub memory: Option<u64>,
}

impl FixedHost {
	/// An Apple silicon laptop running macOS 14.4.
	pub fn macbook() -> Self {
		Self {
			platform: Some(Platform {
				os: "darwin".to_string(),
				family: "unix".to_string(),
				arch: "arm64".to_string(),
			}),
			os_release: Some(OsRelease {
				name: "macOS 14.4".to_string(),
				version: "14.4".to_string(),
				build: Some("23E214".to_string()),
				id: Some("darwin".to_string()),
				id_like: Some("darwin".to_string()),
			}),
			hostname: Some("mbp.local".to_string()),
			computer_name: Some("Dominique's MacBook Pro".to_string()),
			hardware: Some(Hardware {
				uuid: Some("4C4C4544-0042-5910-8036-B7C04F4B4B32".to_string()),
				serial: Some("C02XL0GYJGH5".to_string()),
				vendor: Some("Apple Inc.".to_string()),
				model: Some("MacBookPro18,3".to_string()),
			}),
			cpu: Some(Cpu {
				brand: Some("Apple M1 Pro".to_string()),
				logical_cores: 10,
			}),
			memory: Some(16 * 1024 * 1024 * 1024),
		}
	}
}

fn available<T: Clone>(value: &Option<T>, what: &'static str) -> HostResult<T> {
	value.clone().ok_or(HostError::Unavailable {
		what,
	})
}

#[async_trait]
impl Host for FixedHost {
	async fn platform(&self) -> HostResult<Platform> {
		available(&self.platform, "platform")
	}

	async fn os_release(&self) -> HostResult<OsRelease> {
		available(&self.os_release, "os-release")
	}

	async fn hostname(&self) -> HostResult<String> {
		available(&self.hostname, "hostname")
	}

	async fn computer_name(&self) -> HostResult<Option<String>> {
		Ok(self.computer_name.clone())
	}

	async fn hardware(&self) -> HostResult<Hardware> {
		available(&self.hardware, "hardware")
	}

	async fn cpu(&self) -> HostResult<Cpu> {
		available(&self.cpu, "cpu")
	}

	async fn memory(&self) -> HostResult<u64> {
		available(&self.memory, "memory")
	}
}
