// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Asynchronous access to facts about the running machine.

use async_trait::async_trait;

mod fixed;
mod native;

pub use fixed::FixedHost;
pub use native::NativeHost;

pub type HostResult<T> = std::result::Result<T, HostError>;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
	#[error("{what} is not available on this host")]
	Unavailable {
		what: &'static str,
	},

	#[error("failed to read {what}: {source}")]
	Io {
		what: &'static str,
		#[source]
		source: std::io::Error,
	},

	#[error("malformed {what}: {message}")]
	Malformed {
		what: &'static str,
		message: String,
	},
}

/// Compile-time identity of the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
	/// `linux`, `darwin`, `windows`, ...
	pub os: String,
	/// `unix` or `windows`
	pub family: String,
	pub arch: String,
}

/// Identity of the installed operating system release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
	pub name: String,
	pub version: String,
	pub build: Option<String>,
	pub id: Option<String>,
	pub id_like: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hardware {
	pub uuid: Option<String>,
	pub serial: Option<String>,
	pub vendor: Option<String>,
	pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cpu {
	pub brand: Option<String>,
	pub logical_cores: usize,
}

/// The host APIs fact providers are built on.
///
/// Every call may suspend and may fail independently; providers decide
/// whether a failure voids the whole row or only some of its columns.
#[async_trait]
pub trait Host: Send + Sync {
	async fn platform(&self) -> HostResult<Platform>;

	async fn os_release(&self) -> HostResult<OsRelease>;

	async fn hostname(&self) -> HostResult<String>;

	/// Optional user facing name of the machine
	async fn computer_name(&self) -> HostResult<Option<String>>;

	async fn hardware(&self) -> HostResult<Hardware>;

	async fn cpu(&self) -> HostResult<Cpu>;

	/// Installed physical memory in bytes
	async fn memory(&self) -> HostResult<u64>;
}
