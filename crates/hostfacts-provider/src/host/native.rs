// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{env, io::ErrorKind, path::Path};

use async_trait::async_trait;
use tracing::{instrument, trace};

use super::{Cpu, Hardware, Host, HostError, HostResult, OsRelease, Platform};

const OS_RELEASE_PATHS: [&str; 2] = ["/etc/os-release", "/usr/lib/os-release"];
const DMI_ROOT: &str = "/sys/class/dmi/id";

/// Reads facts from the machine the process runs on.
///
/// Release, hardware and memory facts come from the Linux pseudo
/// filesystems; elsewhere those calls report [`HostError::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeHost;

impl NativeHost {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl Host for NativeHost {
	async fn platform(&self) -> HostResult<Platform> {
		let os = match env::consts::OS {
			"macos" => "darwin",
			other => other,
		};
		Ok(Platform {
			os: os.to_string(),
			family: env::consts::FAMILY.to_string(),
			arch: env::consts::ARCH.to_string(),
		})
	}

	#[instrument(name = "host::native::os_release", level = "trace")]
	async fn os_release(&self) -> HostResult<OsRelease> {
		for path in OS_RELEASE_PATHS {
			match read(path, "os-release").await {
				Ok(content) => return parse_os_release(&content),
				Err(HostError::Unavailable {
					..
				}) => trace!(path, "missing"),
				Err(err) => return Err(err),
			}
		}
		Err(HostError::Unavailable {
			what: "os-release",
		})
	}

	async fn hostname(&self) -> HostResult<String> {
		match read("/proc/sys/kernel/hostname", "hostname").await {
			Ok(hostname) => Ok(hostname.trim().to_string()),
			Err(HostError::Unavailable {
				..
			}) => env::var("HOSTNAME").map_err(|_| HostError::Unavailable {
				what: "hostname",
			}),
			Err(err) => Err(err),
		}
	}

	async fn computer_name(&self) -> HostResult<Option<String>> {
		Ok(None)
	}

	#[instrument(name = "host::native::hardware", level = "trace")]
	async fn hardware(&self) -> HostResult<Hardware> {
		if !Path::new(DMI_ROOT).exists() {
			return Err(HostError::Unavailable {
				what: "dmi",
			});
		}

		Ok(Hardware {
			uuid: read_dmi("product_uuid").await,
			serial: read_dmi("product_serial").await,
			vendor: read_dmi("sys_vendor").await,
			model: read_dmi("product_name").await,
		})
	}

	async fn cpu(&self) -> HostResult<Cpu> {
		let brand = match read("/proc/cpuinfo", "cpuinfo").await {
			Ok(content) => parse_cpu_brand(&content),
			Err(_) => None,
		};
		Ok(Cpu {
			brand,
			logical_cores: num_cpus::get(),
		})
	}

	async fn memory(&self) -> HostResult<u64> {
		let content = read("/proc/meminfo", "meminfo").await?;
		parse_mem_total(&content)
	}
}

async fn read(path: &str, what: &'static str) -> HostResult<String> {
	tokio::fs::read_to_string(path).await.map_err(|source| match source.kind() {
		ErrorKind::NotFound => HostError::Unavailable {
			what,
		},
		_ => HostError::Io {
			what,
			source,
		},
	})
}

/// DMI entries are frequently root-only; unreadable ones are left empty.
async fn read_dmi(entry: &'static str) -> Option<String> {
	let path = format!("{DMI_ROOT}/{entry}");
	tokio::fs::read_to_string(&path).await.ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub(crate) fn parse_os_release(content: &str) -> HostResult<OsRelease> {
	let mut name = None;
	let mut pretty_name = None;
	let mut release = OsRelease::default();

	for line in content.lines() {
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		let Some((key, value)) = line.split_once('=') else {
			continue;
		};
		let value = value.trim().trim_matches('"').trim_matches('\'').to_string();
		match key.trim() {
			"NAME" => name = Some(value),
			"PRETTY_NAME" => pretty_name = Some(value),
			"VERSION_ID" => release.version = value,
			"BUILD_ID" => release.build = Some(value),
			"ID" => release.id = Some(value),
			"ID_LIKE" => release.id_like = Some(value),
			_ => {}
		}
	}

	release.name = pretty_name.or(name).ok_or(HostError::Malformed {
		what: "os-release",
		message: "neither NAME nor PRETTY_NAME is set".to_string(),
	})?;
	Ok(release)
}

pub(crate) fn parse_cpu_brand(content: &str) -> Option<String> {
	content
		.lines()
		.filter_map(|line| line.split_once(':'))
		.find(|(key, _)| key.trim() == "model name")
		.map(|(_, value)| value.trim().to_string())
}

pub(crate) fn parse_mem_total(content: &str) -> HostResult<u64> {
	let malformed = |message: &str| HostError::Malformed {
		what: "meminfo",
		message: message.to_string(),
	};

	let line =
		content.lines().find(|line| line.starts_with("MemTotal:")).ok_or_else(|| malformed("no MemTotal entry"))?;
	let kib = line
		.trim_start_matches("MemTotal:")
		.trim()
		.trim_end_matches("kB")
		.trim()
		.parse::<u64>()
		.map_err(|err| malformed(&format!("MemTotal: {err}")))?;
	kib.checked_mul(1024).ok_or_else(|| malformed("MemTotal overflows a byte count"))
}
