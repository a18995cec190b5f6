// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fact providers describing the machine the process runs on.

use std::sync::Arc;

use hostfacts_core::Result;
use hostfacts_engine::ModuleRegistry;

pub mod agent_info;
pub mod host;
pub mod os_version;
pub mod system_info;

pub use agent_info::AgentInfo;
pub use host::{FixedHost, Host, HostError, NativeHost};
pub use os_version::OsVersion;
pub use system_info::SystemInfo;

/// Registry with `os_version`, `system_info` and `agent_info` backed by
/// `host`.
pub fn default_registry(host: Arc<dyn Host>) -> Result<ModuleRegistry> {
	let mut registry = ModuleRegistry::new();
	registry.register(OsVersion::new(host.clone()))?;
	registry.register(SystemInfo::new(host))?;
	registry.register(AgentInfo::new())?;
	Ok(registry)
}
