// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Providers and helpers shared by the test suites of the workspace.

mod provider;

pub use provider::{
	ArgsProvider, CountingProvider, FailingProvider, PanickingProvider, PendingProvider, StaticProvider,
	WarningProvider, os_version_row, os_version_schema,
};

/// Installs a fmt subscriber writing through the test harness.
///
/// Honours `RUST_LOG`; repeated calls are ignored.
pub fn init_tracing() {
	let filter =
		tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
}
