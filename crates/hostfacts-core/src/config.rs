// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

/// Upper bound on a single provider invocation unless configured otherwise.
pub const DEFAULT_FILTER_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration shared by every virtual table engine of a database.
#[derive(Debug, Clone)]
pub struct EngineConfig {
	/// How long a filter call waits for its provider (None = unbounded)
	pub filter_timeout: Option<Duration>,
}

impl EngineConfig {
	pub fn new(filter_timeout: Option<Duration>) -> Self {
		Self {
			filter_timeout,
		}
	}

	pub fn with_filter_timeout(mut self, timeout: Duration) -> Self {
		self.filter_timeout = Some(timeout);
		self
	}

	pub fn without_filter_timeout(mut self) -> Self {
		self.filter_timeout = None;
		self
	}
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self::new(Some(DEFAULT_FILTER_TIMEOUT))
	}
}
