// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::future::Future;

use hostfacts_core::{FactError, Result};
use tokio::runtime::{Builder, Runtime};

/// Current-thread runtime that filters block on.
///
/// Shared by the database and every table it mounts. Whoever releases it
/// last shuts it down in the background, so a database may be dropped from
/// async code or from inside an SQLite destructor without panicking.
pub(crate) struct FilterRuntime {
	runtime: Option<Runtime>,
}

impl FilterRuntime {
	pub(crate) fn new() -> Result<Self> {
		let runtime = Builder::new_current_thread().enable_all().build().map_err(FactError::database)?;
		Ok(Self {
			runtime: Some(runtime),
		})
	}

	/// Panics when called on a thread that is already driving a runtime.
	pub(crate) fn block_on<F: Future>(&self, future: F) -> Option<F::Output> {
		self.runtime.as_ref().map(|runtime| runtime.block_on(future))
	}
}

impl Drop for FilterRuntime {
	fn drop(&mut self) {
		if let Some(runtime) = self.runtime.take() {
			runtime.shutdown_background();
		}
	}
}
