// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{mem, sync::Arc};

use hostfacts_core::{FactError, Warning};
use parking_lot::Mutex;

/// Side-channel shared by all engines of one database for the statement
/// currently executing.
///
/// The embedding protocol can only report an error message back to the
/// database, so the original error and any warnings are parked here and
/// picked up once the statement finishes.
#[derive(Debug, Clone, Default)]
pub struct QueryLog {
	inner: Arc<Mutex<QueryLogInner>>,
}

#[derive(Debug, Default)]
struct QueryLogInner {
	warnings: Vec<Warning>,
	failure: Option<FactError>,
}

impl QueryLog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records warnings not already seen in this statement. A table scanned
	/// once per outer row of a join reports the same warnings each time.
	pub fn warn(&self, warnings: impl IntoIterator<Item = Warning>) {
		let mut inner = self.inner.lock();
		for warning in warnings {
			if !inner.warnings.contains(&warning) {
				inner.warnings.push(warning);
			}
		}
	}

	/// Keeps the first failure of a statement; later ones are usually
	/// consequences of it.
	pub fn fail(&self, error: FactError) {
		let mut inner = self.inner.lock();
		if inner.failure.is_none() {
			inner.failure = Some(error);
		}
	}

	pub fn take_warnings(&self) -> Vec<Warning> {
		mem::take(&mut self.inner.lock().warnings)
	}

	pub fn take_failure(&self) -> Option<FactError> {
		self.inner.lock().failure.take()
	}

	pub fn reset(&self) {
		let mut inner = self.inner.lock();
		inner.warnings.clear();
		inner.failure = None;
	}
}
