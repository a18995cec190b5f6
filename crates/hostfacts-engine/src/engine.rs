// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{cell::RefCell, sync::Arc};

use hostfacts_core::{EngineConfig, FactError, FactProvider, Generated, Result, TableSchema, Value};
use tracing::{debug, instrument, trace, warn};

use crate::{
	cursor::{CursorHandle, CursorStore},
	log::QueryLog,
};

/// Cost reported for the only plan this engine offers: a full scan.
pub const FULL_SCAN_COST: f64 = 1_000_000.0;

/// Answer to an index-selection request.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexPlan {
	pub index_num: i32,
	pub estimated_cost: f64,
}

impl IndexPlan {
	pub fn full_scan() -> Self {
		Self {
			index_num: 0,
			estimated_cost: FULL_SCAN_COST,
		}
	}
}

/// Generic virtual table over a single [`FactProvider`].
///
/// Every protocol callback except [`VirtualTableEngine::filter`] works on
/// rows that are already materialized, so they answer immediately. Filter
/// is the only place the engine waits for the provider.
///
/// Cursor state is owned per engine: handles of different tables never
/// collide even when the embedding database reuses the same numbers.
pub struct VirtualTableEngine {
	provider: Arc<dyn FactProvider>,
	cursors: RefCell<CursorStore>,
	config: EngineConfig,
	log: QueryLog,
}

impl VirtualTableEngine {
	pub fn new(provider: Arc<dyn FactProvider>, config: EngineConfig, log: QueryLog) -> Self {
		Self {
			provider,
			cursors: RefCell::new(CursorStore::new()),
			config,
			log,
		}
	}

	pub fn schema(&self) -> &TableSchema {
		self.provider.schema()
	}

	/// Declaration used by the embedding database to create the table.
	#[instrument(name = "engine::connect", level = "debug", skip(self), fields(table = %self.schema().name()))]
	pub fn connect(&self) -> String {
		self.schema().declaration()
	}

	/// No provider supports index-assisted lookups, so every query scans.
	pub fn best_index(&self) -> IndexPlan {
		IndexPlan::full_scan()
	}

	pub fn disconnect(&self) {
		trace!(table = %self.schema().name(), "disconnect");
	}

	pub fn destroy(&self) {
		trace!(table = %self.schema().name(), "destroy");
	}

	#[instrument(name = "engine::open", level = "trace", skip(self), fields(table = %self.schema().name()))]
	pub fn open(&self, handle: CursorHandle) {
		self.cursors.borrow_mut().create(handle);
	}

	/// Materializes the provider's rows for `handle` and rewinds it.
	///
	/// On any failure the cursor is left without rows, including rows a
	/// previous filter on the same cursor may have stored.
	#[instrument(name = "engine::filter", level = "debug", skip(self, index_str, args), fields(
		table = %self.schema().name(),
		arg_count = args.len()
	))]
	pub async fn filter(
		&self,
		handle: CursorHandle,
		index_num: i32,
		index_str: Option<&str>,
		args: &[Value],
	) -> Result<()> {
		self.cursors.borrow_mut().set_rows(handle, Vec::new())?;

		let generated = match self.generate(index_num, index_str, args).await {
			Ok(generated) => generated,
			Err(err) => {
				warn!(table = %self.schema().name(), error = %err, "provider failed");
				return Err(err);
			}
		};

		let schema = self.schema();
		for (index, row) in generated.rows.iter().enumerate() {
			schema.validate(index, row)?;
		}

		if !generated.warnings.is_empty() {
			for warning in &generated.warnings {
				warn!(table = %warning.table, column = %warning.column, message = %warning.message, "partial row");
			}
			self.log.warn(generated.warnings);
		}

		debug!(rows = generated.rows.len(), "materialized");
		self.cursors.borrow_mut().set_rows(handle, generated.rows)
	}

	async fn generate(&self, index_num: i32, index_str: Option<&str>, args: &[Value]) -> Result<Generated> {
		let generate = self.provider.generate(index_num, index_str, args);
		match self.config.filter_timeout {
			Some(after) => tokio::time::timeout(after, generate).await.map_err(|_| FactError::Timeout {
				table: self.schema().name().to_string(),
				after,
			})?,
			None => generate.await,
		}
	}

	pub fn next(&self, handle: CursorHandle) -> Result<()> {
		self.cursors.borrow_mut().advance(handle)
	}

	pub fn eof(&self, handle: CursorHandle) -> Result<bool> {
		Ok(self.cursors.borrow().get(handle)?.eof())
	}

	pub fn column(&self, handle: CursorHandle, column: usize) -> Result<Value> {
		let cursors = self.cursors.borrow();
		let state = cursors.get(handle)?;
		let row = state.current().ok_or(FactError::NoCurrentRow {
			handle,
			position: state.position,
		})?;
		row.get(column).cloned().ok_or_else(|| FactError::ColumnOutOfRange {
			table: self.schema().name().to_string(),
			column,
		})
	}

	/// The scan position doubles as rowid; rows have no identity beyond a
	/// single materialization.
	pub fn rowid(&self, handle: CursorHandle) -> Result<i64> {
		Ok(self.cursors.borrow().get(handle)?.position as i64)
	}

	#[instrument(name = "engine::close", level = "trace", skip(self), fields(table = %self.schema().name()))]
	pub fn close(&self, handle: CursorHandle) -> Result<()> {
		self.cursors.borrow_mut().remove(handle).map(|_| ())
	}

	pub fn open_cursors(&self) -> usize {
		self.cursors.borrow().len()
	}
}
