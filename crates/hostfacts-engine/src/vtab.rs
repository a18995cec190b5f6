// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Binding of [`VirtualTableEngine`] to SQLite's virtual table module
//! protocol.
//!
//! SQLite drives every callback synchronously. Filter blocks on the
//! database's current-thread runtime until the provider resolves; all other
//! callbacks read already materialized state.

use std::{
	any::Any,
	marker::PhantomData,
	os::raw::c_int,
	panic::{AssertUnwindSafe, catch_unwind},
	rc::Rc,
	sync::Arc,
};

use hostfacts_core::{EngineConfig, FactError, FactProvider, Value};
use rusqlite::{
	ffi,
	types::Value as SqlValue,
	vtab::{Context, Filters, IndexInfo, VTab, VTabConnection, VTabCursor},
};
use tracing::error;

use crate::{
	cursor::CursorHandle,
	engine::VirtualTableEngine,
	log::QueryLog,
	runtime::FilterRuntime,
};

/// Module aux data: what a connecting table needs to build its engine.
pub struct TableBinding {
	pub(crate) provider: Arc<dyn FactProvider>,
	pub(crate) runtime: Arc<FilterRuntime>,
	pub(crate) config: EngineConfig,
	pub(crate) log: QueryLog,
}

#[repr(C)]
pub struct FactTable {
	/// Base class. Must be first
	base: ffi::sqlite3_vtab,
	engine: Rc<VirtualTableEngine>,
	runtime: Arc<FilterRuntime>,
	log: QueryLog,
	last_handle: CursorHandle,
}

unsafe impl<'vtab> VTab<'vtab> for FactTable {
	type Aux = TableBinding;
	type Cursor = FactCursor<'vtab>;

	fn connect(
		_db: &mut VTabConnection,
		aux: Option<&TableBinding>,
		_args: &[&[u8]],
	) -> rusqlite::Result<(String, FactTable)> {
		let binding = aux.ok_or_else(|| rusqlite::Error::ModuleError("fact table has no provider".to_string()))?;
		let engine = VirtualTableEngine::new(binding.provider.clone(), binding.config.clone(), binding.log.clone());
		let declaration = engine.connect();

		Ok((
			declaration,
			FactTable {
				base: ffi::sqlite3_vtab::default(),
				engine: Rc::new(engine),
				runtime: binding.runtime.clone(),
				log: binding.log.clone(),
				last_handle: 0,
			},
		))
	}

	fn best_index(&self, info: &mut IndexInfo) -> rusqlite::Result<()> {
		let plan = self.engine.best_index();
		info.set_idx_num(plan.index_num);
		info.set_estimated_cost(plan.estimated_cost);
		Ok(())
	}

	fn open(&'vtab mut self) -> rusqlite::Result<FactCursor<'vtab>> {
		self.last_handle += 1;
		let handle = self.last_handle;
		self.engine.open(handle);

		Ok(FactCursor {
			base: ffi::sqlite3_vtab_cursor::default(),
			handle,
			engine: self.engine.clone(),
			runtime: self.runtime.clone(),
			log: self.log.clone(),
			phantom: PhantomData,
		})
	}
}

impl Drop for FactTable {
	fn drop(&mut self) {
		self.engine.disconnect();
	}
}

#[repr(C)]
pub struct FactCursor<'vtab> {
	/// Base class. Must be first
	base: ffi::sqlite3_vtab_cursor,
	handle: CursorHandle,
	engine: Rc<VirtualTableEngine>,
	runtime: Arc<FilterRuntime>,
	log: QueryLog,
	phantom: PhantomData<&'vtab FactTable>,
}

impl FactCursor<'_> {
	/// Parks the original error for the database and hands SQLite a message.
	fn report(&self, err: FactError) -> rusqlite::Error {
		let message = err.to_string();
		self.log.fail(err);
		rusqlite::Error::ModuleError(message)
	}
}

unsafe impl VTabCursor for FactCursor<'_> {
	fn filter(&mut self, idx_num: c_int, idx_str: Option<&str>, args: &Filters<'_>) -> rusqlite::Result<()> {
		let args = (0..args.len())
			.map(|i| args.get::<SqlValue>(i).map(from_sql))
			.collect::<rusqlite::Result<Vec<_>>>()?;

		// A panic must not unwind into SQLite. Besides provider panics this
		// catches `block_on` refusing to run on a thread that already drives
		// a runtime.
		let result = catch_unwind(AssertUnwindSafe(|| {
			self.runtime.block_on(self.engine.filter(self.handle, idx_num, idx_str, &args))
		}))
		.map(|result| result.unwrap_or_else(|| Err(FactError::database("runtime is shut down"))))
		.unwrap_or_else(|payload| {
			let message = panic_message(payload.as_ref());
			error!(table = %self.engine.schema().name(), %message, "filter panicked");
			Err(FactError::Panicked {
				table: self.engine.schema().name().to_string(),
				message,
			})
		});
		result.map_err(|err| self.report(err))
	}

	fn next(&mut self) -> rusqlite::Result<()> {
		self.engine.next(self.handle).map_err(|err| self.report(err))
	}

	fn eof(&self) -> bool {
		match self.engine.eof(self.handle) {
			Ok(eof) => eof,
			Err(err) => {
				error!(table = %self.engine.schema().name(), error = %err, "eof on unknown cursor");
				self.log.fail(err);
				true
			}
		}
	}

	fn column(&self, ctx: &mut Context, i: c_int) -> rusqlite::Result<()> {
		let value = self.engine.column(self.handle, i as usize).map_err(|err| self.report(err))?;
		ctx.set_result(&to_sql(value))
	}

	fn rowid(&self) -> rusqlite::Result<i64> {
		self.engine.rowid(self.handle).map_err(|err| self.report(err))
	}
}

impl Drop for FactCursor<'_> {
	fn drop(&mut self) {
		if let Err(err) = self.engine.close(self.handle) {
			error!(table = %self.engine.schema().name(), error = %err, "close on unknown cursor");
		}
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		message.to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"unknown panic".to_string()
	}
}

pub(crate) fn to_sql(value: Value) -> SqlValue {
	match value {
		Value::Null => SqlValue::Null,
		Value::Int(v) => SqlValue::Integer(v),
		Value::Float(v) => SqlValue::Real(v),
		Value::Utf8(v) => SqlValue::Text(v),
		Value::Blob(v) => SqlValue::Blob(v),
	}
}

pub(crate) fn from_sql(value: SqlValue) -> Value {
	match value {
		SqlValue::Null => Value::Null,
		SqlValue::Integer(v) => Value::Int(v),
		SqlValue::Real(v) => Value::Float(v),
		SqlValue::Text(v) => Value::Utf8(v),
		SqlValue::Blob(v) => Value::Blob(v),
	}
}

#[cfg(test)]
mod tests {
	use hostfacts_core::Value;
	use rusqlite::types::Value as SqlValue;

	use super::{from_sql, panic_message, to_sql};

	#[test]
	fn test_values_bind_without_conversion() {
		assert_eq!(to_sql(Value::from("arm64")), SqlValue::Text("arm64".to_string()));
		assert_eq!(to_sql(Value::Int(8)), SqlValue::Integer(8));
		assert_eq!(to_sql(Value::Null), SqlValue::Null);
		assert_eq!(from_sql(SqlValue::Real(1.5)), Value::Float(1.5));
		assert_eq!(from_sql(SqlValue::Blob(vec![1, 2])), Value::Blob(vec![1, 2]));
	}

	#[test]
	fn test_panic_message() {
		let payload = std::panic::catch_unwind(|| panic!("sensor gone")).unwrap_err();
		assert_eq!(panic_message(payload.as_ref()), "sensor gone");

		let payload = std::panic::catch_unwind(|| panic!("sensor {} gone", 3)).unwrap_err();
		assert_eq!(panic_message(payload.as_ref()), "sensor 3 gone");

		let payload = std::panic::catch_unwind(|| std::panic::panic_any(7)).unwrap_err();
		assert_eq!(panic_message(payload.as_ref()), "unknown panic");
	}
}
