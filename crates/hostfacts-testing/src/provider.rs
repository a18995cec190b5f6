// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	future,
	sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use hostfacts_core::{FactError, FactProvider, Generated, Result, Row, TableSchema, Value, Warning};

pub fn os_version_schema() -> TableSchema {
	TableSchema::new("os_version", ["name", "platform", "platform_like", "version", "build", "arch"])
}

pub fn os_version_row() -> Row {
	["macOS 14.4", "darwin", "darwin", "14.4", "23E214", "arm64"].into_iter().map(Value::from).collect()
}

/// Returns the same rows on every call.
pub struct StaticProvider {
	schema: TableSchema,
	rows: Vec<Row>,
}

impl StaticProvider {
	pub fn new(schema: TableSchema, rows: Vec<Row>) -> Self {
		Self {
			schema,
			rows,
		}
	}
}

#[async_trait]
impl FactProvider for StaticProvider {
	fn schema(&self) -> &TableSchema {
		&self.schema
	}

	async fn generate(&self, _index_num: i32, _index_str: Option<&str>, _args: &[Value]) -> Result<Generated> {
		Ok(Generated::new(self.rows.clone()))
	}
}

/// Always fails with the configured message.
pub struct FailingProvider {
	schema: TableSchema,
	message: String,
}

impl FailingProvider {
	pub fn new(schema: TableSchema, message: impl Into<String>) -> Self {
		Self {
			schema,
			message: message.into(),
		}
	}
}

#[async_trait]
impl FactProvider for FailingProvider {
	fn schema(&self) -> &TableSchema {
		&self.schema
	}

	async fn generate(&self, _index_num: i32, _index_str: Option<&str>, _args: &[Value]) -> Result<Generated> {
		Err(FactError::provider(self.schema.name(), &self.message))
	}
}

/// Table `numbers(n)`: the first constraint argument is the row count,
/// rows hold 0..count. Without arguments it produces three rows.
pub struct ArgsProvider {
	schema: TableSchema,
}

impl ArgsProvider {
	pub fn new() -> Self {
		Self {
			schema: TableSchema::new("numbers", ["n"]),
		}
	}
}

impl Default for ArgsProvider {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl FactProvider for ArgsProvider {
	fn schema(&self) -> &TableSchema {
		&self.schema
	}

	async fn generate(&self, _index_num: i32, _index_str: Option<&str>, args: &[Value]) -> Result<Generated> {
		let count = args.first().and_then(Value::as_int).unwrap_or(3);
		Ok(Generated::new((0..count).map(|n| vec![Value::Int(n)]).collect()))
	}
}

/// Counts invocations; optionally starts failing after a number of calls.
pub struct CountingProvider {
	schema: TableSchema,
	rows: Vec<Row>,
	fail_after: Option<usize>,
	calls: AtomicUsize,
}

impl CountingProvider {
	pub fn new(schema: TableSchema, rows: Vec<Row>) -> Self {
		Self {
			schema,
			rows,
			fail_after: None,
			calls: AtomicUsize::new(0),
		}
	}

	pub fn failing_after(schema: TableSchema, rows: Vec<Row>, successes: usize) -> Self {
		Self {
			fail_after: Some(successes),
			..Self::new(schema, rows)
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl FactProvider for CountingProvider {
	fn schema(&self) -> &TableSchema {
		&self.schema
	}

	async fn generate(&self, _index_num: i32, _index_str: Option<&str>, _args: &[Value]) -> Result<Generated> {
		let previous = self.calls.fetch_add(1, Ordering::SeqCst);
		match self.fail_after {
			Some(successes) if previous >= successes => {
				Err(FactError::provider(self.schema.name(), "host api went away"))
			}
			_ => Ok(Generated::new(self.rows.clone())),
		}
	}
}

/// Panics instead of producing rows.
pub struct PanickingProvider {
	schema: TableSchema,
	message: String,
}

impl PanickingProvider {
	pub fn new(schema: TableSchema, message: impl Into<String>) -> Self {
		Self {
			schema,
			message: message.into(),
		}
	}
}

#[async_trait]
impl FactProvider for PanickingProvider {
	fn schema(&self) -> &TableSchema {
		&self.schema
	}

	async fn generate(&self, _index_num: i32, _index_str: Option<&str>, _args: &[Value]) -> Result<Generated> {
		panic!("{}", self.message)
	}
}

/// Never resolves.
pub struct PendingProvider {
	schema: TableSchema,
}

impl PendingProvider {
	pub fn new(schema: TableSchema) -> Self {
		Self {
			schema,
		}
	}
}

#[async_trait]
impl FactProvider for PendingProvider {
	fn schema(&self) -> &TableSchema {
		&self.schema
	}

	async fn generate(&self, _index_num: i32, _index_str: Option<&str>, _args: &[Value]) -> Result<Generated> {
		future::pending::<Result<Generated>>().await
	}
}

/// Table `device(hostname, serial)` whose hostname lookup always fails.
pub struct WarningProvider {
	schema: TableSchema,
}

impl WarningProvider {
	pub fn new() -> Self {
		Self {
			schema: TableSchema::new("device", ["hostname", "serial"]),
		}
	}
}

impl Default for WarningProvider {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl FactProvider for WarningProvider {
	fn schema(&self) -> &TableSchema {
		&self.schema
	}

	async fn generate(&self, _index_num: i32, _index_str: Option<&str>, _args: &[Value]) -> Result<Generated> {
		let row = vec![Value::Null, Value::from("C02XL0GYJGH5")];
		Ok(Generated::new(vec![row]).with_warnings(vec![Warning::new(
			self.schema.name(),
			"hostname",
			"hostname lookup denied",
		)]))
	}
}
