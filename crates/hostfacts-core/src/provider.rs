// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;
use serde::Serialize;

use crate::{Result, Row, TableSchema, Value};

/// Bound values of the constraints the planner passed to a filter call.
pub type ConstraintArgs = Vec<Value>;

/// A non-fatal problem encountered while producing a row.
///
/// The row is still returned, usually with the affected column left null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
	pub table: String,
	pub column: String,
	pub message: String,
}

impl Warning {
	pub fn new(table: impl Into<String>, column: impl Into<String>, message: impl ToString) -> Self {
		Self {
			table: table.into(),
			column: column.into(),
			message: message.to_string(),
		}
	}
}

/// The complete result of one provider invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generated {
	pub rows: Vec<Row>,
	pub warnings: Vec<Warning>,
}

impl Generated {
	pub fn new(rows: Vec<Row>) -> Self {
		Self {
			rows,
			warnings: Vec::new(),
		}
	}

	pub fn with_warnings(mut self, warnings: Vec<Warning>) -> Self {
		self.warnings.extend(warnings);
		self
	}
}

impl From<Vec<Row>> for Generated {
	fn from(rows: Vec<Row>) -> Self {
		Self::new(rows)
	}
}

/// Produces the current rows of exactly one fact table.
///
/// Implementations are invoked once per filter call and must return the
/// complete result set; nothing in this crate ever asks a provider for a
/// subset of rows. The index hint and constraint arguments are advisory:
/// a provider that ignores them must still return everything a full scan
/// would see.
#[async_trait]
pub trait FactProvider: Send + Sync {
	/// The table this provider serves
	fn schema(&self) -> &TableSchema;

	/// Produce all rows, each aligned with [`FactProvider::schema`]
	async fn generate(&self, index_num: i32, index_str: Option<&str>, args: &[Value]) -> Result<Generated>;
}
