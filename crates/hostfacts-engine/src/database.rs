// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use hostfacts_core::{EngineConfig, FactError, Result, Row, TableSchema, Value, Warning};
use indexmap::IndexMap;
use rusqlite::{Connection, types::Value as SqlValue};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{log::QueryLog, registry::ModuleRegistry, runtime::FilterRuntime, vtab::from_sql};

/// Rows, column names and warnings of one executed statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
	pub columns: Vec<String>,
	pub rows: Vec<Row>,
	pub warnings: Vec<Warning>,
}

impl QueryResult {
	/// Rows keyed by column name, in column order.
	pub fn records(&self) -> Vec<IndexMap<String, Value>> {
		self.rows.iter().map(|row| self.columns.iter().cloned().zip(row.iter().cloned()).collect()).collect()
	}

	/// `{"data": [...], "warnings": [...]}` with one object per row.
	pub fn to_json(&self) -> Result<String> {
		#[derive(Serialize)]
		struct Report<'a> {
			data: Vec<IndexMap<String, Value>>,
			warnings: &'a [Warning],
		}

		serde_json::to_string(&Report {
			data: self.records(),
			warnings: &self.warnings,
		})
		.map_err(FactError::database)
	}
}

/// An in-memory SQLite database with every registered provider mounted as
/// a read-only table.
///
/// Provider futures run on a current-thread runtime owned by the database,
/// so [`FactDatabase::query`] must be called from synchronous code. Async
/// callers should go through `spawn_blocking`.
pub struct FactDatabase {
	connection: Connection,
	tables: Vec<TableSchema>,
	log: QueryLog,
	_runtime: Arc<FilterRuntime>,
}

impl FactDatabase {
	pub fn open(registry: &ModuleRegistry) -> Result<Self> {
		Self::open_with_config(registry, EngineConfig::default())
	}

	#[instrument(name = "database::open", level = "info", skip_all, fields(
		tables = registry.len(),
		filter_timeout = ?config.filter_timeout
	))]
	pub fn open_with_config(registry: &ModuleRegistry, config: EngineConfig) -> Result<Self> {
		let runtime = Arc::new(FilterRuntime::new()?);
		let connection = Connection::open_in_memory().map_err(FactError::database)?;
		let log = QueryLog::new();

		registry.install(&connection, &runtime, &config, &log)?;

		Ok(Self {
			connection,
			tables: registry.schemas().cloned().collect(),
			log,
			_runtime: runtime,
		})
	}

	pub fn tables(&self) -> &[TableSchema] {
		&self.tables
	}

	/// Executes `sql` and collects every row.
	///
	/// A provider failure fails the whole statement with the provider's
	/// error; no rows of a failed statement are returned.
	#[instrument(name = "database::query", level = "debug", skip(self))]
	pub fn query(&self, sql: &str) -> Result<QueryResult> {
		self.log.reset();

		match self.execute(sql) {
			Ok((columns, rows)) => {
				debug!(rows = rows.len(), "query finished");
				Ok(QueryResult {
					columns,
					rows,
					warnings: self.log.take_warnings(),
				})
			}
			Err(err) => {
				let err = self.log.take_failure().unwrap_or_else(|| FactError::database(err));
				warn!(error = %err, "query failed");
				Err(err)
			}
		}
	}

	fn execute(&self, sql: &str) -> rusqlite::Result<(Vec<String>, Vec<Row>)> {
		let mut statement = self.connection.prepare(sql)?;
		let columns = statement.column_names().into_iter().map(String::from).collect::<Vec<_>>();

		let mut rows = Vec::new();
		let mut cursor = statement.query([])?;
		while let Some(row) = cursor.next()? {
			let mut values = Vec::with_capacity(columns.len());
			for index in 0..columns.len() {
				values.push(from_sql(row.get::<_, SqlValue>(index)?));
			}
			rows.push(values);
		}

		Ok((columns, rows))
	}

	pub fn connection(&self) -> &Connection {
		&self.connection
	}
}
