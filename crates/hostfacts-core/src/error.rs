// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

pub type Result<T> = std::result::Result<T, FactError>;

#[derive(Debug, thiserror::Error)]
pub enum FactError {
	#[error("table '{table}' failed to produce rows: {message}")]
	Provider {
		table: String,
		message: String,
	},

	#[error("table '{table}' produced row {row} with {actual} values, expected {expected}")]
	SchemaMismatch {
		table: String,
		row: usize,
		expected: usize,
		actual: usize,
	},

	#[error("table '{table}' did not produce rows within {after:?}")]
	Timeout {
		table: String,
		after: Duration,
	},

	#[error("table '{table}' panicked while producing rows: {message}")]
	Panicked {
		table: String,
		message: String,
	},

	#[error("cursor {handle} is not open")]
	CursorNotOpen {
		handle: u64,
	},

	#[error("cursor {handle} has no row at position {position}")]
	NoCurrentRow {
		handle: u64,
		position: usize,
	},

	#[error("table '{table}' has no column {column}")]
	ColumnOutOfRange {
		table: String,
		column: usize,
	},

	#[error("table '{name}' is already registered")]
	DuplicateTable {
		name: String,
	},

	#[error("database error: {message}")]
	Database {
		message: String,
	},
}

impl FactError {
	pub fn provider(table: impl Into<String>, message: impl ToString) -> Self {
		FactError::Provider {
			table: table.into(),
			message: message.to_string(),
		}
	}

	pub fn database(message: impl ToString) -> Self {
		FactError::Database {
			message: message.to_string(),
		}
	}
}
