// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{FactError, Result, Value};

/// One row of a fact table, positionally aligned with [`TableSchema::columns`].
pub type Row = Vec<Value>;

/// Name and ordered column list of a fact table.
///
/// Column order is authoritative: every row produced for this table must
/// line up with `columns` index by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
	name: String,
	columns: Vec<String>,
}

impl TableSchema {
	pub fn new<N, I, C>(name: N, columns: I) -> Self
	where
		N: Into<String>,
		I: IntoIterator<Item = C>,
		C: Into<String>,
	{
		Self {
			name: name.into(),
			columns: columns.into_iter().map(Into::into).collect(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	pub fn arity(&self) -> usize {
		self.columns.len()
	}

	/// The `CREATE TABLE` statement handed to the embedding database when a
	/// virtual table connects.
	pub fn declaration(&self) -> String {
		let columns = self.columns.iter().map(|c| quote_identifier(c)).collect::<Vec<_>>().join(", ");
		format!("CREATE TABLE {}({})", quote_identifier(&self.name), columns)
	}

	/// Rejects rows whose arity differs from the declared columns.
	pub fn validate(&self, index: usize, row: &Row) -> Result<()> {
		if row.len() != self.arity() {
			return Err(FactError::SchemaMismatch {
				table: self.name.clone(),
				row: index,
				expected: self.arity(),
				actual: row.len(),
			});
		}
		Ok(())
	}
}

fn quote_identifier(identifier: &str) -> String {
	format!("\"{}\"", identifier.replace('"', "\"\""))
}
