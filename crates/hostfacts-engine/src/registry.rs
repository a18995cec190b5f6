// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use hostfacts_core::{EngineConfig, FactError, FactProvider, Result, TableSchema};
use indexmap::IndexMap;
use rusqlite::{Connection, vtab::eponymous_only_module};
use tracing::{debug, instrument};

use crate::{
	log::QueryLog,
	runtime::FilterRuntime,
	vtab::{FactTable, TableBinding},
};

/// Providers to expose as tables, keyed by table name.
///
/// Table names are matched case-insensitively, the same way the embedding
/// database resolves them, so `OS_VERSION` and `os_version` collide.
#[derive(Default, Clone)]
pub struct ModuleRegistry {
	providers: IndexMap<String, Arc<dyn FactProvider>>,
}

impl ModuleRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register<P: FactProvider + 'static>(&mut self, provider: P) -> Result<()> {
		self.register_shared(Arc::new(provider))
	}

	/// Fails with [`FactError::DuplicateTable`] instead of shadowing a table
	/// registered earlier under the same name.
	pub fn register_shared(&mut self, provider: Arc<dyn FactProvider>) -> Result<()> {
		let name = provider.schema().name().to_string();
		let key = name.to_ascii_lowercase();
		if self.providers.contains_key(&key) {
			return Err(FactError::DuplicateTable {
				name,
			});
		}

		debug!(table = %name, columns = provider.schema().arity(), "registered");
		self.providers.insert(key, provider);
		Ok(())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.providers.contains_key(&name.to_ascii_lowercase())
	}

	pub fn schemas(&self) -> impl Iterator<Item = &TableSchema> {
		self.providers.values().map(|p| p.schema())
	}

	pub fn len(&self) -> usize {
		self.providers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}

	/// Registers every provider on `connection` as an eponymous virtual
	/// table, usable as `SELECT * FROM <name>` without a `CREATE` statement.
	#[instrument(name = "registry::install", level = "debug", skip_all, fields(tables = self.providers.len()))]
	pub(crate) fn install(
		&self,
		connection: &Connection,
		runtime: &Arc<FilterRuntime>,
		config: &EngineConfig,
		log: &QueryLog,
	) -> Result<()> {
		for provider in self.providers.values() {
			let binding = TableBinding {
				provider: provider.clone(),
				runtime: runtime.clone(),
				config: config.clone(),
				log: log.clone(),
			};
			connection
				.create_module(provider.schema().name(), eponymous_only_module::<FactTable>(), Some(binding))
				.map_err(FactError::database)?;
		}
		Ok(())
	}
}
