// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use hostfacts_core::{FactError, FactProvider, Generated, Result, TableSchema, Value};
use tracing::instrument;

use crate::host::Host;

/// `os_version`: one row identifying the installed operating system.
pub struct OsVersion {
	schema: TableSchema,
	host: Arc<dyn Host>,
}

impl OsVersion {
	pub fn new(host: Arc<dyn Host>) -> Self {
		Self {
			schema: TableSchema::new("os_version", ["name", "platform", "platform_like", "version", "build", "arch"]),
			host,
		}
	}
}

#[async_trait]
impl FactProvider for OsVersion {
	fn schema(&self) -> &TableSchema {
		&self.schema
	}

	#[instrument(name = "provider::os_version", level = "debug", skip_all)]
	async fn generate(&self, _index_num: i32, _index_str: Option<&str>, _args: &[Value]) -> Result<Generated> {
		let (platform, release) = tokio::join!(self.host.platform(), self.host.os_release());
		let platform = platform.map_err(|err| FactError::provider(self.schema.name(), err))?;
		let release = release.map_err(|err| FactError::provider(self.schema.name(), err))?;

		let id = release.id.unwrap_or_else(|| platform.os.clone());
		let like = release.id_like.unwrap_or_else(|| id.clone());

		Ok(Generated::new(vec![vec![
			Value::from(release.name),
			Value::from(id),
			Value::from(like),
			Value::from(release.version),
			Value::from(release.build),
			Value::from(platform.arch),
		]]))
	}
}
