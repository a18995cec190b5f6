// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	process,
	time::{SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use hostfacts_core::{FactProvider, Generated, Result, TableSchema, Value};
use uuid::Uuid;

pub const AGENT_NAME: &str = "hostfacts";

/// `agent_info`: one row describing this process.
///
/// The instance id is generated once per provider, so it stays stable for
/// the lifetime of a registry and changes on restart.
pub struct AgentInfo {
	schema: TableSchema,
	instance_id: Uuid,
	start_time: i64,
}

impl AgentInfo {
	pub fn new() -> Self {
		let start_time = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0);
		Self {
			schema: TableSchema::new("agent_info", ["name", "version", "instance_id", "pid", "start_time"]),
			instance_id: Uuid::new_v4(),
			start_time,
		}
	}

	pub fn instance_id(&self) -> Uuid {
		self.instance_id
	}
}

impl Default for AgentInfo {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl FactProvider for AgentInfo {
	fn schema(&self) -> &TableSchema {
		&self.schema
	}

	async fn generate(&self, _index_num: i32, _index_str: Option<&str>, _args: &[Value]) -> Result<Generated> {
		Ok(Generated::new(vec![vec![
			Value::from(AGENT_NAME),
			Value::from(env!("CARGO_PKG_VERSION")),
			Value::from(self.instance_id.to_string()),
			Value::from(process::id()),
			Value::Int(self.start_time),
		]]))
	}
}

#[cfg(test)]
mod tests {
	use hostfacts_core::{FactProvider, Value};

	use super::{AGENT_NAME, AgentInfo};

	#[tokio::test]
	async fn test_row_is_stable_across_calls() {
		let provider = AgentInfo::new();
		let first = provider.generate(0, None, &[]).await.unwrap();
		let second = provider.generate(0, None, &[]).await.unwrap();

		assert_eq!(first, second);
		let row = &first.rows[0];
		assert_eq!(row[0], Value::from(AGENT_NAME));
		assert_eq!(row[2], Value::from(provider.instance_id().to_string()));
		assert_eq!(row[3], Value::Int(std::process::id() as i64));
	}

	#[test]
	fn test_instances_differ() {
		assert_ne!(AgentInfo::new().instance_id(), AgentInfo::new().instance_id());
	}
}
