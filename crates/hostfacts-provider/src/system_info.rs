// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use hostfacts_core::{FactProvider, Generated, Result, TableSchema, Value, Warning};
use tracing::instrument;

use crate::host::{Cpu, Hardware, Host, HostError, HostResult};

/// `system_info`: one row describing the machine's hardware.
///
/// Each host call is independent. A failing call leaves its columns null
/// and adds a warning instead of failing the row.
pub struct SystemInfo {
	schema: TableSchema,
	host: Arc<dyn Host>,
}

impl SystemInfo {
	pub fn new(host: Arc<dyn Host>) -> Self {
		Self {
			schema: TableSchema::new(
				"system_info",
				[
					"uuid",
					"hardware_serial",
					"hostname",
					"computer_name",
					"hardware_vendor",
					"hardware_model",
					"cpu_brand",
					"cpu_logical_cores",
					"physical_memory",
				],
			),
			host,
		}
	}

	/// Unwraps a host answer, warning once for every column it would have
	/// filled.
	fn collect<T>(&self, result: HostResult<T>, columns: &[&str], warnings: &mut Vec<Warning>) -> Option<T> {
		match result {
			Ok(value) => Some(value),
			Err(err) => {
				let message = err.to_string();
				warnings.extend(columns.iter().map(|column| Warning::new(self.schema.name(), *column, &message)));
				None
			}
		}
	}
}

#[async_trait]
impl FactProvider for SystemInfo {
	fn schema(&self) -> &TableSchema {
		&self.schema
	}

	#[instrument(name = "provider::system_info", level = "debug", skip_all)]
	async fn generate(&self, _index_num: i32, _index_str: Option<&str>, _args: &[Value]) -> Result<Generated> {
		let (hostname, computer_name, hardware, cpu, memory) = tokio::join!(
			self.host.hostname(),
			self.host.computer_name(),
			self.host.hardware(),
			self.host.cpu(),
			self.host.memory(),
		);

		let mut warnings = Vec::new();
		let hostname = self.collect(hostname, &["hostname"], &mut warnings);
		let computer_name = self.collect(computer_name, &["computer_name"], &mut warnings).flatten();
		let hardware = self
			.collect(hardware, &["uuid", "hardware_serial", "hardware_vendor", "hardware_model"], &mut warnings)
			.unwrap_or_default();
		let cpu = self.collect(cpu, &["cpu_brand", "cpu_logical_cores"], &mut warnings);
		let memory = memory.and_then(|bytes| {
			i64::try_from(bytes).map_err(|_| HostError::Malformed {
				what: "memory size",
				message: format!("{bytes} bytes does not fit a signed 64-bit integer"),
			})
		});
		let memory = self.collect(memory, &["physical_memory"], &mut warnings);

		let Hardware {
			uuid,
			serial,
			vendor,
			model,
		} = hardware;
		let (cpu_brand, cpu_logical_cores) = match cpu {
			Some(Cpu {
				brand,
				logical_cores,
			}) => (brand, Some(logical_cores)),
			None => (None, None),
		};

		let row = vec![
			Value::from(uuid),
			Value::from(serial),
			Value::from(hostname.clone()),
			Value::from(computer_name.or(hostname)),
			Value::from(vendor),
			Value::from(model),
			Value::from(cpu_brand),
			Value::from(cpu_logical_cores),
			Value::from(memory),
		];

		Ok(Generated::new(vec![row]).with_warnings(warnings))
	}
}
