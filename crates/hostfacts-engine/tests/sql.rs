// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{sync::Arc, time::Duration};

use hostfacts_core::{EngineConfig, FactError, TableSchema, Value};
use hostfacts_engine::{FactDatabase, ModuleRegistry};
use hostfacts_testing::{
	ArgsProvider, CountingProvider, FailingProvider, PanickingProvider, PendingProvider, StaticProvider,
	WarningProvider, init_tracing, os_version_row, os_version_schema,
};

fn database(registry: ModuleRegistry) -> FactDatabase {
	init_tracing();
	FactDatabase::open(&registry).unwrap()
}

fn single(provider: impl hostfacts_core::FactProvider + 'static) -> FactDatabase {
	let mut registry = ModuleRegistry::new();
	registry.register(provider).unwrap();
	database(registry)
}

fn ints(values: &[i64]) -> Vec<Value> {
	values.iter().copied().map(Value::Int).collect()
}

#[test]
fn test_select_os_version() {
	let db = single(StaticProvider::new(os_version_schema(), vec![os_version_row()]));

	let result = db.query("SELECT * FROM os_version").unwrap();
	assert_eq!(result.columns, vec!["name", "platform", "platform_like", "version", "build", "arch"]);
	assert_eq!(result.rows, vec![os_version_row()]);
	assert!(result.warnings.is_empty());
}

#[test]
fn test_select_projection_and_where() {
	let db = single(StaticProvider::new(os_version_schema(), vec![os_version_row()]));

	let result = db.query("SELECT version, arch FROM os_version WHERE platform = 'darwin'").unwrap();
	assert_eq!(result.rows, vec![vec![Value::from("14.4"), Value::from("arm64")]]);

	let result = db.query("SELECT name FROM os_version WHERE platform = 'windows'").unwrap();
	assert!(result.rows.is_empty());
}

#[test]
fn test_empty_table_is_not_an_error() {
	let db = single(StaticProvider::new(os_version_schema(), vec![]));

	let result = db.query("SELECT * FROM os_version").unwrap();
	assert!(result.rows.is_empty());
	assert_eq!(result.columns.len(), 6);
}

#[test]
fn test_provider_failure_fails_statement() {
	let db = single(FailingProvider::new(os_version_schema(), "permission denied"));

	let err = db.query("SELECT * FROM os_version").unwrap_err();
	match err {
		FactError::Provider {
			table,
			message,
		} => {
			assert_eq!(table, "os_version");
			assert_eq!(message, "permission denied");
		}
		other => panic!("unexpected error: {other}"),
	}
}

#[test]
fn test_failure_does_not_leak_into_next_statement() {
	let mut registry = ModuleRegistry::new();
	registry.register(FailingProvider::new(os_version_schema(), "permission denied")).unwrap();
	registry.register(ArgsProvider::new()).unwrap();
	let db = database(registry);

	assert!(db.query("SELECT * FROM os_version").is_err());

	let result = db.query("SELECT n FROM numbers").unwrap();
	assert_eq!(result.rows.len(), 3);
}

#[test]
fn test_arity_mismatch_fails_statement() {
	let short = vec![Value::from("macOS 14.4")];
	let db = single(StaticProvider::new(os_version_schema(), vec![short]));

	let err = db.query("SELECT * FROM os_version").unwrap_err();
	assert!(matches!(
		err,
		FactError::SchemaMismatch {
			expected: 6,
			actual: 1,
			..
		}
	));
}

#[test]
fn test_rowid_is_scan_position() {
	let db = single(ArgsProvider::new());

	let result = db.query("SELECT rowid, n FROM numbers").unwrap();
	assert_eq!(result.rows, vec![ints(&[0, 0]), ints(&[1, 1]), ints(&[2, 2])]);
}

#[test]
fn test_self_join_cursors_are_isolated() {
	let db = single(ArgsProvider::new());

	let result = db.query("SELECT a.n, b.n FROM numbers a, numbers b ORDER BY a.n, b.n").unwrap();
	let expected = (0..3).flat_map(|a| (0..3).map(move |b| ints(&[a, b]))).collect::<Vec<_>>();
	assert_eq!(result.rows, expected);
}

#[test]
fn test_provider_runs_on_every_statement() {
	let provider = Arc::new(CountingProvider::new(os_version_schema(), vec![os_version_row()]));
	let mut registry = ModuleRegistry::new();
	registry.register_shared(provider.clone()).unwrap();
	let db = database(registry);

	db.query("SELECT * FROM os_version").unwrap();
	db.query("SELECT name FROM os_version").unwrap();
	assert_eq!(provider.calls(), 2);
}

#[test]
fn test_cross_join_of_different_tables() {
	let mut registry = ModuleRegistry::new();
	registry.register(StaticProvider::new(os_version_schema(), vec![os_version_row()])).unwrap();
	registry.register(ArgsProvider::new()).unwrap();
	let db = database(registry);

	let result = db.query("SELECT os_version.platform, numbers.n FROM os_version, numbers ORDER BY numbers.n").unwrap();
	assert_eq!(result.rows.len(), 3);
	assert_eq!(result.rows[2], vec![Value::from("darwin"), Value::Int(2)]);
}

#[test]
fn test_warnings_are_reported_per_statement() {
	let db = single(WarningProvider::new());

	let result = db.query("SELECT hostname, serial FROM device").unwrap();
	assert_eq!(result.rows, vec![vec![Value::Null, Value::from("C02XL0GYJGH5")]]);
	assert_eq!(result.warnings.len(), 1);
	assert_eq!(result.warnings[0].table, "device");

	let result = db.query("SELECT 1").unwrap();
	assert!(result.warnings.is_empty());
}

#[test]
fn test_warnings_are_not_repeated_per_inner_scan() {
	let mut registry = ModuleRegistry::new();
	registry.register(ArgsProvider::new()).unwrap();
	registry.register(WarningProvider::new()).unwrap();
	let db = database(registry);

	let result = db.query("SELECT numbers.n, device.serial FROM numbers CROSS JOIN device").unwrap();
	assert_eq!(result.rows.len(), 3);
	assert_eq!(result.warnings.len(), 1);
	assert_eq!(result.warnings[0].column, "hostname");
}

#[test]
fn test_provider_panic_fails_query() {
	let db = single(PanickingProvider::new(os_version_schema(), "sysctl returned garbage"));

	let err = db.query("SELECT name FROM os_version").unwrap_err();
	assert!(matches!(
		err,
		FactError::Panicked { table, message } if table == "os_version" && message == "sysctl returned garbage"
	));

	let err = db.query("SELECT name FROM os_version").unwrap_err();
	assert!(matches!(err, FactError::Panicked { .. }));
}

#[test]
fn test_panic_does_not_affect_other_tables() {
	let mut registry = ModuleRegistry::new();
	registry.register(PanickingProvider::new(os_version_schema(), "boom")).unwrap();
	registry.register(ArgsProvider::new()).unwrap();
	let db = database(registry);

	assert!(db.query("SELECT * FROM os_version").is_err());
	let result = db.query("SELECT n FROM numbers").unwrap();
	assert_eq!(result.rows, vec![ints(&[0]), ints(&[1]), ints(&[2])]);
}

#[tokio::test]
async fn test_query_on_runtime_thread_fails_instead_of_aborting() {
	let db = single(ArgsProvider::new());

	let err = db.query("SELECT n FROM numbers").unwrap_err();
	assert!(matches!(err, FactError::Panicked { table, .. } if table == "numbers"));
}

#[test]
fn test_to_json_reports_records() {
	let db = single(WarningProvider::new());

	let json = db.query("SELECT serial FROM device").unwrap().to_json().unwrap();
	let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
	assert_eq!(parsed["data"][0]["serial"], "C02XL0GYJGH5");
	assert_eq!(parsed["warnings"][0]["column"], "hostname");
}

#[test]
fn test_slow_provider_times_out() {
	let mut registry = ModuleRegistry::new();
	registry.register(PendingProvider::new(os_version_schema())).unwrap();
	let config = EngineConfig::default().with_filter_timeout(Duration::from_millis(20));
	let db = FactDatabase::open_with_config(&registry, config).unwrap();

	let err = db.query("SELECT * FROM os_version").unwrap_err();
	assert!(matches!(err, FactError::Timeout { table, .. } if table == "os_version"));
}

#[test]
fn test_unknown_table_is_database_error() {
	let db = single(ArgsProvider::new());

	let err = db.query("SELECT * FROM nope").unwrap_err();
	assert!(matches!(err, FactError::Database { .. }));
}

#[test]
fn test_tables_are_read_only() {
	let db = single(ArgsProvider::new());

	assert!(db.query("INSERT INTO numbers VALUES (7)").is_err());
	assert!(db.query("DELETE FROM numbers").is_err());
}

#[test]
fn test_tables_lists_registered_schemas() {
	let mut registry = ModuleRegistry::new();
	registry.register(ArgsProvider::new()).unwrap();
	registry.register(StaticProvider::new(TableSchema::new("empty", ["x"]), vec![])).unwrap();
	let db = database(registry);

	let names = db.tables().iter().map(|t| t.name()).collect::<Vec<_>>();
	assert_eq!(names, vec!["numbers", "empty"]);
}
