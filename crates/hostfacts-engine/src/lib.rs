// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Generic SQLite virtual tables over asynchronous fact providers.

pub mod cursor;
pub mod database;
pub mod engine;
pub mod log;
pub mod registry;
mod runtime;
pub mod vtab;

pub use cursor::{CursorHandle, CursorState, CursorStore};
pub use database::{FactDatabase, QueryResult};
pub use engine::{IndexPlan, VirtualTableEngine};
pub use log::QueryLog;
pub use registry::ModuleRegistry;
