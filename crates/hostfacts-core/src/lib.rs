// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared types for exposing host facts as read-only SQL tables.

pub mod config;
pub mod error;
pub mod provider;
pub mod schema;
pub mod value;

pub use config::EngineConfig;
pub use error::{FactError, Result};
pub use provider::{ConstraintArgs, FactProvider, Generated, Warning};
pub use schema::{Row, TableSchema};
pub use value::Value;
