// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use hostfacts_core::{FactError, Result, Row};

/// Identifies an open cursor within one engine instance.
///
/// Handles are only unique per engine, so they must never be used to look
/// up state belonging to another table.
pub type CursorHandle = u64;

/// Materialized rows and scan position of one open cursor.
#[derive(Debug, Default)]
pub struct CursorState {
	pub rows: Vec<Row>,
	pub position: usize,
}

impl CursorState {
	pub fn eof(&self) -> bool {
		self.position >= self.rows.len()
	}

	pub fn current(&self) -> Option<&Row> {
		self.rows.get(self.position)
	}
}

/// Maps cursor handles to their state for a single engine.
#[derive(Debug, Default)]
pub struct CursorStore {
	cursors: HashMap<CursorHandle, CursorState>,
}

impl CursorStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts tracking `handle` with no rows at position 0.
	///
	/// A handle that is still open is reset rather than duplicated.
	pub fn create(&mut self, handle: CursorHandle) {
		self.cursors.insert(handle, CursorState::default());
	}

	pub fn get(&self, handle: CursorHandle) -> Result<&CursorState> {
		self.cursors.get(&handle).ok_or(FactError::CursorNotOpen {
			handle,
		})
	}

	/// Replaces the rows of `handle` and rewinds it.
	pub fn set_rows(&mut self, handle: CursorHandle, rows: Vec<Row>) -> Result<()> {
		let state = self.get_mut(handle)?;
		state.rows = rows;
		state.position = 0;
		Ok(())
	}

	pub fn advance(&mut self, handle: CursorHandle) -> Result<()> {
		let state = self.get_mut(handle)?;
		state.position += 1;
		Ok(())
	}

	pub fn remove(&mut self, handle: CursorHandle) -> Result<CursorState> {
		self.cursors.remove(&handle).ok_or(FactError::CursorNotOpen {
			handle,
		})
	}

	pub fn contains(&self, handle: CursorHandle) -> bool {
		self.cursors.contains_key(&handle)
	}

	pub fn len(&self) -> usize {
		self.cursors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cursors.is_empty()
	}

	fn get_mut(&mut self, handle: CursorHandle) -> Result<&mut CursorState> {
		self.cursors.get_mut(&handle).ok_or(FactError::CursorNotOpen {
			handle,
		})
	}
}

#[cfg(test)]
mod tests {
	use hostfacts_core::{FactError, Value};

	use super::CursorStore;

	fn row(value: &str) -> Vec<Value> {
		vec![Value::from(value)]
	}

	#[test]
	fn test_create_starts_empty() {
		let mut store = CursorStore::new();
		store.create(1);

		let state = store.get(1).unwrap();
		assert!(state.rows.is_empty());
		assert_eq!(state.position, 0);
		assert!(state.eof());
	}

	#[test]
	fn test_set_rows_rewinds() {
		let mut store = CursorStore::new();
		store.create(1);
		store.set_rows(1, vec![row("a"), row("b")]).unwrap();
		store.advance(1).unwrap();
		assert_eq!(store.get(1).unwrap().position, 1);

		store.set_rows(1, vec![row("c")]).unwrap();
		let state = store.get(1).unwrap();
		assert_eq!(state.position, 0);
		assert_eq!(state.current(), Some(&row("c")));
	}

	#[test]
	fn test_advance_past_end_is_eof() {
		let mut store = CursorStore::new();
		store.create(7);
		store.set_rows(7, vec![row("a")]).unwrap();

		assert!(!store.get(7).unwrap().eof());
		store.advance(7).unwrap();
		assert!(store.get(7).unwrap().eof());
		assert_eq!(store.get(7).unwrap().current(), None);
	}

	#[test]
	fn test_handles_are_isolated() {
		let mut store = CursorStore::new();
		store.create(1);
		store.create(2);
		store.set_rows(1, vec![row("a"), row("b")]).unwrap();
		store.set_rows(2, vec![row("x")]).unwrap();

		store.advance(1).unwrap();
		store.advance(1).unwrap();

		assert!(store.get(1).unwrap().eof());
		let other = store.get(2).unwrap();
		assert_eq!(other.position, 0);
		assert_eq!(other.current(), Some(&row("x")));
	}

	#[test]
	fn test_remove_forgets_handle() {
		let mut store = CursorStore::new();
		store.create(3);
		store.remove(3).unwrap();

		assert!(!store.contains(3));
		assert!(store.is_empty());
		assert!(matches!(
			store.advance(3),
			Err(FactError::CursorNotOpen {
				handle: 3
			})
		));
		assert!(matches!(
			store.remove(3),
			Err(FactError::CursorNotOpen {
				handle: 3
			})
		));
	}

	#[test]
	fn test_unknown_handle_is_an_error() {
		let store = CursorStore::new();
		assert!(matches!(
			store.get(42),
			Err(FactError::CursorNotOpen {
				handle: 42
			})
		));
	}
}
