//! Ordered row storage.
//!
//! Insertion order is display order. Operations on ids that are not present
//! are no-ops, never errors.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, trace};

use super::ids::{IdGenerator, SequentialIds};
use super::{Row, RowId};

/// Errors raised by the row store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A row with the same id is already stored.
    #[error("row id {0} is already in use")]
    DuplicateId(RowId),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The ordered sequence of rows backing the table.
#[derive(Debug)]
pub struct RowStore {
    rows: Vec<Row>,
    ids: Box<dyn IdGenerator>,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new(Box::new(SequentialIds::default()))
    }
}

impl RowStore {
    /// Create an empty store using the given id generator.
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            rows: Vec::new(),
            ids,
        }
    }

    /// Create a store pre-filled with rows.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId` if two rows share an id.
    pub fn with_rows(rows: Vec<Row>, ids: Box<dyn IdGenerator>) -> Result<Self> {
        let mut store = Self::new(ids);
        for row in rows {
            store.add(row)?;
        }
        Ok(store)
    }

    /// Get the rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get all ids in display order.
    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by id.
    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Get the display index of a row.
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    /// Check if a row id is stored.
    pub fn contains(&self, id: RowId) -> bool {
        self.position(id).is_some()
    }

    /// Allocate an id that is not in use.
    ///
    /// Asks the generator at most `len + 1` times. If it keeps producing ids
    /// in use, or repeats itself (a saturated counter), the smallest free id
    /// is taken instead.
    pub fn next_id(&mut self) -> RowId {
        let mut previous = None;
        for _ in 0..=self.rows.len() {
            let id = self.ids.next_id();
            if !self.contains(id) {
                return id;
            }
            if previous == Some(id) {
                break;
            }
            previous = Some(id);
            trace!(id, "Generated id already in use, retrying");
        }
        let id = self.smallest_free_id();
        debug!(id, "Id generator exhausted, using smallest free id");
        id
    }

    fn smallest_free_id(&self) -> RowId {
        let used: HashSet<RowId> = self.rows.iter().map(|r| r.id).collect();
        (1..=RowId::MAX)
            .find(|id| !used.contains(id))
            .unwrap_or_default()
    }

    /// Append a row to the end.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId` if the row's id is already stored.
    pub fn add(&mut self, row: Row) -> Result<RowId> {
        if self.contains(row.id) {
            return Err(StoreError::DuplicateId(row.id));
        }
        let id = row.id;
        debug!(id, "Adding row");
        self.rows.push(row);
        Ok(id)
    }

    /// Append a copy of a row under a fresh id.
    ///
    /// Returns the new id, or `None` if `id` is not stored.
    pub fn duplicate(&mut self, id: RowId) -> Option<RowId> {
        let source = self.get(id)?.clone();
        let new_id = self.next_id();
        debug!(source = id, id = new_id, "Duplicating row");
        self.rows.push(source.with_id(new_id));
        Some(new_id)
    }

    /// Duplicate every listed row that is stored, in display order.
    ///
    /// Returns the ids of the copies in the order they were appended.
    pub fn copy_many(&mut self, ids: &HashSet<RowId>) -> Vec<RowId> {
        let sources: Vec<Row> = self
            .rows
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect();

        sources
            .into_iter()
            .map(|row| {
                let new_id = self.next_id();
                self.rows.push(row.with_id(new_id));
                new_id
            })
            .collect()
    }

    /// Remove a row.
    ///
    /// Returns the removed row, or `None` if it was not stored.
    pub fn delete(&mut self, id: RowId) -> Option<Row> {
        let index = self.position(id)?;
        debug!(id, index, "Deleting row");
        Some(self.rows.remove(index))
    }

    /// Remove every row whose id is in `ids`, keeping the rest in order.
    ///
    /// Returns the number of rows removed.
    pub fn bulk_delete(&mut self, ids: &HashSet<RowId>) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| !ids.contains(&r.id));
        let removed = before - self.rows.len();
        debug!(removed, "Bulk deleted rows");
        removed
    }

    /// Move `dragged` to the position `target` occupies.
    ///
    /// The dragged row is spliced out and reinserted at the target's index as
    /// it was before the removal. No-op if either id is missing or both are
    /// equal. Returns whether the store changed.
    pub fn reorder(&mut self, dragged: RowId, target: RowId) -> bool {
        if dragged == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(dragged), self.position(target)) else {
            return false;
        };
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        trace!(dragged, target, from, to, "Reordered row");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ids::IdStrategy;
    use crate::table::row::fixture_rows;

    fn row(id: RowId) -> Row {
        Row::new_entry(id, "t")
    }

    fn store_of(ids: &[RowId]) -> RowStore {
        let max = ids.iter().copied().max().unwrap_or(0);
        RowStore::with_rows(
            ids.iter().map(|&id| row(id)).collect(),
            Box::new(SequentialIds::starting_at(max + 1)),
        )
        .unwrap()
    }

    fn set(ids: &[RowId]) -> HashSet<RowId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_add_appends() {
        let mut store = store_of(&[1, 2]);
        assert_eq!(store.add(row(7)), Ok(7));
        assert_eq!(store.ids(), vec![1, 2, 7]);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut store = store_of(&[1, 2]);
        assert_eq!(store.add(row(2)), Err(StoreError::DuplicateId(2)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_with_rows_rejects_duplicates() {
        let result = RowStore::with_rows(vec![row(1), row(1)], Box::new(SequentialIds::default()));
        assert!(matches!(result, Err(StoreError::DuplicateId(1))));
    }

    #[test]
    fn test_next_id_skips_ids_in_use() {
        let mut store = RowStore::with_rows(
            vec![row(1), row(2)],
            Box::new(SequentialIds::starting_at(1)),
        )
        .unwrap();
        assert_eq!(store.next_id(), 3);
    }

    #[test]
    fn test_duplicate_with_saturated_generator_returns() {
        let mut store = RowStore::with_rows(
            vec![row(RowId::MAX)],
            IdStrategy::Sequential.generator(RowId::MAX),
        )
        .unwrap();

        assert_eq!(store.duplicate(RowId::MAX), Some(1));
        assert_eq!(store.duplicate(RowId::MAX), Some(2));
        assert_eq!(store.copy_many(&set(&[RowId::MAX, 1])), vec![3, 4]);
        assert_eq!(store.ids(), vec![RowId::MAX, 1, 2, 3, 4]);
    }

    /// Always hands out the same id.
    #[derive(Debug)]
    struct StuckIds(RowId);

    impl IdGenerator for StuckIds {
        fn next_id(&mut self) -> RowId {
            self.0
        }
    }

    #[test]
    fn test_next_id_falls_back_when_generator_repeats() {
        let mut store =
            RowStore::with_rows(vec![row(1), row(2), row(4)], Box::new(StuckIds(2))).unwrap();
        assert_eq!(store.next_id(), 3);
    }

    #[test]
    fn test_duplicate_copies_fields_with_fresh_id() {
        let mut store = RowStore::with_rows(
            vec![fixture_rows().remove(0)],
            Box::new(SequentialIds::starting_at(2)),
        )
        .unwrap();

        let new_id = store.duplicate(1).unwrap();
        assert_ne!(new_id, 1);
        assert_eq!(store.ids(), vec![1, new_id]);

        let original = store.get(1).unwrap();
        let copy = store.get(new_id).unwrap();
        assert_eq!(copy.enrichment, original.enrichment);
        assert_eq!(copy.input_column, original.input_column);
        assert_eq!(copy.action_column, original.action_column);
        assert_eq!(copy.timestamp, original.timestamp);
    }

    #[test]
    fn test_duplicate_missing_is_noop() {
        let mut store = store_of(&[1, 2]);
        assert_eq!(store.duplicate(9), None);
        assert_eq!(store.ids(), vec![1, 2]);
    }

    #[test]
    fn test_copy_many_in_store_order() {
        let mut store = store_of(&[1, 2, 3]);
        let copies = store.copy_many(&set(&[3, 1, 42]));
        assert_eq!(copies, vec![4, 5]);
        assert_eq!(store.ids(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_delete() {
        let mut store = store_of(&[1, 2, 3]);
        let removed = store.delete(2).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(store.ids(), vec![1, 3]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut store = store_of(&[1, 2, 3]);
        assert!(store.delete(5).is_none());
        assert_eq!(store.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_bulk_delete_preserves_order() {
        let mut store = store_of(&[1, 2, 3, 4, 5]);
        assert_eq!(store.bulk_delete(&set(&[2, 4, 9])), 2);
        assert_eq!(store.ids(), vec![1, 3, 5]);
    }

    #[test]
    fn test_bulk_delete_single() {
        let mut store = store_of(&[1, 2, 3]);
        store.bulk_delete(&set(&[2]));
        assert_eq!(store.ids(), vec![1, 3]);
    }

    #[test]
    fn test_reorder_same_id_is_noop() {
        let mut store = store_of(&[1, 2, 3]);
        assert!(!store.reorder(2, 2));
        assert_eq!(store.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_reorder_missing_id_is_noop() {
        let mut store = store_of(&[1, 2, 3]);
        assert!(!store.reorder(9, 2));
        assert!(!store.reorder(2, 9));
        assert_eq!(store.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_reorder_downwards_lands_on_target_position() {
        let mut store = store_of(&[1, 2, 3, 4]);
        assert!(store.reorder(1, 3));
        assert_eq!(store.ids(), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_reorder_upwards_lands_before_target() {
        let mut store = store_of(&[1, 2, 3, 4]);
        assert!(store.reorder(4, 2));
        assert_eq!(store.ids(), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_reorder_adjacent_swaps() {
        let mut store = store_of(&[1, 2, 3]);
        store.reorder(2, 3);
        assert_eq!(store.ids(), vec![1, 3, 2]);
        store.reorder(2, 3);
        assert_eq!(store.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_reorder_keeps_membership() {
        let mut store = store_of(&[1, 2, 3, 4, 5, 6]);
        let moves = [(1, 6), (6, 1), (3, 5), (5, 2), (4, 4), (2, 6)];
        for (a, b) in moves {
            store.reorder(a, b);
            let mut ids = store.ids();
            assert_eq!(ids.len(), 6);
            ids.sort_unstable();
            assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        }
    }
}
