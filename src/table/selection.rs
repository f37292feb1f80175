//! Set of selected row ids.

use std::collections::HashSet;

use super::RowId;

/// The rows currently marked as selected. Carries no ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<RowId>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present.
    pub fn toggle(&mut self, id: RowId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Replace the selection with exactly `ids`.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = RowId>) {
        self.ids = ids.into_iter().collect();
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Select everything, or clear when everything is already selected.
    ///
    /// "Everything selected" is decided by comparing sizes only, so stale ids
    /// count towards a full selection.
    pub fn select_all_toggle(&mut self, all_ids: &[RowId]) {
        if self.is_all_selected(all_ids.len()) {
            self.clear();
        } else {
            self.select_all(all_ids.iter().copied());
        }
    }

    /// Whether the selection size equals `total`.
    pub fn is_all_selected(&self, total: usize) -> bool {
        self.ids.len() == total
    }

    /// Check if an id is selected.
    pub fn contains(&self, id: RowId) -> bool {
        self.ids.contains(&id)
    }

    /// Deselect a single id. Returns whether it was selected.
    pub fn remove(&mut self, id: RowId) -> bool {
        self.ids.remove(&id)
    }

    /// Keep only ids matching the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(RowId) -> bool) {
        self.ids.retain(|&id| keep(id));
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Borrow the underlying id set.
    pub fn ids(&self) -> &HashSet<RowId> {
        &self.ids
    }
}
