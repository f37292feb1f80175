//! Drag-to-reorder protocol state.
//!
//! A drag runs in three phases: `start` records the dragged row, every
//! `over` reorders the store immediately (there is no separate drop step),
//! and `end` forgets the drag.

use super::{RowId, RowStore};

/// State of an in-progress drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    dragged: Option<RowId>,
    dragging: bool,
}

impl DragState {
    /// Create an idle drag state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging a row.
    pub fn start(&mut self, id: RowId) {
        self.dragged = Some(id);
        self.dragging = true;
    }

    /// The pointer passed over `target` while dragging.
    ///
    /// Moves the dragged row to the target's position. Returns whether the
    /// store changed.
    pub fn over(&self, target: RowId, store: &mut RowStore) -> bool {
        match self.dragged {
            Some(dragged) if self.dragging => store.reorder(dragged, target),
            _ => false,
        }
    }

    /// Finish the drag.
    pub fn end(&mut self) {
        self.dragged = None;
        self.dragging = false;
    }

    /// Check if a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Get the row being dragged.
    pub fn dragged(&self) -> Option<RowId> {
        self.dragged
    }

    /// Check if a given row is the one being dragged.
    pub fn is_dragged(&self, id: RowId) -> bool {
        self.dragged == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ids::SequentialIds;
    use crate::table::Row;

    fn store() -> RowStore {
        RowStore::with_rows(
            (1..=4).map(|id| Row::new_entry(id, "t")).collect(),
            Box::new(SequentialIds::starting_at(5)),
        )
        .unwrap()
    }

    #[test]
    fn test_start_and_end() {
        let mut drag = DragState::new();
        assert!(!drag.is_dragging());

        drag.start(2);
        assert!(drag.is_dragging());
        assert_eq!(drag.dragged(), Some(2));
        assert!(drag.is_dragged(2));

        drag.end();
        assert!(!drag.is_dragging());
        assert_eq!(drag.dragged(), None);
    }

    #[test]
    fn test_over_reorders_live() {
        let mut store = store();
        let mut drag = DragState::new();
        drag.start(1);

        // Crossing rows one by one walks the dragged row down the list.
        assert!(drag.over(2, &mut store));
        assert_eq!(store.ids(), vec![2, 1, 3, 4]);
        assert!(drag.over(3, &mut store));
        assert_eq!(store.ids(), vec![2, 3, 1, 4]);

        // Hovering its own row does nothing.
        assert!(!drag.over(1, &mut store));
        drag.end();
        assert_eq!(store.ids(), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_over_without_drag_is_noop() {
        let mut store = store();
        let drag = DragState::new();
        assert!(!drag.over(3, &mut store));
        assert_eq!(store.ids(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_over_after_dragged_row_deleted_is_noop() {
        let mut store = store();
        let mut drag = DragState::new();
        drag.start(2);
        store.delete(2);
        assert!(!drag.over(3, &mut store));
        assert_eq!(store.ids(), vec![1, 3, 4]);
    }
}
