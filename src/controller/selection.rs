use std::collections::BTreeSet;

use crate::core::types::{Row, RowId};

/// Tracks selected row ids against a shifting row model.
///
/// Ids persist even when the rows they name are off-screen (a server-mode
/// page change, a narrowed filter); [`materialize`](SelectionTracker::materialize)
/// intersects the id set with whatever row model is current, in model order.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    selected: BTreeSet<RowId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row's selection; returns whether it is selected now
    pub fn toggle(&mut self, id: RowId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Select or deselect a batch of ids (the current page's rows)
    pub fn set_all(&mut self, ids: impl IntoIterator<Item = RowId>, selected: bool) {
        for id in ids {
            if selected {
                self.selected.insert(id);
            } else {
                self.selected.remove(&id);
            }
        }
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Rows of the given model that are selected, in model order
    pub fn materialize(&self, rows: &[Row]) -> Vec<Row> {
        rows.iter()
            .filter(|row| self.selected.contains(&row.id))
            .cloned()
            .collect()
    }
}
