use std::collections::BTreeSet;

use crate::RequestId;

/// Keyboard modifier held while clicking a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifiers {
    #[default]
    None,
    Ctrl,
    Shift,
}

/// Rows highlighted in the main table.
///
/// Rows are addressed by their display position; `rows` passed to each call is
/// the identifier of every rendered row in current display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    selected: BTreeSet<RequestId>,
    last_index: usize,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a click on the row at `index`. Returns false when the table is
    /// empty and nothing changed.
    pub fn select_row(&mut self, rows: &[RequestId], index: usize, modifiers: Modifiers) -> bool {
        let Some(last) = rows.len().checked_sub(1) else {
            return false;
        };
        let index = index.min(last);
        let id = rows[index];

        match modifiers {
            Modifiers::None => {
                self.selected.clear();
                self.selected.insert(id);
            }
            Modifiers::Ctrl => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
            }
            Modifiers::Shift => {
                let anchor = self.last_index.min(last);
                let (low, high) = if anchor <= index {
                    (anchor, index)
                } else {
                    (index, anchor)
                };
                self.selected.extend(rows[low..=high].iter().copied());
            }
        }
        self.last_index = index;
        true
    }

    /// Makes `id` the only selected row unless it is already part of the
    /// selection. Used when a context menu opens on a row.
    pub fn focus_row(&mut self, rows: &[RequestId], index: usize) -> Option<RequestId> {
        let last = rows.len().checked_sub(1)?;
        let index = index.min(last);
        let id = rows[index];
        if !self.selected.contains(&id) {
            self.selected.clear();
            self.selected.insert(id);
            self.last_index = index;
        }
        Some(id)
    }

    /// Drops identifiers that are no longer rendered.
    pub fn retain_rendered(&mut self, rows: &[RequestId]) {
        let rendered: BTreeSet<RequestId> = rows.iter().copied().collect();
        self.selected.retain(|id| rendered.contains(id));
        self.last_index = self.last_index.min(rows.len().saturating_sub(1));
    }

    /// Selected identifiers in display order.
    pub fn in_display_order(&self, rows: &[RequestId]) -> Vec<RequestId> {
        rows.iter()
            .copied()
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    pub fn contains(&self, id: RequestId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.last_index
    }
}

#[cfg(test)]
mod tests {
    use super::{Modifiers, SelectionSet};

    const ROWS: [u64; 6] = [10, 11, 12, 13, 14, 15];

    #[test]
    fn out_of_range_clicks_clamp_to_last_row() {
        let mut selection = SelectionSet::new();
        assert!(selection.select_row(&ROWS, 99, Modifiers::None));
        assert_eq!(selection.in_display_order(&ROWS), vec![15]);
        assert_eq!(selection.last_index(), 5);
    }

    #[test]
    fn clicks_on_empty_table_are_ignored() {
        let mut selection = SelectionSet::new();
        assert!(!selection.select_row(&[], 0, Modifiers::Shift));
        assert!(selection.is_empty());
        assert_eq!(selection.focus_row(&[], 3), None);
    }

    #[test]
    fn retain_rendered_clamps_anchor() {
        let mut selection = SelectionSet::new();
        selection.select_row(&ROWS, 5, Modifiers::None);
        selection.retain_rendered(&ROWS[..2]);
        assert!(selection.is_empty());
        assert_eq!(selection.last_index(), 1);
    }
}
