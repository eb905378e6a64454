//! Bounded snapshot history for undo/redo.

use crate::design::CanvasSize;
use crate::element::Element;
use serde::{Deserialize, Serialize};

/// Maximum number of history entries to keep.
pub const MAX_HISTORY: usize = 30;

/// An immutable snapshot of the restorable design state.
///
/// Captures both element lists and the canvas properties so a restore is
/// atomic across sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    pub elements: Vec<Element>,
    pub backside_elements: Vec<Element>,
    pub canvas_size: CanvasSize,
    pub canvas_background: String,
}

/// Ordered, bounded list of snapshots with a cursor.
///
/// Commit points push the state as it was *before* a mutation, so the live
/// state ahead of the last commit is not in the list. [`History::undo`]
/// therefore records the live state as the redo target when stepping back
/// from the tail; without that, redo could never return to the latest edit.
/// A push equal to the cursor entry only truncates the redo tail.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryState>,
    cursor: usize,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no snapshot has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if there is a state before the cursor to go back to.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// True if the cursor is behind the tail.
    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }

    /// Drop everything and seed with a single snapshot.
    ///
    /// Used when a design is loaded or reset.
    pub fn reset(&mut self, seed: HistoryState) {
        self.entries.clear();
        self.entries.push(seed);
        self.cursor = 0;
    }

    /// Record a commit point.
    ///
    /// Any redo tail past the cursor is discarded, then the snapshot is
    /// appended and the oldest entries beyond [`MAX_HISTORY`] are evicted
    /// from the front.
    pub fn push(&mut self, snapshot: HistoryState) {
        if self.entries.is_empty() {
            self.entries.push(snapshot);
            self.cursor = 0;
            return;
        }
        self.entries.truncate(self.cursor + 1);
        if self.entries[self.cursor] == snapshot {
            return;
        }
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;
        self.evict_overflow();
    }

    /// Snapshot at the cursor, if any.
    pub fn current(&self) -> Option<&HistoryState> {
        self.entries.get(self.cursor)
    }

    /// Step back one snapshot, given the current live state.
    ///
    /// Returns an owned copy of the target state, or `None` at the lower
    /// bound. The returned snapshot never aliases the stored entry.
    pub fn undo(&mut self, live: &HistoryState) -> Option<HistoryState> {
        if self.entries.is_empty() {
            return None;
        }
        // Stepping back from the tail: keep the live state reachable via redo.
        if self.cursor + 1 == self.entries.len() && self.entries[self.cursor] != *live {
            self.entries.push(live.clone());
            self.cursor += 1;
            self.evict_overflow();
        }
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one snapshot. Returns `None` at the tail.
    pub fn redo(&mut self) -> Option<HistoryState> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    fn evict_overflow(&mut self) {
        if self.entries.len() > MAX_HISTORY {
            let excess = self.entries.len() - MAX_HISTORY;
            self.entries.drain(..excess);
            self.cursor = self.cursor.saturating_sub(excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::CanvasSize;
    use crate::element::{Element, ShapeData, ShapeType};
    use kurbo::Point;

    // Fixed element id so snapshots with the same marker compare equal.
    fn state(marker: f64) -> HistoryState {
        let mut element = Element::shape(
            Point::new(marker, marker),
            ShapeData::new(ShapeType::Rectangle, 10.0, 10.0),
        );
        element.id = uuid::Uuid::from_u128(7);
        HistoryState {
            elements: vec![element],
            backside_elements: Vec::new(),
            canvas_size: CanvasSize::default(),
            canvas_background: "#ffffff".to_string(),
        }
    }

    #[test]
    fn test_empty_history_noops() {
        let mut history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo(&state(0.0)).is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_bounded_keeps_most_recent() {
        let mut history = History::new();
        for i in 0..40 {
            history.push(state(i as f64));
        }
        assert_eq!(history.len(), MAX_HISTORY);
        // Oldest evicted first: the surviving window is 10..40.
        let mut live = state(39.0);
        let mut seen = Vec::new();
        while let Some(s) = history.undo(&live) {
            seen.push(s.elements[0].position.x);
            live = s;
        }
        assert_eq!(seen.len(), MAX_HISTORY - 1);
        assert!((seen[0] - 38.0).abs() < f64::EPSILON);
        assert!((seen[seen.len() - 1] - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_undo_redo_inverse() {
        let mut history = History::new();
        history.reset(state(0.0));
        history.push(state(0.0)); // commit before first edit, dedupes
        history.push(state(1.0)); // commit before second edit
        let live = state(2.0);

        let undone = history.undo(&live).unwrap();
        assert_eq!(undone, state(1.0));
        let redone = history.redo().unwrap();
        assert_eq!(redone, live);
    }

    #[test]
    fn test_branch_truncates_redo() {
        let mut history = History::new();
        history.reset(state(0.0));
        history.push(state(0.0));
        history.push(state(1.0));

        let undone = history.undo(&state(2.0)).unwrap();
        assert_eq!(undone, state(1.0));
        assert!(history.can_redo());

        // A new edit from here discards the redo future.
        history.push(state(1.0));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_restored_snapshot_is_independent() {
        let mut history = History::new();
        history.reset(state(0.0));
        history.push(state(1.0));

        let mut restored = history.undo(&state(2.0)).unwrap();
        assert_eq!(restored, state(1.0));
        restored.elements[0].position = Point::new(99.0, 99.0);

        // The stored entry must be unaffected by mutations of the copy.
        history.redo();
        let again = history.undo(&state(2.0)).unwrap();
        assert_eq!(again, state(1.0));
    }

    #[test]
    fn test_reset_seeds_single_entry() {
        let mut history = History::new();
        for i in 0..5 {
            history.push(state(i as f64));
        }
        history.reset(state(9.0));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
