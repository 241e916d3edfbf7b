//! Undo/redo history.
//!
//! A linear sequence of `(action, board before the action)` entries with a
//! cursor at the most recently applied entry. The reducer owns all writes:
//! it records every applied board edit and moves the cursor on UNDO/REDO.
//! Recording after an undo truncates the abandoned redo branch.

use std::sync::Arc;

use crate::action::BoardAction;
use crate::board::Board;

/// A board snapshot paired with the action that transitioned away from it.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub action: BoardAction,
    pub previous_state: Arc<Board>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Arc<Vec<HistoryEntry>>,
    /// Most recently applied entry; `None` means before the first entry.
    index: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_depth() < self.entries.len()
    }

    /// Number of entries an UNDO can still step back through.
    pub fn undo_depth(&self) -> usize {
        self.index.map_or(0, |i| i + 1)
    }

    /// Number of entries a REDO can still step forward through.
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.undo_depth()
    }

    /// Appends an entry after the cursor, dropping any redo branch.
    pub(crate) fn record(&self, action: BoardAction, previous_state: Arc<Board>) -> History {
        let mut entries: Vec<HistoryEntry> = self.entries[..self.undo_depth()].to_vec();
        entries.push(HistoryEntry {
            action,
            previous_state,
        });
        let index = Some(entries.len() - 1);
        History {
            entries: Arc::new(entries),
            index,
        }
    }

    /// The entry under the cursor and the history with the cursor moved back.
    pub(crate) fn step_back(&self) -> Option<(&HistoryEntry, History)> {
        let index = self.index?;
        let entry = &self.entries[index];
        let moved = History {
            entries: Arc::clone(&self.entries),
            index: index.checked_sub(1),
        };
        Some((entry, moved))
    }

    /// The entry after the cursor and the history with the cursor moved onto it.
    pub(crate) fn step_forward(&self) -> Option<(&HistoryEntry, History)> {
        let next = self.undo_depth();
        let entry = self.entries.get(next)?;
        let moved = History {
            entries: Arc::clone(&self.entries),
            index: Some(next),
        };
        Some((entry, moved))
    }
}
