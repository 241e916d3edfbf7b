use std::sync::Arc;

use crate::board::Board;
use crate::card::CardId;
use crate::filter::ActiveFilters;
use crate::history::History;

/// Aggregate state handed to the presentation layer: the board plus
/// UI-only fields. Produced exclusively by [`crate::reduce`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub board: Arc<Board>,
    pub dragged_card_id: Option<CardId>,
    pub active_filters: ActiveFilters,
    pub history: History,
}

impl BoardState {
    /// Empty board, no filters, no history.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(board: Board) -> Self {
        Self {
            board: Arc::new(board),
            ..Self::default()
        }
    }

    /// Cursor into `history`; `None` sits before the first entry.
    pub fn history_index(&self) -> Option<usize> {
        self.history.index()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
