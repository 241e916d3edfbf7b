use std::sync::Arc;

use crate::action::BoardAction;
use crate::board::Board;
use crate::reducer::reduce;
use crate::state::BoardState;

/// Owns the current [`BoardState`] for a host and replaces it on every
/// dispatch. Holds no other state; dropping it and keeping the last state is
/// always valid.
#[derive(Debug, Clone, Default)]
pub struct BoardContext {
    state: BoardState,
}

impl BoardContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context seeded the way hosts seed it: with a single `LOAD_BOARD`.
    pub fn with_board(board: Board) -> Self {
        let mut context = Self::new();
        context.dispatch(BoardAction::LoadBoard(board));
        context
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn into_state(self) -> BoardState {
        self.state
    }

    /// Applies `action` and reports whether the board changed.
    pub fn dispatch(&mut self, action: BoardAction) -> bool {
        let next = reduce(&self.state, &action);
        let board_changed = !Arc::ptr_eq(&self.state.board, &next.board);
        tracing::debug!(
            action = action.kind(),
            board_changed,
            undo_depth = next.history.undo_depth(),
            redo_depth = next.history.redo_depth(),
            "dispatched"
        );
        self.state = next;
        board_changed
    }

    /// Applies each action in order, returning how many changed the board.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = BoardAction>) -> usize {
        actions
            .into_iter()
            .map(|action| self.dispatch(action))
            .filter(|changed| *changed)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Card, Column};

    fn board() -> Board {
        Board::from_parts("b1", "Board", [Column::new("c1", "Todo")], [])
    }

    #[test]
    fn test_with_board_starts_without_history() {
        let context = BoardContext::with_board(board());
        assert_eq!(context.board().title, "Board");
        assert!(!context.state().can_undo());
    }

    #[test]
    fn test_dispatch_reports_board_changes() {
        let mut context = BoardContext::with_board(board());
        assert!(context.dispatch(BoardAction::add_card("c1", Card::new("k1", "One"))));
        assert!(!context.dispatch(BoardAction::add_card("missing", Card::new("k2", "Two"))));
        assert!(!context.dispatch(BoardAction::SetDraggedCard(Some("k1".into()))));
        assert_eq!(context.state().dragged_card_id.as_deref(), Some("k1"));
        assert!(context.dispatch(BoardAction::Undo));
        assert!(context.board().cards.is_empty());
    }

    #[test]
    fn test_dispatch_all_counts_changes() {
        let mut context = BoardContext::with_board(board());
        let changed = context.dispatch_all([
            BoardAction::add_card("c1", Card::new("k1", "One")),
            BoardAction::add_card("c1", Card::new("k1", "Again")),
            BoardAction::update_column("c1", "Backlog"),
            BoardAction::Unknown,
        ]);
        assert_eq!(changed, 2);
        assert_eq!(context.into_state().history.len(), 2);
    }
}
