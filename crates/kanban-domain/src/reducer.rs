//! The transition function.
//!
//! [`reduce`] computes the next [`BoardState`] from the current one and an
//! action. It never fails and never touches its input: an inapplicable
//! action returns a clone of the input, which shares every `Arc` with it.
//! Applied actions reallocate only the path from the root to the changed
//! column or card.
//!
//! Board edits keep referential integrity between columns and cards:
//! - `ADD_CARD` to a missing column, or with an id already in use, is a no-op
//! - `UPDATE_CARD` of a missing card is a no-op
//! - `DELETE_CARD` scrubs the id from every column, not only the named one
//! - `MOVE_CARD` requires both columns and the card in the source column
//! - `ADD_COLUMN` rejects duplicate column ids and unknown or claimed card ids
//! - `DELETE_COLUMN` cascades to the cards it held
//!
//! Every applied edit is recorded in [`crate::History`]; edits that change
//! nothing are not.

use std::collections::HashSet;
use std::sync::Arc;

use crate::action::BoardAction;
use crate::board::Board;
use crate::card::{Card, CardUpdate};
use crate::column::Column;
use crate::state::BoardState;

pub fn reduce(state: &BoardState, action: &BoardAction) -> BoardState {
    if action.is_recorded() {
        return match edit_board(&state.board, action) {
            Some(board) => {
                let mut next = state.clone();
                next.history = state
                    .history
                    .record(action.clone(), Arc::clone(&state.board));
                next.board = Arc::new(board);
                next
            }
            None => state.clone(),
        };
    }

    match action {
        BoardAction::LoadBoard(board) => BoardState {
            board: Arc::new(board.clone()),
            // The old pointer may name a card the new board lacks.
            dragged_card_id: None,
            active_filters: state.active_filters.clone(),
            // Snapshots of the previous board are meaningless after a reload.
            history: Default::default(),
        },
        BoardAction::SetDraggedCard(card_id) => {
            let mut next = state.clone();
            next.dragged_card_id = card_id.clone();
            next
        }
        BoardAction::SetFilter(update) => {
            let mut next = state.clone();
            next.active_filters = state.active_filters.merged(update);
            next
        }
        BoardAction::Undo => undo(state),
        BoardAction::Redo => redo(state),
        _ => state.clone(),
    }
}

fn undo(state: &BoardState) -> BoardState {
    match state.history.step_back() {
        Some((entry, history)) => {
            let mut next = state.clone();
            next.board = Arc::clone(&entry.previous_state);
            next.history = history;
            next
        }
        None => state.clone(),
    }
}

/// Replays the entry after the cursor against its recorded snapshot. The
/// reducer is deterministic, so this reproduces the post-edit board exactly.
fn redo(state: &BoardState) -> BoardState {
    let Some((entry, history)) = state.history.step_forward() else {
        return state.clone();
    };
    match edit_board(&entry.previous_state, &entry.action) {
        Some(board) => {
            let mut next = state.clone();
            next.board = Arc::new(board);
            next.history = history;
            next
        }
        None => {
            tracing::warn!(
                action = entry.action.kind(),
                "recorded action no longer applies to its snapshot; redo skipped"
            );
            state.clone()
        }
    }
}

/// Applies a board edit, or returns `None` when it is inapplicable or would
/// leave the board unchanged.
fn edit_board(board: &Board, action: &BoardAction) -> Option<Board> {
    match action {
        BoardAction::AddCard { column_id, card } => add_card(board, column_id, card),
        BoardAction::DeleteCard { card_id, column_id } => delete_card(board, card_id, column_id),
        BoardAction::UpdateCard { card_id, updates } => update_card(board, card_id, updates),
        BoardAction::MoveCard {
            card_id,
            from_column_id,
            to_column_id,
            to_index,
        } => move_card(board, card_id, from_column_id, to_column_id, *to_index),
        BoardAction::ReorderCard {
            column_id,
            from_index,
            to_index,
        } => {
            let index = board.column_index(column_id)?;
            reorder_within(board, index, *from_index, *to_index)
        }
        BoardAction::AddColumn { column } => add_column(board, column),
        BoardAction::UpdateColumn { column_id, title } => update_column(board, column_id, title),
        BoardAction::DeleteColumn { column_id } => delete_column(board, column_id),
        _ => None,
    }
}

fn add_card(board: &Board, column_id: &str, card: &Card) -> Option<Board> {
    if board.cards.contains_key(&card.id) || board.column_of(&card.id).is_some() {
        return None;
    }
    let index = board.column_index(column_id)?;

    let mut next = board.clone();
    next.cards_mut()
        .insert(card.id.clone(), Arc::new(card.clone()));
    next.column_mut(index).card_ids.push(card.id.clone());
    Some(next)
}

fn delete_card(board: &Board, card_id: &str, column_id: &str) -> Option<Board> {
    let stored = board.cards.contains_key(card_id);
    let holders: Vec<usize> = board
        .columns
        .iter()
        .enumerate()
        .filter(|(_, column)| column.contains(card_id))
        .map(|(index, _)| index)
        .collect();
    if !stored && holders.is_empty() {
        return None;
    }
    if !holders.is_empty() && board.column(column_id).map_or(true, |c| !c.contains(card_id)) {
        tracing::debug!(card_id, column_id, "deleted card was not in the named column");
    }

    let mut next = board.clone();
    if stored {
        next.cards_mut().remove(card_id);
    }
    for index in holders {
        next.column_mut(index).card_ids.retain(|id| id != card_id);
    }
    Some(next)
}

fn update_card(board: &Board, card_id: &str, updates: &CardUpdate) -> Option<Board> {
    let existing = board.cards.get(card_id)?;
    let updated = existing.apply_update(updates);
    if updated == **existing {
        return None;
    }

    let mut next = board.clone();
    next.cards_mut()
        .insert(card_id.to_string(), Arc::new(updated));
    Some(next)
}

fn move_card(
    board: &Board,
    card_id: &str,
    from_column_id: &str,
    to_column_id: &str,
    to_index: usize,
) -> Option<Board> {
    let from = board.column_index(from_column_id)?;
    let to = board.column_index(to_column_id)?;
    let position = board.columns[from].position_of(card_id)?;

    if from == to {
        return reorder_within(board, from, position, to_index);
    }
    if board.columns[to].contains(card_id) {
        return None;
    }

    let mut next = board.clone();
    let card_id = next.column_mut(from).card_ids.remove(position);
    let destination = &mut next.column_mut(to).card_ids;
    let at = to_index.min(destination.len());
    destination.insert(at, card_id);
    Some(next)
}

/// Removes the id at `from_index` and reinserts it at `to_index`, clamped to
/// the end of the shortened list.
fn reorder_within(
    board: &Board,
    column_index: usize,
    from_index: usize,
    to_index: usize,
) -> Option<Board> {
    let len = board.columns[column_index].len();
    if from_index >= len {
        return None;
    }
    let at = to_index.min(len - 1);
    if at == from_index {
        return None;
    }

    let mut next = board.clone();
    let card_ids = &mut next.column_mut(column_index).card_ids;
    let card_id = card_ids.remove(from_index);
    card_ids.insert(at, card_id);
    Some(next)
}

fn add_column(board: &Board, column: &Column) -> Option<Board> {
    if board.column_index(&column.id).is_some() {
        return None;
    }
    let mut seen = HashSet::new();
    let claimable = column.card_ids.iter().all(|id| {
        seen.insert(id.as_str()) && board.cards.contains_key(id) && board.column_of(id).is_none()
    });
    if !claimable {
        return None;
    }

    let mut next = board.clone();
    next.columns_mut().push(Arc::new(column.clone()));
    Some(next)
}

fn update_column(board: &Board, column_id: &str, title: &str) -> Option<Board> {
    let index = board.column_index(column_id)?;
    if board.columns[index].title == title {
        return None;
    }

    let mut next = board.clone();
    next.column_mut(index).title = title.to_string();
    Some(next)
}

fn delete_column(board: &Board, column_id: &str) -> Option<Board> {
    let index = board.column_index(column_id)?;

    let mut next = board.clone();
    let removed = next.columns_mut().remove(index);
    if !removed.card_ids.is_empty() {
        let cards = next.cards_mut();
        for card_id in &removed.card_ids {
            cards.remove(card_id);
        }
    }
    Some(next)
}
