//! The closed set of operations the reducer understands.
//!
//! On the wire every action is `{"type": "...", "payload": ...}` with a
//! SCREAMING_SNAKE_CASE tag and camelCase payload keys, e.g.
//!
//! ```json
//! {"type": "MOVE_CARD", "payload": {"cardId": "k1", "fromColumnId": "c1", "toColumnId": "c2", "toIndex": 0}}
//! ```
//!
//! Tags the vocabulary does not know deserialize to [`BoardAction::Unknown`]
//! whatever their payload, and the reducer ignores them.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::board::Board;
use crate::card::{Card, CardId, CardUpdate};
use crate::column::{Column, ColumnId};
use crate::filter::FilterUpdate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardAction {
    /// Replace the whole board, e.g. from storage or seed data.
    LoadBoard(Board),
    /// Set or clear (`null`) the card being dragged.
    SetDraggedCard(Option<CardId>),
    SetFilter(FilterUpdate),
    #[serde(rename_all = "camelCase")]
    AddCard { column_id: ColumnId, card: Card },
    /// `column_id` names the column the host believes holds the card; the
    /// id is scrubbed from every column regardless.
    #[serde(rename_all = "camelCase")]
    DeleteCard { card_id: CardId, column_id: ColumnId },
    #[serde(rename_all = "camelCase")]
    UpdateCard { card_id: CardId, updates: CardUpdate },
    /// Insert position is clamped: an index past the end appends.
    #[serde(rename_all = "camelCase")]
    MoveCard {
        card_id: CardId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
        to_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    ReorderCard {
        column_id: ColumnId,
        from_index: usize,
        to_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    AddColumn { column: Column },
    #[serde(rename_all = "camelCase")]
    UpdateColumn { column_id: ColumnId, title: String },
    #[serde(rename_all = "camelCase")]
    DeleteColumn { column_id: ColumnId },
    Undo,
    Redo,
    #[serde(other)]
    Unknown,
}

/// Wire tags of every variant except `Unknown`.
const KNOWN_TYPES: [&str; 13] = [
    "LOAD_BOARD",
    "SET_DRAGGED_CARD",
    "SET_FILTER",
    "ADD_CARD",
    "DELETE_CARD",
    "UPDATE_CARD",
    "MOVE_CARD",
    "REORDER_CARD",
    "ADD_COLUMN",
    "UPDATE_COLUMN",
    "DELETE_COLUMN",
    "UNDO",
    "REDO",
];

/// `{type, payload}` read before the tag is known.
#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

impl Serialize for BoardAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BoardAction::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for BoardAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAction::deserialize(deserializer)?;
        if !KNOWN_TYPES.contains(&raw.kind.as_str()) {
            return Ok(BoardAction::Unknown);
        }
        let tagged = serde_json::json!({ "type": raw.kind, "payload": raw.payload });
        BoardAction::deserialize(tagged).map_err(de::Error::custom)
    }
}

impl BoardAction {
    /// The wire tag of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            BoardAction::LoadBoard(_) => "LOAD_BOARD",
            BoardAction::SetDraggedCard(_) => "SET_DRAGGED_CARD",
            BoardAction::SetFilter(_) => "SET_FILTER",
            BoardAction::AddCard { .. } => "ADD_CARD",
            BoardAction::DeleteCard { .. } => "DELETE_CARD",
            BoardAction::UpdateCard { .. } => "UPDATE_CARD",
            BoardAction::MoveCard { .. } => "MOVE_CARD",
            BoardAction::ReorderCard { .. } => "REORDER_CARD",
            BoardAction::AddColumn { .. } => "ADD_COLUMN",
            BoardAction::UpdateColumn { .. } => "UPDATE_COLUMN",
            BoardAction::DeleteColumn { .. } => "DELETE_COLUMN",
            BoardAction::Undo => "UNDO",
            BoardAction::Redo => "REDO",
            BoardAction::Unknown => "UNKNOWN",
        }
    }

    /// Whether an applied instance of this action is an undoable board edit.
    pub fn is_recorded(&self) -> bool {
        matches!(
            self,
            BoardAction::AddCard { .. }
                | BoardAction::DeleteCard { .. }
                | BoardAction::UpdateCard { .. }
                | BoardAction::MoveCard { .. }
                | BoardAction::ReorderCard { .. }
                | BoardAction::AddColumn { .. }
                | BoardAction::UpdateColumn { .. }
                | BoardAction::DeleteColumn { .. }
        )
    }

    pub fn add_card(column_id: impl Into<ColumnId>, card: Card) -> Self {
        BoardAction::AddCard {
            column_id: column_id.into(),
            card,
        }
    }

    pub fn delete_card(card_id: impl Into<CardId>, column_id: impl Into<ColumnId>) -> Self {
        BoardAction::DeleteCard {
            card_id: card_id.into(),
            column_id: column_id.into(),
        }
    }

    pub fn update_card(card_id: impl Into<CardId>, updates: CardUpdate) -> Self {
        BoardAction::UpdateCard {
            card_id: card_id.into(),
            updates,
        }
    }

    pub fn move_card(
        card_id: impl Into<CardId>,
        from_column_id: impl Into<ColumnId>,
        to_column_id: impl Into<ColumnId>,
        to_index: usize,
    ) -> Self {
        BoardAction::MoveCard {
            card_id: card_id.into(),
            from_column_id: from_column_id.into(),
            to_column_id: to_column_id.into(),
            to_index,
        }
    }

    pub fn reorder_card(column_id: impl Into<ColumnId>, from_index: usize, to_index: usize) -> Self {
        BoardAction::ReorderCard {
            column_id: column_id.into(),
            from_index,
            to_index,
        }
    }

    pub fn update_column(column_id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        BoardAction::UpdateColumn {
            column_id: column_id.into(),
            title: title.into(),
        }
    }

    pub fn delete_column(column_id: impl Into<ColumnId>) -> Self {
        BoardAction::DeleteColumn {
            column_id: column_id.into(),
        }
    }
}
