use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::card::{Card, CardId};
use crate::column::Column;

pub type BoardId = String;

/// Normalized store for one board: an id-keyed card map plus the ordered
/// columns whose `card_ids` lists group and order those cards.
///
/// Both collections sit behind `Arc` so that a transition only reallocates
/// the path it touches. Untouched columns and cards stay pointer-equal
/// between the old and the new board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(default)]
    pub columns: Arc<Vec<Arc<Column>>>,
    #[serde(default)]
    pub cards: Arc<BTreeMap<CardId, Arc<Card>>>,
}

impl Board {
    pub fn new(id: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            columns: Arc::default(),
            cards: Arc::default(),
        }
    }

    /// Builds a board from owned parts, keying every card by its own id.
    pub fn from_parts(
        id: impl Into<BoardId>,
        title: impl Into<String>,
        columns: impl IntoIterator<Item = Column>,
        cards: impl IntoIterator<Item = Card>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            columns: Arc::new(columns.into_iter().map(Arc::new).collect()),
            cards: Arc::new(
                cards
                    .into_iter()
                    .map(|card| (card.id.clone(), Arc::new(card)))
                    .collect(),
            ),
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.id == column_id)
            .map(Arc::as_ref)
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.id == column_id)
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.get(card_id).map(Arc::as_ref)
    }

    /// The column currently listing `card_id`, if any.
    pub fn column_of(&self, card_id: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.contains(card_id))
            .map(Arc::as_ref)
    }

    /// Cards of a column in display order, skipping ids with no card.
    pub fn cards_in(&self, column_id: &str) -> Vec<&Card> {
        self.column(column_id)
            .map(|column| {
                column
                    .card_ids
                    .iter()
                    .filter_map(|id| self.card(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Arc<Column>> {
        Arc::make_mut(&mut self.columns)
    }

    pub(crate) fn column_mut(&mut self, index: usize) -> &mut Column {
        Arc::make_mut(&mut self.columns_mut()[index])
    }

    pub(crate) fn cards_mut(&mut self) -> &mut BTreeMap<CardId, Arc<Card>> {
        Arc::make_mut(&mut self.cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_board() -> Board {
        Board::from_parts(
            "b1",
            "Sample",
            [
                Column::new("c1", "Todo").with_cards(["k1", "k2"]),
                Column::new("c2", "Done").with_cards(["k3"]),
            ],
            [
                Card::new("k1", "One"),
                Card::new("k2", "Two"),
                Card::new("k3", "Three"),
            ],
        )
    }

    #[test]
    fn test_lookups() {
        let board = sample_board();
        assert_eq!(board.column_index("c2"), Some(1));
        assert_eq!(board.column("c1").map(|c| c.title.as_str()), Some("Todo"));
        assert_eq!(board.card("k3").map(|c| c.title.as_str()), Some("Three"));
        assert_eq!(board.column_of("k3").map(|c| c.id.as_str()), Some("c2"));
        assert!(board.column_of("missing").is_none());
        assert_eq!(board.card_count(), 3);
        assert_eq!(board.column_count(), 2);
    }

    #[test]
    fn test_cards_in_preserves_column_order() {
        let board = sample_board();
        let titles: Vec<_> = board.cards_in("c1").iter().map(|c| c.title.clone()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
        assert!(board.cards_in("nope").is_empty());
    }

    #[test]
    fn test_copy_on_write_leaves_original_untouched() {
        let original = sample_board();
        let mut copy = original.clone();

        copy.column_mut(0).title = "Backlog".to_string();

        assert_eq!(original.columns[0].title, "Todo");
        assert_eq!(copy.columns[0].title, "Backlog");
        assert!(!Arc::ptr_eq(&original.columns, &copy.columns));
        assert!(Arc::ptr_eq(&original.columns[1], &copy.columns[1]));
        assert!(Arc::ptr_eq(&original.cards, &copy.cards));
    }

    #[test]
    fn test_wire_format_round_trip() {
        let board = sample_board();
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["columns"][0]["cardIds"][1], "k2");
        assert_eq!(json["cards"]["k1"]["title"], "One");

        let restored: Board = serde_json::from_value(json).unwrap();
        assert_eq!(restored, board);
    }
}
