//! Card filtering functionality.
//!
//! Filtering is a read-side concern: the reducer only records
//! `ActiveFilters`, and these helpers decide visibility over the
//! authoritative board.

pub mod active_filters;
pub mod card_filter;

pub use active_filters::{ActiveFilters, FilterUpdate};
pub use card_filter::{
    CardFilter, CompositeFilter, LabelFilter, PriorityFilter, SearchFilter,
};

use crate::board::Board;
use crate::card::Card;

/// Cards of `column_id` that pass `filters`, in display order.
pub fn visible_cards<'a>(board: &'a Board, column_id: &str, filters: &ActiveFilters) -> Vec<&'a Card> {
    let filter = CompositeFilter::from(filters);
    board
        .cards_in(column_id)
        .into_iter()
        .filter(|card| filter.matches(card))
        .collect()
}

/// Ids of the cards of `column_id` that pass `filters`, in display order.
pub fn visible_card_ids<'a>(board: &'a Board, column_id: &str, filters: &ActiveFilters) -> Vec<&'a str> {
    visible_cards(board, column_id, filters)
        .into_iter()
        .map(|card| card.id.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Column, Priority};

    #[test]
    fn test_visible_card_ids_keeps_order() {
        let board = Board::from_parts(
            "b1",
            "Board",
            [Column::new("c1", "Todo").with_cards(["k1", "k2", "k3"])],
            [
                Card::new("k1", "a").with_priority(Priority::High),
                Card::new("k2", "b").with_priority(Priority::Low),
                Card::new("k3", "c").with_priority(Priority::High),
            ],
        );
        let filters = ActiveFilters {
            priority: Some(Priority::High),
            ..Default::default()
        };

        assert_eq!(visible_card_ids(&board, "c1", &filters), vec!["k1", "k3"]);
        assert_eq!(
            visible_card_ids(&board, "c1", &ActiveFilters::default()),
            vec!["k1", "k2", "k3"]
        );
        assert!(visible_card_ids(&board, "missing", &filters).is_empty());
    }
}
