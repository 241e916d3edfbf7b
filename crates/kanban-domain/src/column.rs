use serde::{Deserialize, Serialize};

use crate::card::CardId;

pub type ColumnId = String;

/// An ordered lane. `card_ids` is the display order and the only record of
/// which cards the column holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub card_ids: Vec<CardId>,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            card_ids: Vec::new(),
        }
    }

    pub fn with_cards<I, S>(mut self, card_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CardId>,
    {
        self.card_ids = card_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.card_ids.iter().any(|id| id == card_id)
    }

    pub fn position_of(&self, card_id: &str) -> Option<usize> {
        self.card_ids.iter().position(|id| id == card_id)
    }

    pub fn len(&self) -> usize {
        self.card_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.card_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_of() {
        let column = Column::new("c1", "Todo").with_cards(["a", "b", "c"]);
        assert_eq!(column.position_of("b"), Some(1));
        assert_eq!(column.position_of("z"), None);
        assert!(column.contains("c"));
        assert_eq!(column.len(), 3);
    }

    #[test]
    fn test_missing_card_ids_default_to_empty() {
        let column: Column = serde_json::from_str(r#"{"id": "c1", "title": "Todo"}"#).unwrap();
        assert!(column.is_empty());
    }
}
