//! Referential integrity between columns and cards.
//!
//! A board is consistent when every id listed by a column is a key of the
//! card map, every card is listed by exactly one column exactly once, column
//! ids are unique and each card is stored under its own id. The reducer keeps
//! these properties for boards it produces; boards arriving through
//! `LOAD_BOARD` are checked here.

use std::collections::{HashMap, HashSet};

use kanban_core::{KanbanError, KanbanResult};
use thiserror::Error;

use crate::board::Board;
use crate::card::CardId;
use crate::column::ColumnId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityViolation {
    #[error("column '{column_id}' references missing card '{card_id}'")]
    DanglingCardRef { column_id: ColumnId, card_id: CardId },

    #[error("card '{card_id}' is listed more than once in column '{column_id}'")]
    DuplicateInColumn { column_id: ColumnId, card_id: CardId },

    #[error("card '{card_id}' is listed by both '{first}' and '{second}'")]
    SharedAcrossColumns {
        card_id: CardId,
        first: ColumnId,
        second: ColumnId,
    },

    #[error("card '{card_id}' is not listed by any column")]
    OrphanCard { card_id: CardId },

    #[error("column id '{column_id}' is used more than once")]
    DuplicateColumnId { column_id: ColumnId },

    #[error("card stored under '{key}' has id '{card_id}'")]
    KeyMismatch { key: CardId, card_id: CardId },
}

impl Board {
    /// Every integrity violation, in column order then card-key order.
    pub fn integrity_violations(&self) -> Vec<IntegrityViolation> {
        let mut violations = Vec::new();
        let mut column_ids = HashSet::new();
        let mut owner: HashMap<&str, &str> = HashMap::new();

        for column in self.columns.iter() {
            if !column_ids.insert(column.id.as_str()) {
                violations.push(IntegrityViolation::DuplicateColumnId {
                    column_id: column.id.clone(),
                });
            }

            let mut listed = HashSet::new();
            for card_id in &column.card_ids {
                if !listed.insert(card_id.as_str()) {
                    violations.push(IntegrityViolation::DuplicateInColumn {
                        column_id: column.id.clone(),
                        card_id: card_id.clone(),
                    });
                    continue;
                }
                if !self.cards.contains_key(card_id) {
                    violations.push(IntegrityViolation::DanglingCardRef {
                        column_id: column.id.clone(),
                        card_id: card_id.clone(),
                    });
                }
                if let Some(first) = owner.insert(card_id.as_str(), column.id.as_str()) {
                    violations.push(IntegrityViolation::SharedAcrossColumns {
                        card_id: card_id.clone(),
                        first: first.to_string(),
                        second: column.id.clone(),
                    });
                }
            }
        }

        for (key, card) in self.cards.iter() {
            if *key != card.id {
                violations.push(IntegrityViolation::KeyMismatch {
                    key: key.clone(),
                    card_id: card.id.clone(),
                });
            }
            if !owner.contains_key(key.as_str()) {
                violations.push(IntegrityViolation::OrphanCard {
                    card_id: key.clone(),
                });
            }
        }

        violations
    }

    pub fn is_consistent(&self) -> bool {
        self.integrity_violations().is_empty()
    }

    pub fn validate(&self) -> KanbanResult<()> {
        let violations = self.integrity_violations();
        if violations.is_empty() {
            return Ok(());
        }
        let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
        Err(KanbanError::Validation(format!(
            "board '{}' has {} integrity violation(s): {}",
            self.id,
            violations.len(),
            details.join("; ")
        )))
    }
}
