//! Active filter settings held in board state.
//!
//! `ActiveFilters` is what the presentation layer filters by; `FilterUpdate`
//! is the partial form carried by `SET_FILTER` and merged key by key.

use serde::{Deserialize, Serialize};

use crate::card::Priority;
use crate::field_update::FieldUpdate;
use crate::label::LabelId;

/// Filter settings (what to filter by), as opposed to the `CardFilter`
/// implementations that perform the filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFilters {
    /// Show cards carrying any of these label ids.
    #[serde(default)]
    pub labels: Vec<LabelId>,
    /// Show cards with exactly this priority.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Case-insensitive text searched in title, description and assignee.
    #[serde(default)]
    pub search: String,
}

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any filters are active.
    pub fn has_active_filters(&self) -> bool {
        !self.labels.is_empty() || self.priority.is_some() || !self.search.trim().is_empty()
    }

    /// Shallow merge: keys absent from `update` keep their current value.
    pub fn merged(&self, update: &FilterUpdate) -> ActiveFilters {
        let mut next = self.clone();
        if let Some(labels) = &update.labels {
            next.labels = labels.clone();
        }
        update.priority.clone().apply_to(&mut next.priority);
        if let Some(search) = &update.search {
            next.search = search.clone();
        }
        next
    }
}

/// Partial `ActiveFilters` carried by `SET_FILTER`.
///
/// `priority: null` clears the priority filter; an absent key leaves it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<LabelId>>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_no_change")]
    pub priority: FieldUpdate<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FilterUpdate {
    /// An update that resets every filter to its empty value.
    pub fn reset() -> Self {
        Self {
            labels: Some(Vec::new()),
            priority: FieldUpdate::Clear,
            search: Some(String::new()),
        }
    }

    pub fn labels(labels: impl IntoIterator<Item = impl Into<LabelId>>) -> Self {
        Self {
            labels: Some(labels.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn priority(priority: Option<Priority>) -> Self {
        Self {
            priority: FieldUpdate::from(priority),
            ..Default::default()
        }
    }

    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_active_filters() {
        let filters = ActiveFilters::default();
        assert!(!filters.has_active_filters());
    }

    #[test]
    fn test_whitespace_search_is_inactive() {
        let filters = ActiveFilters {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert!(!filters.has_active_filters());
    }

    #[test]
    fn test_merge_keeps_unspecified_keys() {
        let filters = ActiveFilters {
            labels: vec!["label-bug".to_string()],
            priority: Some(Priority::High),
            search: "parser".to_string(),
        };

        let merged = filters.merged(&FilterUpdate::search("lexer"));
        assert_eq!(merged.labels, vec!["label-bug".to_string()]);
        assert_eq!(merged.priority, Some(Priority::High));
        assert_eq!(merged.search, "lexer");
    }

    #[test]
    fn test_merge_clears_priority() {
        let filters = ActiveFilters {
            priority: Some(Priority::Low),
            ..Default::default()
        };
        let merged = filters.merged(&FilterUpdate::priority(None));
        assert_eq!(merged.priority, None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let filters = ActiveFilters {
            labels: vec!["label-docs".to_string()],
            priority: Some(Priority::Urgent),
            search: "x".to_string(),
        };
        assert_eq!(filters.merged(&FilterUpdate::reset()), ActiveFilters::default());
    }

    #[test]
    fn test_partial_update_from_json() {
        let update: FilterUpdate = serde_json::from_str(r#"{"priority": "urgent"}"#).unwrap();
        assert_eq!(update.priority, FieldUpdate::Set(Priority::Urgent));
        assert!(update.labels.is_none());
        assert!(update.search.is_none());
    }
}
