//! Card filtering implementations.
//!
//! Provides the CardFilter trait and the filters the presentation layer
//! applies over the authoritative board when deciding card visibility.

use std::collections::HashSet;

use super::ActiveFilters;
use crate::card::{Card, Priority};
use crate::label::LabelId;

/// Trait for filtering cards by various criteria.
pub trait CardFilter {
    /// Returns true if the card matches the filter criteria.
    fn matches(&self, card: &Card) -> bool;
}

/// Matches cards carrying at least one of the given labels.
pub struct LabelFilter {
    label_ids: HashSet<LabelId>,
}

impl LabelFilter {
    pub fn any_of(ids: impl IntoIterator<Item = LabelId>) -> Self {
        Self {
            label_ids: ids.into_iter().collect(),
        }
    }
}

impl CardFilter for LabelFilter {
    fn matches(&self, card: &Card) -> bool {
        card.labels
            .iter()
            .any(|label| self.label_ids.contains(&label.id))
    }
}

pub struct PriorityFilter {
    priority: Priority,
}

impl PriorityFilter {
    pub fn new(priority: Priority) -> Self {
        Self { priority }
    }
}

impl CardFilter for PriorityFilter {
    fn matches(&self, card: &Card) -> bool {
        card.priority == self.priority
    }
}

/// Case-insensitive substring match over title, description and assignee.
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
        }
    }
}

impl CardFilter for SearchFilter {
    fn matches(&self, card: &Card) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(&self.needle);
        hit(card.title.as_str())
            || card.description.as_deref().is_some_and(hit)
            || card.assignee.as_deref().is_some_and(hit)
    }
}

/// Combine multiple filters with AND logic.
///
/// A card matches only if it passes all filters.
pub struct CompositeFilter {
    filters: Vec<Box<dyn CardFilter>>,
}

impl CompositeFilter {
    /// Create an empty composite filter (matches all cards).
    pub fn new() -> Self {
        Self { filters: vec![] }
    }

    /// Add a filter to the composite (builder pattern).
    pub fn with_filter(mut self, filter: Box<dyn CardFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Check if the composite has no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for CompositeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl CardFilter for CompositeFilter {
    fn matches(&self, card: &Card) -> bool {
        self.filters.iter().all(|f| f.matches(card))
    }
}

impl From<&ActiveFilters> for CompositeFilter {
    fn from(active: &ActiveFilters) -> Self {
        let mut composite = CompositeFilter::new();
        if !active.labels.is_empty() {
            composite =
                composite.with_filter(Box::new(LabelFilter::any_of(active.labels.iter().cloned())));
        }
        if let Some(priority) = active.priority {
            composite = composite.with_filter(Box::new(PriorityFilter::new(priority)));
        }
        if !active.search.trim().is_empty() {
            composite = composite.with_filter(Box::new(SearchFilter::new(&active.search)));
        }
        composite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;

    fn bug() -> Label {
        Label::new("label-bug", "Bug", "#ef4444")
    }

    fn docs() -> Label {
        Label::new("label-docs", "Documentation", "#3b82f6")
    }

    #[test]
    fn test_label_filter_matches_any() {
        let card = Card::new("k1", "Crash on save").with_labels(vec![bug()]);
        let other = Card::new("k2", "Write guide").with_labels(vec![docs()]);

        let filter = LabelFilter::any_of(["label-bug".to_string(), "label-feature".to_string()]);
        assert!(filter.matches(&card));
        assert!(!filter.matches(&other));
    }

    #[test]
    fn test_priority_filter() {
        let card = Card::new("k1", "Fix").with_priority(Priority::Urgent);
        assert!(PriorityFilter::new(Priority::Urgent).matches(&card));
        assert!(!PriorityFilter::new(Priority::Low).matches(&card));
    }

    #[test]
    fn test_search_filter_fields() {
        let card = Card::new("k1", "Refactor Cache")
            .with_description("Drop the LRU layer")
            .with_assignee("Marta");

        assert!(SearchFilter::new("cache").matches(&card));
        assert!(SearchFilter::new("lru").matches(&card));
        assert!(SearchFilter::new(" MARTA ").matches(&card));
        assert!(!SearchFilter::new("database").matches(&card));
        assert!(SearchFilter::new("").matches(&card));
    }

    #[test]
    fn test_composite_filter() {
        let card = Card::new("k1", "Crash on save")
            .with_labels(vec![bug()])
            .with_priority(Priority::High);

        // Empty composite matches all
        assert!(CompositeFilter::new().matches(&card));

        let active = ActiveFilters {
            labels: vec!["label-bug".to_string()],
            priority: Some(Priority::High),
            search: "crash".to_string(),
        };
        assert!(CompositeFilter::from(&active).matches(&card));

        // Fails one filter
        let failing = ActiveFilters {
            priority: Some(Priority::Low),
            ..active
        };
        assert!(!CompositeFilter::from(&failing).matches(&card));
    }

    #[test]
    fn test_inactive_filters_build_empty_composite() {
        assert!(CompositeFilter::from(&ActiveFilters::default()).is_empty());
    }
}
