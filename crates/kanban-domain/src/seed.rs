//! Plausible starter boards for first runs and demos.

use chrono::{DateTime, Duration, Utc};
use kanban_core::AppConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::RangeInclusive;

use crate::board::Board;
use crate::card::{Card, Priority};
use crate::column::Column;
use crate::label::Label;

/// `(id, name, color)` of the labels every seeded board offers.
pub const DEFAULT_LABELS: [(&str, &str, &str); 5] = [
    ("label-bug", "Bug", "#ef4444"),
    ("label-feature", "Feature", "#22c55e"),
    ("label-docs", "Documentation", "#3b82f6"),
    ("label-refactor", "Refactor", "#a855f7"),
    ("label-urgent", "Urgent", "#f97316"),
];

/// `(id, title)` of the seeded columns, left to right.
pub const DEFAULT_COLUMNS: [(&str, &str); 4] = [
    ("column-todo", "To Do"),
    ("column-in-progress", "In Progress"),
    ("column-review", "Review"),
    ("column-done", "Done"),
];

const MAX_LABELS_PER_CARD: usize = 2;
const DESCRIPTION_PROBABILITY: f64 = 0.7;
const ASSIGNEE_PROBABILITY: f64 = 0.6;
const CREATED_WITHIN_DAYS: i64 = 30;

const VERBS: &[&str] = &[
    "Refactor", "Index", "Parse", "Compress", "Override", "Navigate", "Synthesize", "Back up",
    "Quantify", "Transmit", "Reboot", "Bypass",
];
const ADJECTIVES: &[&str] = &[
    "redundant", "primary", "cross-platform", "virtual", "optical", "wireless", "auxiliary",
    "open-source", "digital", "neural", "haptic", "solid state",
];
const NOUNS: &[&str] = &[
    "cache", "protocol", "bus", "firewall", "pixel", "driver", "array", "feed", "matrix",
    "interface", "bandwidth", "sensor",
];
const SENTENCES: &[&str] = &[
    "Reproduce the issue on a clean checkout first.",
    "Coordinate with the platform team before merging.",
    "The current behaviour is undocumented.",
    "Keep the public API unchanged.",
    "Add a regression test covering the edge case.",
    "Measure before and after to confirm the gain.",
    "Split into smaller pull requests if it grows.",
    "Check the logs from last week's incident.",
];
const ASSIGNEES: &[&str] = &[
    "Ana", "Bruno", "Carmen", "Diego", "Elena", "Farid", "Greta", "Hugo", "Ines", "Jonas",
];

pub fn default_labels() -> Vec<Label> {
    DEFAULT_LABELS
        .iter()
        .map(|(id, name, color)| Label::new(*id, *name, *color))
        .collect()
}

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub title: String,
    pub cards_per_column: RangeInclusive<usize>,
    /// Upper bound for generated timestamps.
    pub now: DateTime<Utc>,
}

impl SeedOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        let (min, max) = config.effective_cards_per_column();
        Self {
            title: config.effective_board_title().to_string(),
            cards_per_column: min..=max,
            now: Utc::now(),
        }
    }
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Generates a consistent board: four columns, a few cards in each.
pub fn generate_board<R: Rng>(rng: &mut R, options: &SeedOptions) -> Board {
    let labels = default_labels();
    let mut columns = Vec::with_capacity(DEFAULT_COLUMNS.len());
    let mut cards = Vec::new();

    for (column_id, title) in DEFAULT_COLUMNS {
        let count = rng.gen_range(options.cards_per_column.clone());
        let column_cards: Vec<Card> = (0..count)
            .map(|_| generate_card(rng, &labels, options.now))
            .collect();
        columns.push(Column::new(column_id, title).with_cards(column_cards.iter().map(|c| c.id.clone())));
        cards.extend(column_cards);
    }

    Board::from_parts(random_id(rng), options.title.clone(), columns, cards)
}

fn generate_card<R: Rng>(rng: &mut R, labels: &[Label], now: DateTime<Utc>) -> Card {
    let created_at = now - Duration::seconds(rng.gen_range(0..CREATED_WITHIN_DAYS * 24 * 60 * 60));
    let since_creation = (now - created_at).num_seconds();
    let updated_at = created_at + Duration::seconds(rng.gen_range(0..=since_creation));

    let label_count = rng.gen_range(0..=MAX_LABELS_PER_CARD);
    let mut card = Card::new(random_id(rng), phrase(rng))
        .with_labels(labels.choose_multiple(rng, label_count).cloned().collect())
        .with_priority(Priority::ALL[rng.gen_range(0..Priority::ALL.len())])
        .with_timestamps(created_at, updated_at);

    if rng.gen_bool(DESCRIPTION_PROBABILITY) {
        card = card.with_description(paragraph(rng));
    }
    if rng.gen_bool(ASSIGNEE_PROBABILITY) {
        card = card.with_assignee(pick(rng, ASSIGNEES));
    }
    card
}

fn random_id<R: Rng>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string()
}

fn phrase<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} the {} {}",
        pick(rng, VERBS),
        pick(rng, ADJECTIVES),
        pick(rng, NOUNS)
    )
}

fn paragraph<R: Rng>(rng: &mut R) -> String {
    let count = rng.gen_range(2..=4);
    SENTENCES
        .choose_multiple(rng, count)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn pick<R: Rng>(rng: &mut R, words: &[&'static str]) -> &'static str {
    words[rng.gen_range(0..words.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn options() -> SeedOptions {
        SeedOptions {
            title: "Demo".to_string(),
            cards_per_column: 2..=5,
            now: Utc::now(),
        }
    }

    #[test]
    fn test_generated_board_is_consistent() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = generate_board(&mut rng, &options());

        assert!(board.is_consistent(), "{:?}", board.integrity_violations());
        assert_eq!(board.title, "Demo");
        let column_ids: Vec<_> = board.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            column_ids,
            vec!["column-todo", "column-in-progress", "column-review", "column-done"]
        );
        for column in board.columns.iter() {
            assert!((2..=5).contains(&column.len()));
        }
    }

    #[test]
    fn test_card_fields_are_plausible() {
        let mut rng = StdRng::seed_from_u64(42);
        let opts = options();
        let board = generate_board(&mut rng, &opts);
        let known: Vec<_> = DEFAULT_LABELS.iter().map(|(id, _, _)| *id).collect();

        for card in board.cards.values() {
            assert!(card.labels.len() <= MAX_LABELS_PER_CARD);
            assert!(card.labels.iter().all(|l| known.contains(&l.id.as_str())));
            assert!(card.created_at <= card.updated_at);
            assert!(card.updated_at <= opts.now);
            assert!(opts.now - card.created_at <= Duration::days(CREATED_WITHIN_DAYS));
            assert!(!card.title.is_empty());
        }
    }

    #[test]
    fn test_same_seed_same_board() {
        let opts = options();
        let first = generate_board(&mut StdRng::seed_from_u64(3), &opts);
        let second = generate_board(&mut StdRng::seed_from_u64(3), &opts);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_card_count() {
        let opts = SeedOptions {
            cards_per_column: 1..=1,
            ..options()
        };
        let board = generate_board(&mut StdRng::seed_from_u64(1), &opts);
        assert_eq!(board.card_count(), DEFAULT_COLUMNS.len());
    }
}
