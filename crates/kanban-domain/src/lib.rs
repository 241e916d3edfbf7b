//! Single-board kanban state: the normalized entity store, the action
//! vocabulary and the pure [`reduce`] transition function with undo/redo.

pub mod action;
pub mod board;
pub mod card;
pub mod column;
pub mod context;
pub mod field_update;
pub mod filter;
pub mod history;
pub mod integrity;
pub mod label;
pub mod reducer;
pub mod seed;
pub mod state;

pub use action::BoardAction;
pub use board::{Board, BoardId};
pub use card::{Card, CardId, CardUpdate, Priority};
pub use column::{Column, ColumnId};
pub use context::BoardContext;
pub use field_update::FieldUpdate;
pub use filter::{ActiveFilters, CardFilter, CompositeFilter, FilterUpdate};
pub use history::{History, HistoryEntry};
pub use integrity::IntegrityViolation;
pub use label::{Label, LabelId};
pub use reducer::reduce;
pub use seed::{generate_board, SeedOptions};
pub use state::BoardState;
