use std::path::Path;

use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{Board, BoardAction, BoardContext, History, Label};
use kanban_persistence::{load_board, save_board, JsonFileStore, PersistenceStore};

/// One CLI invocation's view of the board file: a [`BoardContext`] seeded
/// from disk plus the store it is written back to.
pub struct CliContext {
    board: BoardContext,
    store: JsonFileStore,
}

impl CliContext {
    pub async fn load(file_path: &Path) -> KanbanResult<Self> {
        let store = JsonFileStore::new(file_path);
        let board = load_board(&store).await?.ok_or_else(|| {
            KanbanError::NotFound(format!(
                "No board at {}; run `kanban init` first",
                file_path.display()
            ))
        })?;

        Ok(Self {
            board: BoardContext::with_board(board),
            store,
        })
    }

    /// Starts a context for a board that has not been written yet.
    pub fn create(file_path: &Path, board: Board) -> Self {
        Self {
            board: BoardContext::with_board(board),
            store: JsonFileStore::new(file_path),
        }
    }

    pub async fn file_exists(file_path: &Path) -> bool {
        JsonFileStore::new(file_path).exists().await
    }

    pub fn board(&self) -> &Board {
        self.board.board()
    }

    pub fn history(&self) -> &History {
        &self.board.state().history
    }

    pub fn context_mut(&mut self) -> &mut BoardContext {
        &mut self.board
    }

    /// Dispatches a single edit; an action the board ignores is an error
    /// at this layer so scripts notice typos in ids.
    pub fn dispatch(&mut self, action: BoardAction) -> KanbanResult<()> {
        let kind = action.kind();
        if self.board.dispatch(action) {
            Ok(())
        } else {
            Err(KanbanError::Validation(format!("{} had no effect", kind)))
        }
    }

    /// Labels the CLI can attach by id: the stock set plus any already used
    /// on this board.
    pub fn known_labels(&self) -> Vec<Label> {
        let mut labels = kanban_domain::seed::default_labels();
        for card in self.board().cards.values() {
            for label in &card.labels {
                if !labels.iter().any(|known| known.id == label.id) {
                    labels.push(label.clone());
                }
            }
        }
        labels
    }

    pub fn resolve_labels(&self, ids: &[String]) -> KanbanResult<Vec<Label>> {
        let known = self.known_labels();
        ids.iter()
            .map(|id| {
                known
                    .iter()
                    .find(|label| &label.id == id)
                    .cloned()
                    .ok_or_else(|| KanbanError::NotFound(format!("Label not found: {}", id)))
            })
            .collect()
    }

    pub async fn save(&self) -> KanbanResult<()> {
        save_board(&self.store, self.board()).await?;
        Ok(())
    }
}
