//! Board-level load/save on top of any [`PersistenceStore`].

use kanban_core::KanbanResult;
use kanban_domain::Board;

use crate::serialization::JsonSerializer;
use crate::traits::{FormatVersion, PersistenceMetadata, PersistenceStore, Serializer, StoreSnapshot};

/// Reads the stored board, or `None` when nothing has been saved yet.
///
/// A board that fails its integrity check is still returned; the problems
/// are logged so the host can decide what to do with it.
pub async fn load_board(store: &dyn PersistenceStore) -> KanbanResult<Option<Board>> {
    if !store.exists().await {
        tracing::debug!("No board stored at {}", store.path().display());
        return Ok(None);
    }

    let (snapshot, metadata) = store.load().await?;
    let board: Board = JsonSerializer.deserialize(&snapshot.data)?;

    let violations = board.integrity_violations();
    if !violations.is_empty() {
        tracing::warn!(
            board = %board.id,
            violations = violations.len(),
            "Loaded board is inconsistent: {}",
            violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        );
    }
    tracing::debug!(
        board = %board.id,
        saved_by = %metadata.instance_id,
        saved_at = %metadata.saved_at,
        "Board loaded"
    );

    Ok(Some(board))
}

/// Writes `board` through `store`; the store fills in the final metadata.
pub async fn save_board(
    store: &dyn PersistenceStore,
    board: &Board,
) -> KanbanResult<PersistenceMetadata> {
    let snapshot = StoreSnapshot {
        data: JsonSerializer.serialize(board)?,
        metadata: PersistenceMetadata::new(FormatVersion::CURRENT, uuid::Uuid::nil()),
    };
    store.save(snapshot).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFileStore;
    use crate::traits::MockPersistenceStore;
    use kanban_core::KanbanError;
    use kanban_domain::{BoardAction, BoardContext, Card, Column, Priority};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn board() -> Board {
        Board::from_parts(
            "b1",
            "Release",
            [
                Column::new("todo", "To Do").with_cards(["k1", "k2"]),
                Column::new("done", "Done"),
            ],
            [
                Card::new("k1", "Tag release").with_priority(Priority::High),
                Card::new("k2", "Announce").with_description("Blog post and changelog"),
            ],
        )
    }

    #[tokio::test]
    async fn test_missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));

        assert!(load_board(&store).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_returns_equal_board() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));

        let board = board();
        save_board(&store, &board).await.unwrap();

        assert_eq!(load_board(&store).await.unwrap(), Some(board));
    }

    #[tokio::test]
    async fn test_session_state_persists() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("board.json"));

        let mut context = BoardContext::with_board(board());
        context.dispatch(BoardAction::move_card("k1", "todo", "done", 0));
        save_board(&store, context.board()).await.unwrap();

        let reloaded = load_board(&store).await.unwrap().unwrap();
        assert_eq!(reloaded.column("done").unwrap().card_ids, vec!["k1"]);
        assert_eq!(&reloaded, context.board());
    }

    #[tokio::test]
    async fn test_save_hands_board_json_to_store() {
        let mut store = MockPersistenceStore::new();
        store
            .expect_save()
            .withf(|snapshot| {
                let value: serde_json::Value = serde_json::from_slice(&snapshot.data).unwrap();
                value["id"] == "b1" && value["columns"][0]["cardIds"][0] == "k1"
            })
            .times(1)
            .returning(|snapshot| Ok(snapshot.metadata));

        let metadata = save_board(&store, &board()).await.unwrap();
        assert_eq!(metadata.format_version, 1);
    }

    #[tokio::test]
    async fn test_load_skips_store_when_nothing_saved() {
        let mut store = MockPersistenceStore::new();
        store.expect_exists().times(1).returning(|| false);
        store
            .expect_path()
            .return_const(PathBuf::from("/tmp/unsaved.json"));
        store.expect_load().never();

        assert!(load_board(&store).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_propagates_store_errors() {
        let mut store = MockPersistenceStore::new();
        store.expect_exists().returning(|| true);
        store
            .expect_load()
            .returning(|| Err(KanbanError::Internal("disk on fire".into())));

        let result = load_board(&store).await;
        assert!(matches!(result, Err(KanbanError::Internal(_))));
    }

    #[tokio::test]
    async fn test_inconsistent_board_still_loads() {
        let mut store = MockPersistenceStore::new();
        let data = serde_json::json!({
            "id": "b1",
            "title": "Broken",
            "columns": [{"id": "c1", "title": "Todo", "cardIds": ["ghost"]}],
            "cards": {}
        });
        store.expect_exists().returning(|| true);
        store.expect_load().returning(move || {
            let metadata = PersistenceMetadata::new(FormatVersion::V1, uuid::Uuid::nil());
            Ok((
                StoreSnapshot {
                    data: serde_json::to_vec(&data).unwrap(),
                    metadata: metadata.clone(),
                },
                metadata,
            ))
        });

        let loaded = load_board(&store).await.unwrap().unwrap();
        assert!(!loaded.is_consistent());
    }
}
