use crate::traits::Serializer;
use kanban_core::{KanbanError, KanbanResult};

/// Pretty-printed JSON, the format boards are stored in
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> KanbanResult<Vec<u8>> {
        serde_json::to_vec_pretty(data).map_err(KanbanError::serialization)
    }

    fn deserialize(&self, bytes: &[u8]) -> KanbanResult<T> {
        serde_json::from_slice(bytes).map_err(KanbanError::serialization)
    }
}
