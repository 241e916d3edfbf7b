use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kanban_core::KanbanResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Stamped on every save so readers can tell which process wrote the file
/// and in which layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistenceMetadata {
    pub format_version: u32,
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(format_version: FormatVersion, instance_id: Uuid) -> Self {
        Self {
            format_version: format_version.as_u32(),
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Serialized board bytes plus the metadata they were (or will be) saved with
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub data: Vec<u8>,
    pub metadata: PersistenceMetadata,
}

/// Backend-agnostic storage for a single board document
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Persist `snapshot`, returning the metadata actually written
    async fn save(&self, snapshot: StoreSnapshot) -> KanbanResult<PersistenceMetadata>;

    async fn load(&self) -> KanbanResult<(StoreSnapshot, PersistenceMetadata)>;

    async fn exists(&self) -> bool;

    fn path(&self) -> &Path;
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    fn serialize(&self, data: &T) -> KanbanResult<Vec<u8>>;

    fn deserialize(&self, bytes: &[u8]) -> KanbanResult<T>;
}

/// On-disk layouts this crate can read
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormatVersion {
    V1,
}

impl FormatVersion {
    pub const CURRENT: FormatVersion = FormatVersion::V1;

    pub fn as_u32(self) -> u32 {
        match self {
            Self::V1 => 1,
        }
    }

    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::V1),
            _ => None,
        }
    }
}
