//! Repository contract shared by every entity.

use async_trait::async_trait;
use common::EntityId;
use thiserror::Error;

/// Errors that can occur when loading or storing entities.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No entity with the given ID exists.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: EntityId },

    /// An entity with the given ID already exists.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: EntityId },

    /// A stored record could not be turned back into an entity.
    #[error("Invalid stored {entity} {id}: {reason}")]
    InvalidRecord {
        entity: &'static str,
        id: EntityId,
        reason: String,
    },

    /// The backing store failed.
    #[error("Database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Returns true if this is a `NotFound` error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Persistence operations for one entity type.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Stores a new entity.
    ///
    /// Fails with `AlreadyExists` if the ID is taken.
    async fn create(&self, entity: &T) -> Result<()>;

    /// Replaces the stored state of an existing entity.
    ///
    /// Fails with `NotFound` if the entity was never created.
    async fn update(&self, entity: &T) -> Result<()>;

    /// Loads an entity by ID.
    async fn find(&self, id: &EntityId) -> Result<T>;

    /// Loads every stored entity, oldest first.
    async fn find_all(&self) -> Result<Vec<T>>;
}
