//! Storage-facing service trait

use crate::core::entity::Entity;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence collaborator for one entity type
///
/// Implementations provide single-record reads and writes; each write is
/// expected to be atomic for that record. Records are never removed, so the
/// trait has no delete.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Insert a new entity
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all entities
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing entity
    ///
    /// Fails if no entity with this id exists.
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;
}
