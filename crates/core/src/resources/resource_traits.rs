use async_trait::async_trait;

use crate::entities::Entity;
use crate::errors::Result;

/// Request-level operations exposed for every entity type.
#[async_trait]
pub trait EntityServiceTrait<E: Entity>: Send + Sync {
    /// Persists a transient entity; rejects one that already has an id.
    async fn create(&self, entity: E) -> Result<E>;

    /// Upserts an entity that carries an id; rejects one without.
    async fn update(&self, entity: E) -> Result<E>;

    fn list(&self) -> Result<Vec<E>>;

    fn get(&self, id: &str) -> Result<Option<E>>;

    async fn delete(&self, id: &str) -> Result<()>;
}
