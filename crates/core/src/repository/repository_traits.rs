use async_trait::async_trait;

use crate::entities::Entity;
use crate::errors::Result;

/// Persistence contract shared by every entity type.
#[async_trait]
pub trait RepositoryTrait<E: Entity>: Send + Sync {
    /// All stored entities, in the store's natural order.
    fn find_all(&self) -> Result<Vec<E>>;

    fn find_by_id(&self, id: &str) -> Result<Option<E>>;

    /// Assigns an identifier to a transient entity, otherwise overwrites the
    /// stored document with the same identifier.
    async fn save(&self, entity: E) -> Result<E>;

    /// Succeeds whether or not the document existed.
    async fn delete_by_id(&self, id: &str) -> Result<()>;
}
