use async_trait::async_trait;
use serde_json::Value;

use crate::entities::Entity;
use crate::errors::{Error, Result, ValidationError};

/// A schemaless JSON document as held by the store.
pub type Document = Value;

/// One pending write of a whole document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWrite {
    pub collection: String,
    pub id: String,
    pub body: Document,
}

impl DocumentWrite {
    pub fn new(collection: impl Into<String>, id: impl Into<String>, body: Document) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            body,
        }
    }

    /// Serializes a persisted entity into a write for its own collection.
    pub fn of<E: Entity>(entity: &E) -> Result<Self> {
        let id = entity
            .id()
            .ok_or(Error::Validation(ValidationError::UnpersistedReference(
                E::COLLECTION,
            )))?
            .to_string();
        Ok(Self::new(E::COLLECTION, id, serde_json::to_value(entity)?))
    }
}

/// Documents keyed by `(collection, id)`.
///
/// Reads are synchronous; writes are async so that implementations can
/// funnel them through a single writer.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Every document of a collection in the store's natural order.
    fn scan(&self, collection: &str) -> Result<Vec<Document>>;

    fn count(&self, collection: &str) -> Result<usize>;

    /// Inserts or overwrites a single document.
    async fn put(&self, write: DocumentWrite) -> Result<()>;

    /// Applies every write or none of them.
    async fn put_all(&self, writes: Vec<DocumentWrite>) -> Result<()>;

    /// Removes a document, returning how many were removed (0 or 1).
    async fn delete(&self, collection: &str, id: &str) -> Result<usize>;
}
