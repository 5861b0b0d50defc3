use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::repository_traits::RepositoryTrait;
use crate::documents::{new_document_id, Document, DocumentStore, DocumentWrite};
use crate::entities::Entity;
use crate::errors::{Error, Result};

/// `RepositoryTrait` for any entity, backed by its collection in a
/// `DocumentStore`.
pub struct DocumentRepository<E> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> DocumentRepository<E> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        DocumentRepository {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

fn decode<E: Entity>(document: Document) -> Result<E> {
    serde_json::from_value(document).map_err(|e| {
        Error::Serialization(format!("invalid {} document: {}", E::COLLECTION, e))
    })
}

#[async_trait]
impl<E: Entity> RepositoryTrait<E> for DocumentRepository<E> {
    fn find_all(&self) -> Result<Vec<E>> {
        debug!("Loading all {} documents", E::COLLECTION);
        self.store
            .scan(E::COLLECTION)?
            .into_iter()
            .map(decode::<E>)
            .collect()
    }

    fn find_by_id(&self, id: &str) -> Result<Option<E>> {
        debug!("Loading {} {}", E::COLLECTION, id);
        self.store
            .get(E::COLLECTION, id)?
            .map(decode::<E>)
            .transpose()
    }

    async fn save(&self, mut entity: E) -> Result<E> {
        if !entity.is_persisted() {
            entity.set_id(new_document_id());
        }
        let write = DocumentWrite::of(&entity)?;
        debug!("Saving {} {}", E::COLLECTION, write.id);
        self.store.put(write).await?;
        Ok(entity)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let removed = self.store.delete(E::COLLECTION, id).await?;
        debug!("Deleted {} {} ({} removed)", E::COLLECTION, id, removed);
        Ok(())
    }
}
