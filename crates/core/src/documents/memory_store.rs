use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use super::document_traits::{Document, DocumentStore, DocumentWrite};
use crate::errors::{DatabaseError, Error, Result};

type Collections = HashMap<String, BTreeMap<String, Document>>;

/// Process-local document store. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<Collections>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Collections) -> T) -> Result<T> {
        let guard = self.collections.read().map_err(|_| poisoned())?;
        Ok(f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Collections) -> T) -> Result<T> {
        let mut guard = self.collections.write().map_err(|_| poisoned())?;
        Ok(f(&mut guard))
    }
}

fn poisoned() -> Error {
    Error::Database(DatabaseError::Internal(
        "in-memory document store lock poisoned".to_string(),
    ))
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.read(|collections| {
            collections
                .get(collection)
                .and_then(|documents| documents.get(id))
                .cloned()
        })
    }

    fn scan(&self, collection: &str) -> Result<Vec<Document>> {
        self.read(|collections| {
            collections
                .get(collection)
                .map(|documents| documents.values().cloned().collect())
                .unwrap_or_default()
        })
    }

    fn count(&self, collection: &str) -> Result<usize> {
        self.read(|collections| collections.get(collection).map_or(0, BTreeMap::len))
    }

    async fn put(&self, write: DocumentWrite) -> Result<()> {
        self.put_all(vec![write]).await
    }

    async fn put_all(&self, writes: Vec<DocumentWrite>) -> Result<()> {
        // One write-lock section, so readers see all of the writes or none.
        self.write(|collections| {
            for write in writes {
                collections
                    .entry(write.collection)
                    .or_default()
                    .insert(write.id, write.body);
            }
        })
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<usize> {
        self.write(|collections| {
            collections
                .get_mut(collection)
                .and_then(|documents| documents.remove(id))
                .map_or(0, |_| 1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn put_then_get_and_scan() {
        let store = InMemoryDocumentStore::new();
        store
            .put(DocumentWrite::new("income", "a", json!({"id": "a", "amount": 1.0})))
            .await
            .unwrap();

        assert_eq!(
            store.get("income", "a").unwrap(),
            Some(json!({"id": "a", "amount": 1.0}))
        );
        assert_eq!(store.get("income", "b").unwrap(), None);
        assert_eq!(store.get("outcome", "a").unwrap(), None);
        assert_eq!(store.scan("income").unwrap().len(), 1);
        assert!(store.scan("budget").unwrap().is_empty());
    }

    #[tokio::test]
    async fn put_overwrites_existing_document() {
        let store = InMemoryDocumentStore::new();
        store
            .put(DocumentWrite::new("income", "a", json!({"amount": 1.0})))
            .await
            .unwrap();
        store
            .put(DocumentWrite::new("income", "a", json!({"amount": 2.0})))
            .await
            .unwrap();

        assert_eq!(store.count("income").unwrap(), 1);
        assert_eq!(
            store.get("income", "a").unwrap(),
            Some(json!({"amount": 2.0}))
        );
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryDocumentStore::new();
        store
            .put(DocumentWrite::new("budget", "b", json!({"title": "Home"})))
            .await
            .unwrap();

        assert_eq!(store.delete("budget", "b").await.unwrap(), 1);
        assert_eq!(store.delete("budget", "b").await.unwrap(), 0);
        assert_eq!(store.delete("nowhere", "b").await.unwrap(), 0);
        assert_eq!(store.count("budget").unwrap(), 0);
    }

    #[tokio::test]
    async fn put_all_spans_collections() {
        let store = InMemoryDocumentStore::new();
        store
            .put_all(vec![
                DocumentWrite::new("budget", "b", json!({"incomes": [{"id": "i"}]})),
                DocumentWrite::new("income", "i", json!({"budget": {"id": "b"}})),
            ])
            .await
            .unwrap();

        assert_eq!(store.count("budget").unwrap(), 1);
        assert_eq!(store.count("income").unwrap(), 1);
    }
}
