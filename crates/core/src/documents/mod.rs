//! Document store abstraction.
//!
//! The domain only needs "documents keyed by string id, per collection,
//! with get / put / delete / scan". Durable implementations live in the
//! storage crates; an in-memory one is provided here.

mod document_traits;
mod memory_store;

pub use document_traits::{Document, DocumentStore, DocumentWrite};
pub use memory_store::InMemoryDocumentStore;

use uuid::Uuid;

/// Fresh identifier for a document that has never been saved.
pub fn new_document_id() -> String {
    Uuid::new_v4().to_string()
}
