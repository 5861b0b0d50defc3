//! Database models for stored documents.

use budgetary_core::documents::{Document, DocumentWrite};
use diesel::prelude::*;

use crate::errors::StorageError;

/// Database row holding one JSON document
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentDB {
    pub collection: String,
    pub id: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DocumentDB {
    /// Builds the row for a pending write, stamped with `now` on both
    /// timestamps. An upsert keeps the original `created_at`.
    pub fn from_write(write: DocumentWrite, now: &str) -> Result<Self, StorageError> {
        Ok(Self {
            body: serde_json::to_string(&write.body)?,
            collection: write.collection,
            id: write.id,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        })
    }

    pub fn into_document(self) -> Result<Document, StorageError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
