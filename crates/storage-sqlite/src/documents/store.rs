use budgetary_core::documents::{Document, DocumentStore, DocumentWrite};
use budgetary_core::Result;

use super::model::DocumentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::documents::dsl::*;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel::SqliteConnection;
use log::debug;

use std::sync::Arc;

/// Document store over a single `documents` table keyed by
/// `(collection, id)`.
///
/// Reads use pooled connections; every write goes through the writer actor,
/// so a `put_all` is one immediate transaction.
pub struct SqliteDocumentStore {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteDocumentStore {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SqliteDocumentStore { pool, writer }
    }
}

fn upsert(conn: &mut SqliteConnection, row: &DocumentDB) -> Result<usize> {
    diesel::insert_into(documents)
        .values(row)
        .on_conflict((collection, id))
        .do_update()
        .set((
            body.eq(excluded(body)),
            updated_at.eq(excluded(updated_at)),
        ))
        .execute(conn)
        .into_core()
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    fn get(&self, collection_name: &str, document_id: &str) -> Result<Option<Document>> {
        let mut conn = get_connection(&self.pool)?;
        let row = documents
            .find((collection_name, document_id))
            .select(DocumentDB::as_select())
            .first::<DocumentDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(DocumentDB::into_document).transpose()?)
    }

    fn scan(&self, collection_name: &str) -> Result<Vec<Document>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = documents
            .filter(collection.eq(collection_name))
            .order((created_at.asc(), id.asc()))
            .select(DocumentDB::as_select())
            .load::<DocumentDB>(&mut conn)
            .into_core()?;
        Ok(rows
            .into_iter()
            .map(DocumentDB::into_document)
            .collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn count(&self, collection_name: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let total = documents
            .filter(collection.eq(collection_name))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()?;
        Ok(total as usize)
    }

    async fn put(&self, write: DocumentWrite) -> Result<()> {
        self.put_all(vec![write]).await
    }

    async fn put_all(&self, writes: Vec<DocumentWrite>) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let rows = writes
            .into_iter()
            .map(|write| DocumentDB::from_write(write, &now))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                for row in &rows {
                    debug!("Upserting {} document {}", row.collection, row.id);
                    upsert(conn, row)?;
                }
                Ok(())
            })
            .await
    }

    async fn delete(&self, collection_name: &str, document_id: &str) -> Result<usize> {
        let collection_name = collection_name.to_string();
        let document_id = document_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let key = (collection_name.as_str(), document_id.as_str());
                diesel::delete(documents.find(key))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
