//! SQLite storage implementation for Budgetary.
//!
//! This crate provides the durable `DocumentStore` using Diesel ORM with SQLite.
//! It contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The single-writer actor that serialises all writes
//! - The `documents` table model and store implementation
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod documents;
pub mod errors;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

pub use documents::SqliteDocumentStore;

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from budgetary-core for convenience
pub use budgetary_core::errors::{DatabaseError, Error, Result};
