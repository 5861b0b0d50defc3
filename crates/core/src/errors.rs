//! Core error types for the Budgetary application.
//!
//! This module defines store-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use std::fmt;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the budgeting backend.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] InvalidRequestError),

    #[error("Document could not be (de)serialized: {0}")]
    Serialization(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Store-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for submitted entities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(&'static str),

    /// Both sides of a budget relationship need a store-assigned identifier.
    #[error("Cannot reference a {0} that has not been saved yet")]
    UnpersistedReference(&'static str),
}

/// Which half of the identifier contract a request broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidRequestKind {
    /// A create request already carried an identifier.
    IdExists,
    /// An update request carried no identifier.
    IdNull,
}

impl InvalidRequestKind {
    pub fn error_key(&self) -> &'static str {
        match self {
            InvalidRequestKind::IdExists => "idexists",
            InvalidRequestKind::IdNull => "idnull",
        }
    }
}

impl fmt::Display for InvalidRequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_key())
    }
}

/// Violation of the create/update identifier contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRequestError {
    pub entity_name: &'static str,
    pub kind: InvalidRequestKind,
}

impl InvalidRequestError {
    pub fn id_exists(entity_name: &'static str) -> Self {
        Self {
            entity_name,
            kind: InvalidRequestKind::IdExists,
        }
    }

    pub fn id_null(entity_name: &'static str) -> Self {
        Self {
            entity_name,
            kind: InvalidRequestKind::IdNull,
        }
    }

    pub fn message(&self) -> String {
        match self.kind {
            InvalidRequestKind::IdExists => {
                format!("A new {} cannot already have an ID", self.entity_name)
            }
            InvalidRequestKind::IdNull => "Invalid id".to_string(),
        }
    }
}

impl fmt::Display for InvalidRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for InvalidRequestError {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
