//! Error types shared across the library. Structured variants let the
//! command layer distinguish bad user input from persistence failures, which
//! matters because a failed store call must leave the in-memory collection
//! untouched while a validation failure never reaches the store at all.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad user input caught before any persistence call is made.
    #[error("{0}")]
    Validation(String),

    #[error("book not found: {0}")]
    BookNotFound(i64),

    /// A cover upload that failed the type or size preconditions.
    #[error("cover image rejected: {0}")]
    CoverRejected(String),

    #[error("{0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
