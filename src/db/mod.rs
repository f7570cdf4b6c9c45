//! Persistence module split across logical submodules.
//!
//! The store is deliberately small: durable CRUD keyed by an
//! auto-incrementing id, with the whole collection re-read after every
//! mutation. It is expressed as a trait so the controller can be exercised
//! against a double without a database on disk.

mod books;
mod connection;

pub use books::SqliteBookStore;
pub use connection::data_dir;

use crate::error::Result;
use crate::models::Book;

/// Durable CRUD over [`Book`] records. Implementations assign the id on
/// insert and surface an unknown id on update/delete as an error.
pub trait BookStore {
    /// Persist a draft and return the id the store assigned to it.
    fn add(&self, book: &Book) -> Result<i64>;

    /// Rewrite the full record stored under `id`; returns the same id.
    fn update(&self, id: i64, book: &Book) -> Result<i64>;

    /// Remove the record stored under `id`.
    fn delete(&self, id: i64) -> Result<()>;

    /// Every record in insertion order.
    fn list_all(&self) -> Result<Vec<Book>>;
}
