//! Core library surface for the Book Collection Manager.
//!
//! The public modules provide an intentionally small API so the `bin` target
//! as well as potential external tooling can reuse the same pieces: the data
//! model, the SQLite-backed store, the preference layer, and the pure
//! filter/sort and CSV engines the views are built from.

pub mod catalog;
pub mod collate;
pub mod cover;
pub mod db;
pub mod error;
pub mod export;
pub mod library;
pub mod models;
pub mod prefs;

/// Convenience re-exports for the persistence layer, typically used to open
/// the embedded SQLite store and preference file at startup.
pub use db::{BookStore, SqliteBookStore};
pub use prefs::{FilePreferenceStore, PreferenceStore, Preferences};

/// The primary domain types other layers manipulate.
pub use models::{
    Book, BookType, ColumnVisibility, Filters, FilterVisibility, ReadStatus, ThemeMode,
};

/// The view-state controller and the two pure engines behind it.
pub use catalog::apply;
pub use error::{CatalogError, Result};
pub use export::to_csv;
pub use library::Library;
