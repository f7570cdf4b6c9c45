use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use rusqlite::Connection;

use crate::error::{CatalogError, Result};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-collection-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "books.sqlite";

/// Resolve the application data directory inside the user's home. The
/// preference file lives here too, next to the database.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| CatalogError::Generic("could not locate home directory".to_string()))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Ensure the database file exists, run lazy migrations, and return a live
/// connection.
pub(crate) fn ensure_schema() -> Result<Connection> {
    let db_path = data_dir()?.join(DB_FILE_NAME);

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(&db_path)?;
    apply_schema(&conn)?;
    Ok(conn)
}

/// Create the schema idempotently on any connection. Split out so tests can
/// run against an in-memory database.
pub(crate) fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT,
            genre TEXT,
            language TEXT NOT NULL,
            read_status TEXT NOT NULL,
            book_type TEXT,
            cover_image TEXT,
            date_of_reading TEXT,
            rating INTEGER,
            comment TEXT,
            favorite INTEGER NOT NULL DEFAULT 0,
            publisher TEXT,
            publish_date TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_books_title ON books(title);
        CREATE INDEX IF NOT EXISTS idx_books_author ON books(author);
        CREATE INDEX IF NOT EXISTS idx_books_genre ON books(genre);
        CREATE INDEX IF NOT EXISTS idx_books_language ON books(language);
        CREATE INDEX IF NOT EXISTS idx_books_read_status ON books(read_status);
        CREATE INDEX IF NOT EXISTS idx_books_favorite ON books(favorite);",
    )?;
    Ok(())
}
