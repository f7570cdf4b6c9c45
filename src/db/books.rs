use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Row, ToSql};

use super::{connection, BookStore};
use crate::error::{CatalogError, Result};
use crate::models::{Book, BookType, ReadStatus};

/// Enum fields round-trip through their display text so the stored rows stay
/// readable with any SQLite client.
impl ToSql for ReadStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for ReadStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|_| FromSqlError::Other(format!("invalid reading status: {text:?}").into()))
    }
}

impl ToSql for BookType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for BookType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|_| FromSqlError::Other(format!("invalid book type: {text:?}").into()))
    }
}

/// Column list shared by every SELECT so `row_to_book` indexes stay valid.
const BOOK_COLUMNS: &str = "id, title, author, genre, language, read_status, book_type, \
     cover_image, date_of_reading, rating, comment, favorite, publisher, publish_date";

fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        genre: row.get(3)?,
        language: row.get(4)?,
        read_status: row.get(5)?,
        book_type: row.get(6)?,
        cover_image: row.get(7)?,
        date_of_reading: row.get(8)?,
        rating: row.get(9)?,
        comment: row.get(10)?,
        favorite: row.get(11)?,
        publisher: row.get(12)?,
        publish_date: row.get(13)?,
    })
}

/// The production [`BookStore`]: a single `books` table in an embedded
/// SQLite database under the user's home directory.
pub struct SqliteBookStore {
    conn: Connection,
}

impl SqliteBookStore {
    /// Open (and lazily create) the database at its default location.
    pub fn open() -> Result<Self> {
        let conn = connection::ensure_schema()?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection, creating the schema if needed. Tests use
    /// this with `Connection::open_in_memory`.
    pub fn with_connection(conn: Connection) -> Result<Self> {
        connection::apply_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl BookStore for SqliteBookStore {
    fn add(&self, book: &Book) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO books (title, author, genre, language, read_status, book_type,
                 cover_image, date_of_reading, rating, comment, favorite, publisher, publish_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                book.title,
                book.author,
                book.genre,
                book.language,
                book.read_status,
                book.book_type,
                book.cover_image,
                book.date_of_reading,
                book.rating,
                book.comment,
                book.favorite,
                book.publisher,
                book.publish_date,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, title = %book.title, "book inserted");
        Ok(id)
    }

    fn update(&self, id: i64, book: &Book) -> Result<i64> {
        let updated = self.conn.execute(
            "UPDATE books SET title = ?1, author = ?2, genre = ?3, language = ?4,
                 read_status = ?5, book_type = ?6, cover_image = ?7, date_of_reading = ?8,
                 rating = ?9, comment = ?10, favorite = ?11, publisher = ?12, publish_date = ?13
             WHERE id = ?14",
            params![
                book.title,
                book.author,
                book.genre,
                book.language,
                book.read_status,
                book.book_type,
                book.cover_image,
                book.date_of_reading,
                book.rating,
                book.comment,
                book.favorite,
                book.publisher,
                book.publish_date,
                id,
            ],
        )?;

        if updated == 0 {
            return Err(CatalogError::BookNotFound(id));
        }
        tracing::debug!(id, "book updated");
        Ok(id)
    }

    fn delete(&self, id: i64) -> Result<()> {
        let deleted = self.conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;

        if deleted == 0 {
            return Err(CatalogError::BookNotFound(id));
        }
        tracing::debug!(id, "book deleted");
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))?;

        let books = stmt
            .query_map([], row_to_book)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadStatus;

    fn memory_store() -> SqliteBookStore {
        SqliteBookStore::with_connection(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let store = memory_store();
        let first = store.add(&Book::new("Dune")).unwrap();
        let second = store.add(&Book::new("Cosmos")).unwrap();
        assert!(second > first);

        let books = store.list_all().unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, Some(first));
        assert_eq!(books[0].title, "Dune");
    }

    #[test]
    fn test_every_field_round_trips() {
        let store = memory_store();
        let mut book = Book::new("Кобзар");
        book.author = Some("Тарас Шевченко".into());
        book.genre = Some("Fiction".into());
        book.language = "Ukrainian".into();
        book.read_status = ReadStatus::DidNotFinish;
        book.book_type = Some(BookType::Ebook);
        book.cover_image = Some("data:image/png;base64,YWJj".into());
        book.date_of_reading = Some("2024-06-01".into());
        book.rating = Some(4);
        book.comment = Some("re-read, favourite edition".into());
        book.favorite = true;
        book.publisher = Some("Основи".into());
        book.publish_date = Some("1840".into());

        let id = store.add(&book).unwrap();
        let stored = store.list_all().unwrap().pop().unwrap();

        book.id = Some(id);
        assert_eq!(stored, book);
    }

    #[test]
    fn test_update_rewrites_the_full_record() {
        let store = memory_store();
        let id = store.add(&Book::new("Dune")).unwrap();

        let mut changed = Book::new("Dune Messiah");
        changed.rating = Some(3);
        assert_eq!(store.update(id, &changed).unwrap(), id);

        let stored = store.list_all().unwrap().pop().unwrap();
        assert_eq!(stored.title, "Dune Messiah");
        assert_eq!(stored.rating, Some(3));
    }

    #[test]
    fn test_update_and_delete_surface_unknown_ids() {
        let store = memory_store();
        assert!(matches!(
            store.update(42, &Book::new("Dune")),
            Err(CatalogError::BookNotFound(42))
        ));
        assert!(matches!(
            store.delete(42),
            Err(CatalogError::BookNotFound(42))
        ));
    }

    #[test]
    fn test_delete_removes_the_row() {
        let store = memory_store();
        let id = store.add(&Book::new("Dune")).unwrap();
        store.delete(id).unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }
}
