//! Domain models that mirror the SQLite schema and get passed throughout the
//! application. These types stay light-weight data holders so the engines and
//! the persistence layer can focus on their own logic. Wire names (serde)
//! keep the historical camelCase spelling so previously exported JSON and
//! stored preference blobs remain readable.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Languages offered by default. The field itself stays a free string so the
/// catalog can grow beyond these without a schema change.
pub const LANGUAGES: &[&str] = &["English", "Ukrainian"];

/// Genres offered by default; same extensibility rule as [`LANGUAGES`].
pub const GENRES: &[&str] = &["Fiction", "Non-Fiction"];

/// Highest rating a book can carry. Ratings are a 0..=5 star scale.
pub const MAX_RATING: u8 = 5;

/// Reading progress for a book. The serialized text is the exact phrase shown
/// to the user ("Did not finish" included) because the database and the CSV
/// export both store that display form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadStatus {
    Read,
    #[default]
    Unread,
    #[serde(rename = "Did not finish")]
    DidNotFinish,
}

impl ReadStatus {
    pub const ALL: &'static [ReadStatus] =
        &[ReadStatus::Read, ReadStatus::Unread, ReadStatus::DidNotFinish];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadStatus::Read => "Read",
            ReadStatus::Unread => "Unread",
            ReadStatus::DidNotFinish => "Did not finish",
        }
    }
}

impl fmt::Display for ReadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadStatus {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Read" => Ok(ReadStatus::Read),
            "Unread" => Ok(ReadStatus::Unread),
            "Did not finish" => Ok(ReadStatus::DidNotFinish),
            other => Err(CatalogError::Validation(format!(
                "unknown reading status: {other:?} (expected Read, Unread or Did not finish)"
            ))),
        }
    }
}

/// Physical form of a book. Optional on a record because rows created before
/// the field existed never had one; new drafts default to `Paper`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookType {
    #[default]
    Paper,
    #[serde(rename = "E-book")]
    Ebook,
    Audiobook,
}

impl BookType {
    pub const ALL: &'static [BookType] = &[BookType::Paper, BookType::Ebook, BookType::Audiobook];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::Paper => "Paper",
            BookType::Ebook => "E-book",
            BookType::Audiobook => "Audiobook",
        }
    }
}

impl fmt::Display for BookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paper" => Ok(BookType::Paper),
            "E-book" => Ok(BookType::Ebook),
            "Audiobook" => Ok(BookType::Audiobook),
            other => Err(CatalogError::Validation(format!(
                "unknown book type: {other:?} (expected Paper, E-book or Audiobook)"
            ))),
        }
    }
}

/// Color scheme preference. Stored as a bare lowercase string under the
/// `theme` preference key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(CatalogError::Validation(format!(
                "unknown theme: {other:?} (expected light or dark)"
            ))),
        }
    }
}

/// The sole domain entity. A draft being composed has `id: None`; the store
/// assigns the id on first insert and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub language: String,
    pub read_status: ReadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_type: Option<BookType>,
    /// Embedded image payload as a `data:` URI, or absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// ISO `YYYY-MM-DD`, or absent when the book has not been read yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_reading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
}

impl Book {
    /// Start a draft with the field defaults new entries get: English,
    /// unread, paper, not a favorite.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: None,
            genre: None,
            language: "English".to_string(),
            read_status: ReadStatus::Unread,
            book_type: Some(BookType::Paper),
            cover_image: None,
            date_of_reading: None,
            rating: None,
            comment: None,
            favorite: false,
            publisher: None,
            publish_date: None,
        }
    }

    /// Check the record against the rules enforced before persistence:
    /// title and language must be non-blank, the rating stays on the 0..=5
    /// scale, and a reading date must be a real ISO calendar date.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::Validation("a title is required".into()));
        }
        if self.language.trim().is_empty() {
            return Err(CatalogError::Validation("a language is required".into()));
        }
        if let Some(rating) = self.rating {
            if rating > MAX_RATING {
                return Err(CatalogError::Validation(format!(
                    "rating must be between 0 and {MAX_RATING}, got {rating}"
                )));
            }
        }
        if let Some(date) = self.date_of_reading.as_deref() {
            if !date.is_empty() && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                return Err(CatalogError::Validation(format!(
                    "date of reading must be YYYY-MM-DD, got {date:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Transient view-state describing the active filters. Text fields hold zero
/// or more comma-joined terms; `favorite` narrows to favorites when set.
/// "Clear filters" resets the whole record to this default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub genre: String,
    pub language: String,
    pub read_status: String,
    pub book_type: String,
    pub favorite: bool,
}

impl Filters {
    /// Reset every constraint, matching the "clear filters" action.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no field imposes a constraint.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Canonical ordering of the displayable columns. The export engine walks
/// this list so CSV columns come out in table order no matter how the
/// visibility record was produced.
pub const COLUMN_ORDER: &[&str] = &[
    "favorite",
    "title",
    "author",
    "publisher",
    "publishDate",
    "genre",
    "language",
    "bookType",
    "readStatus",
    "dateOfReading",
    "rating",
    "actions",
];

/// Persisted preference: which table columns are shown. All twelve keys
/// default to visible. Unknown keys in stored JSON are ignored and missing
/// keys fall back to the default, so older blobs keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnVisibility {
    pub favorite: bool,
    pub title: bool,
    pub author: bool,
    pub publisher: bool,
    pub publish_date: bool,
    pub genre: bool,
    pub language: bool,
    pub book_type: bool,
    pub read_status: bool,
    pub date_of_reading: bool,
    pub rating: bool,
    pub actions: bool,
}

impl Default for ColumnVisibility {
    fn default() -> Self {
        Self {
            favorite: true,
            title: true,
            author: true,
            publisher: true,
            publish_date: true,
            genre: true,
            language: true,
            book_type: true,
            read_status: true,
            date_of_reading: true,
            rating: true,
            actions: true,
        }
    }
}

impl ColumnVisibility {
    /// Look up a flag by its canonical key. Unknown keys read as hidden.
    pub fn is_visible(&self, key: &str) -> bool {
        match key {
            "favorite" => self.favorite,
            "title" => self.title,
            "author" => self.author,
            "publisher" => self.publisher,
            "publishDate" => self.publish_date,
            "genre" => self.genre,
            "language" => self.language,
            "bookType" => self.book_type,
            "readStatus" => self.read_status,
            "dateOfReading" => self.date_of_reading,
            "rating" => self.rating,
            "actions" => self.actions,
            _ => false,
        }
    }

    /// Set a flag by key. Returns false (and changes nothing) for a key that
    /// is not a displayable column.
    pub fn set(&mut self, key: &str, visible: bool) -> bool {
        let slot = match key {
            "favorite" => &mut self.favorite,
            "title" => &mut self.title,
            "author" => &mut self.author,
            "publisher" => &mut self.publisher,
            "publishDate" => &mut self.publish_date,
            "genre" => &mut self.genre,
            "language" => &mut self.language,
            "bookType" => &mut self.book_type,
            "readStatus" => &mut self.read_status,
            "dateOfReading" => &mut self.date_of_reading,
            "rating" => &mut self.rating,
            "actions" => &mut self.actions,
            _ => return false,
        };
        *slot = visible;
        true
    }
}

/// The filter controls a user can hide, in display order.
pub const FILTER_KEYS: &[&str] = &[
    "title",
    "author",
    "publisher",
    "genre",
    "language",
    "readStatus",
    "bookType",
    "favorite",
];

/// Persisted preference: which filter controls are shown. Same lifecycle and
/// fallback rules as [`ColumnVisibility`], over eight keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterVisibility {
    pub title: bool,
    pub author: bool,
    pub publisher: bool,
    pub genre: bool,
    pub language: bool,
    pub read_status: bool,
    pub book_type: bool,
    pub favorite: bool,
}

impl Default for FilterVisibility {
    fn default() -> Self {
        Self {
            title: true,
            author: true,
            publisher: true,
            genre: true,
            language: true,
            read_status: true,
            book_type: true,
            favorite: true,
        }
    }
}

impl FilterVisibility {
    pub fn is_visible(&self, key: &str) -> bool {
        match key {
            "title" => self.title,
            "author" => self.author,
            "publisher" => self.publisher,
            "genre" => self.genre,
            "language" => self.language,
            "readStatus" => self.read_status,
            "bookType" => self.book_type,
            "favorite" => self.favorite,
            _ => false,
        }
    }

    pub fn set(&mut self, key: &str, visible: bool) -> bool {
        let slot = match key {
            "title" => &mut self.title,
            "author" => &mut self.author,
            "publisher" => &mut self.publisher,
            "genre" => &mut self.genre,
            "language" => &mut self.language,
            "readStatus" => &mut self.read_status,
            "bookType" => &mut self.book_type,
            "favorite" => &mut self.favorite,
            _ => return false,
        };
        *slot = visible;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_status_round_trips_through_display_text() {
        for status in ReadStatus::ALL {
            assert_eq!(status.as_str().parse::<ReadStatus>().unwrap(), *status);
        }
        assert!("Finished".parse::<ReadStatus>().is_err());
    }

    #[test]
    fn test_book_type_round_trips_through_display_text() {
        for kind in BookType::ALL {
            assert_eq!(kind.as_str().parse::<BookType>().unwrap(), *kind);
        }
        assert!("Hardcover".parse::<BookType>().is_err());
    }

    #[test]
    fn test_new_draft_defaults() {
        let book = Book::new("Kobzar");
        assert_eq!(book.id, None);
        assert_eq!(book.language, "English");
        assert_eq!(book.read_status, ReadStatus::Unread);
        assert_eq!(book.book_type, Some(BookType::Paper));
        assert!(!book.favorite);
        assert!(book.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_required_fields() {
        let mut book = Book::new("  ");
        assert!(book.validate().is_err());

        book.title = "Kobzar".into();
        book.language = String::new();
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_validate_checks_rating_and_date() {
        let mut book = Book::new("Kobzar");
        book.rating = Some(6);
        assert!(book.validate().is_err());

        book.rating = Some(5);
        book.date_of_reading = Some("2024-13-40".into());
        assert!(book.validate().is_err());

        book.date_of_reading = Some("2024-02-29".into());
        assert!(book.validate().is_ok());
    }

    #[test]
    fn test_book_serializes_with_camel_case_keys() {
        let mut book = Book::new("Kobzar");
        book.read_status = ReadStatus::DidNotFinish;
        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains("\"readStatus\":\"Did not finish\""));
        assert!(json.contains("\"bookType\":\"Paper\""));
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn test_column_visibility_tolerates_partial_json() {
        let parsed: ColumnVisibility = serde_json::from_str(r#"{"rating":false}"#).unwrap();
        assert!(!parsed.is_visible("rating"));
        assert!(parsed.is_visible("title"));
    }

    #[test]
    fn test_visibility_set_rejects_unknown_keys() {
        let mut columns = ColumnVisibility::default();
        assert!(!columns.set("isbn", false));
        assert_eq!(columns, ColumnVisibility::default());

        let mut filters = FilterVisibility::default();
        assert!(filters.set("favorite", false));
        assert!(!filters.is_visible("favorite"));
    }

    #[test]
    fn test_filters_clear_resets_everything() {
        let mut filters = Filters {
            title: "kobzar".into(),
            favorite: true,
            ..Filters::default()
        };
        assert!(!filters.is_empty());
        filters.clear();
        assert!(filters.is_empty());
    }
}
