//! CSV rendering of the visible collection. The engine only produces text;
//! writing a file, naming it and revealing it are left to the caller. Rows
//! come out in input order, so the caller filters and sorts first.

use crate::models::{Book, ColumnVisibility, COLUMN_ORDER};

/// Column keys that exist only for the on-screen table and are never
/// exported, whatever their visibility says.
const UI_ONLY_COLUMNS: &[&str] = &["actions", "favorite"];

/// Render the collection as CSV: one header line plus one line per book,
/// every line newline-terminated. Included columns are the visible ones in
/// canonical order, minus the UI-only keys.
pub fn to_csv(books: &[Book], columns: &ColumnVisibility) -> String {
    let included: Vec<&str> = COLUMN_ORDER
        .iter()
        .copied()
        .filter(|key| !UI_ONLY_COLUMNS.contains(key))
        .filter(|key| columns.is_visible(key))
        .collect();

    let mut csv = String::new();
    let header: Vec<String> = included.iter().map(|key| header_label(key)).collect();
    csv.push_str(&header.join(","));
    csv.push('\n');

    for book in books {
        let row: Vec<String> = included.iter().map(|key| cell(book, key)).collect();
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

/// Turn a camelCase column key into its space-separated Title Case header,
/// e.g. `publishDate` becomes `Publish Date`.
pub fn header_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 2);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else {
            if ch.is_uppercase() {
                label.push(' ');
            }
            label.push(ch);
        }
    }
    label
}

/// One cell of a data row. Absent values render empty, booleans as Yes/No,
/// a missing rating as 0, and everything else as its plain text.
fn cell(book: &Book, key: &str) -> String {
    match key {
        "title" => escape(&book.title),
        "author" => escape(book.author.as_deref().unwrap_or_default()),
        "publisher" => escape(book.publisher.as_deref().unwrap_or_default()),
        "publishDate" => escape(book.publish_date.as_deref().unwrap_or_default()),
        "genre" => escape(book.genre.as_deref().unwrap_or_default()),
        "language" => escape(&book.language),
        "bookType" => escape(book.book_type.map(|t| t.as_str()).unwrap_or_default()),
        "readStatus" => escape(book.read_status.as_str()),
        "dateOfReading" => escape(book.date_of_reading.as_deref().unwrap_or_default()),
        "rating" => book.rating.unwrap_or(0).to_string(),
        "favorite" => if book.favorite { "Yes" } else { "No" }.to_string(),
        _ => String::new(),
    }
}

/// CSV field quoting: only a value containing a comma gets wrapped in double
/// quotes (internal quotes doubled). Nothing else triggers quoting; embedded
/// newlines and surrounding spaces pass through untouched.
fn escape(value: &str) -> String {
    if value.contains(',') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
