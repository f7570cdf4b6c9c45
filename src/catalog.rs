//! The filter/sort pipeline. `apply` is a pure function over the in-memory
//! collection: the caller hands in every book plus the current view-state and
//! gets back the ordered subset to display or export. Nothing here touches
//! the store or mutates its input.

use std::cmp::Ordering;

use crate::collate;
use crate::models::{Book, Filters};

/// Filter and order the collection for display. Field predicates are
/// AND-combined; comma-separated terms inside one field are OR-combined.
/// The sort is stable, so books that compare equal keep their input order.
pub fn apply(books: &[Book], filters: &Filters, sort_key: &str) -> Vec<Book> {
    let mut result: Vec<Book> = books
        .iter()
        .filter(|book| matches(book, filters))
        .cloned()
        .collect();
    result.sort_by(|a, b| compare_by_key(a, b, sort_key));
    result
}

/// Whether a single book satisfies every active filter field.
fn matches(book: &Book, filters: &Filters) -> bool {
    contains_any_term(Some(book.title.as_str()), &filters.title)
        && contains_any_term(book.author.as_deref(), &filters.author)
        && contains_any_term(book.publisher.as_deref(), &filters.publisher)
        && member_of(book.genre.as_deref(), &filters.genre)
        && member_of(Some(book.language.as_str()), &filters.language)
        && member_of(Some(book.read_status.as_str()), &filters.read_status)
        && member_of(book.book_type.map(|t| t.as_str()), &filters.book_type)
        && (!filters.favorite || book.favorite)
}

/// Free-text match: each comma-separated term is trimmed and lowercased, and
/// the attribute matches when it contains any of them as a substring. An
/// empty filter imposes no constraint; an absent attribute never matches a
/// non-empty one.
fn contains_any_term(value: Option<&str>, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    let haystack = value.to_lowercase();
    filter
        .split(',')
        .map(|term| term.trim().to_lowercase())
        .any(|term| haystack.contains(&term))
}

/// Enumerated match: the filter splits into an exact-match set, no trimming
/// or case folding, and the attribute text must be a member.
fn member_of(value: Option<&str>, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    filter.split(',').any(|term| term == value)
}

/// A book attribute lifted into something comparable. Every sort key yields
/// one consistent variant, or `Missing` when the row has no value.
enum SortValue {
    Text(String),
    Number(i64),
    Flag(bool),
    Missing,
}

fn sort_value(book: &Book, key: &str) -> SortValue {
    fn text(value: &Option<String>) -> SortValue {
        match value {
            Some(v) => SortValue::Text(v.clone()),
            None => SortValue::Missing,
        }
    }

    match key {
        "title" => SortValue::Text(book.title.clone()),
        "author" => text(&book.author),
        "genre" => text(&book.genre),
        "publisher" => text(&book.publisher),
        "publishDate" => text(&book.publish_date),
        "dateOfReading" => text(&book.date_of_reading),
        "comment" => text(&book.comment),
        "language" => SortValue::Text(book.language.clone()),
        "readStatus" => SortValue::Text(book.read_status.as_str().to_string()),
        "bookType" => match book.book_type {
            Some(kind) => SortValue::Text(kind.as_str().to_string()),
            None => SortValue::Missing,
        },
        "rating" => match book.rating {
            Some(rating) => SortValue::Number(i64::from(rating)),
            None => SortValue::Missing,
        },
        "favorite" => SortValue::Flag(book.favorite),
        "id" => match book.id {
            Some(id) => SortValue::Number(id),
            None => SortValue::Missing,
        },
        // An unrecognized key compares everything equal, which leaves the
        // input order untouched.
        _ => SortValue::Missing,
    }
}

/// Ordering for one sort key: rows without a value go after every row with
/// one, text uses the locale-aware collation, numbers compare arithmetically
/// and `true` sorts before `false`.
fn compare_by_key(a: &Book, b: &Book, key: &str) -> Ordering {
    match (sort_value(a, key), sort_value(b, key)) {
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, _) => Ordering::Greater,
        (_, SortValue::Missing) => Ordering::Less,
        (SortValue::Text(x), SortValue::Text(y)) => collate::compare(&x, &y),
        (SortValue::Number(x), SortValue::Number(y)) => x.cmp(&y),
        (SortValue::Flag(x), SortValue::Flag(y)) => y.cmp(&x),
        _ => Ordering::Equal,
    }
}
