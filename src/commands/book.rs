//! Add/edit/delete/favorite command implementations

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use book_collection_manager::cover::CoverUpload;
use book_collection_manager::models::{GENRES, LANGUAGES};
use book_collection_manager::{Book, Library, SqliteBookStore};

#[derive(Args)]
pub struct AddArgs {
    /// Title of the book
    title: String,

    #[arg(long)]
    author: Option<String>,

    #[arg(long)]
    genre: Option<String>,

    /// Language of this edition
    #[arg(long, default_value = "English")]
    language: String,

    /// Reading status: Read, Unread or "Did not finish"
    #[arg(long, default_value = "Unread")]
    status: String,

    /// Book type: Paper, E-book or Audiobook
    #[arg(long = "type", default_value = "Paper")]
    book_type: String,

    #[arg(long)]
    publisher: Option<String>,

    /// Publication date or year
    #[arg(long)]
    published: Option<String>,

    /// Date the book was finished (YYYY-MM-DD)
    #[arg(long)]
    read_on: Option<String>,

    /// Rating from 0 to 5
    #[arg(long)]
    rating: Option<u8>,

    #[arg(long)]
    comment: Option<String>,

    /// Path to a cover image (must be an image under 5MB)
    #[arg(long)]
    cover: Option<PathBuf>,

    /// Mark as favorite right away
    #[arg(long)]
    favorite: bool,
}

/// Create a new record from the flags and persist it.
pub fn add(args: AddArgs) -> Result<()> {
    let mut book = Book::new(args.title);
    book.author = args.author;
    book.genre = args.genre;
    book.language = args.language;
    book.read_status = args.status.parse()?;
    book.book_type = Some(args.book_type.parse()?);
    book.publisher = args.publisher;
    book.publish_date = args.published;
    book.date_of_reading = args.read_on;
    book.rating = args.rating;
    book.comment = args.comment;
    book.favorite = args.favorite;
    if let Some(path) = args.cover {
        let upload = CoverUpload::from_file(&path)
            .with_context(|| format!("failed to read cover image {}", path.display()))?;
        book.cover_image = Some(upload.into_data_uri()?);
    }

    if !LANGUAGES.contains(&book.language.as_str()) {
        println!(
            "Note: {:?} is not a built-in language ({})",
            book.language,
            LANGUAGES.join(", ")
        );
    }
    if let Some(genre) = book.genre.as_deref() {
        if !GENRES.contains(&genre) {
            println!("Note: {:?} is not a built-in genre ({})", genre, GENRES.join(", "));
        }
    }

    let title = book.title.clone();
    let mut library = Library::open(SqliteBookStore::open()?)?;
    let id = library.add(book)?;
    println!("Added {title:?} (id {id})");
    Ok(())
}

#[derive(Args)]
pub struct EditArgs {
    /// Id of the book to change
    id: i64,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    author: Option<String>,

    #[arg(long)]
    genre: Option<String>,

    #[arg(long)]
    language: Option<String>,

    /// Reading status: Read, Unread or "Did not finish"
    #[arg(long)]
    status: Option<String>,

    /// Book type: Paper, E-book or Audiobook
    #[arg(long = "type")]
    book_type: Option<String>,

    #[arg(long)]
    publisher: Option<String>,

    /// Publication date or year
    #[arg(long)]
    published: Option<String>,

    /// Date the book was finished (YYYY-MM-DD)
    #[arg(long)]
    read_on: Option<String>,

    /// Rating from 0 to 5
    #[arg(long)]
    rating: Option<u8>,

    #[arg(long)]
    comment: Option<String>,

    /// Path to a new cover image (must be an image under 5MB)
    #[arg(long)]
    cover: Option<PathBuf>,
}

/// Load a record, apply the provided flags on top, and write it back in
/// full. Flags that were not given leave their field untouched.
pub fn edit(args: EditArgs) -> Result<()> {
    let mut library = Library::open(SqliteBookStore::open()?)?;
    let mut book = library
        .get(args.id)
        .cloned()
        .with_context(|| format!("no book with id {}", args.id))?;

    if let Some(title) = args.title {
        book.title = title;
    }
    if let Some(author) = args.author {
        book.author = Some(author);
    }
    if let Some(genre) = args.genre {
        book.genre = Some(genre);
    }
    if let Some(language) = args.language {
        book.language = language;
    }
    if let Some(status) = args.status {
        book.read_status = status.parse()?;
    }
    if let Some(book_type) = args.book_type {
        book.book_type = Some(book_type.parse()?);
    }
    if let Some(publisher) = args.publisher {
        book.publisher = Some(publisher);
    }
    if let Some(published) = args.published {
        book.publish_date = Some(published);
    }
    if let Some(read_on) = args.read_on {
        book.date_of_reading = Some(read_on);
    }
    if let Some(rating) = args.rating {
        book.rating = Some(rating);
    }
    if let Some(comment) = args.comment {
        book.comment = Some(comment);
    }
    if let Some(path) = args.cover {
        let upload = CoverUpload::from_file(&path)
            .with_context(|| format!("failed to read cover image {}", path.display()))?;
        book.cover_image = Some(upload.into_data_uri()?);
    }

    library.update(book)?;
    println!("Updated book {}", args.id);
    Ok(())
}

/// Remove a record permanently.
pub fn delete(id: i64) -> Result<()> {
    let mut library = Library::open(SqliteBookStore::open()?)?;
    library.delete(id)?;
    println!("Deleted book {id}");
    Ok(())
}

/// Flip the favorite flag.
pub fn favorite(id: i64) -> Result<()> {
    let mut library = Library::open(SqliteBookStore::open()?)?;
    if library.toggle_favorite(id)? {
        println!("Added book {id} to favorites");
    } else {
        println!("Removed book {id} from favorites");
    }
    Ok(())
}
