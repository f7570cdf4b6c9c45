//! List command implementation

use anyhow::Result;
use clap::Args;

use book_collection_manager::models::Book;
use book_collection_manager::{Filters, Library, SqliteBookStore};

/// Filter and sort flags shared by `list` and `export`. The text filters
/// take the same comma-joined multi-value strings the pipeline consumes.
#[derive(Args)]
pub struct ViewArgs {
    /// Filter by title (comma-separated terms, substring match)
    #[arg(long)]
    title: Option<String>,

    /// Filter by author (comma-separated terms, substring match)
    #[arg(long)]
    author: Option<String>,

    /// Filter by publisher (comma-separated terms, substring match)
    #[arg(long)]
    publisher: Option<String>,

    /// Filter by genre (comma-separated exact values)
    #[arg(long)]
    genre: Option<String>,

    /// Filter by language (comma-separated exact values)
    #[arg(long)]
    language: Option<String>,

    /// Filter by reading status (comma-separated exact values)
    #[arg(long = "status")]
    read_status: Option<String>,

    /// Filter by book type (comma-separated exact values)
    #[arg(long = "type")]
    book_type: Option<String>,

    /// Only show favorites
    #[arg(long)]
    favorite: bool,

    /// Field to sort by (e.g. title, author, rating, dateOfReading)
    #[arg(long, default_value = "title")]
    pub sort: String,
}

impl ViewArgs {
    pub fn filters(&self) -> Filters {
        Filters {
            title: self.title.clone().unwrap_or_default(),
            author: self.author.clone().unwrap_or_default(),
            publisher: self.publisher.clone().unwrap_or_default(),
            genre: self.genre.clone().unwrap_or_default(),
            language: self.language.clone().unwrap_or_default(),
            read_status: self.read_status.clone().unwrap_or_default(),
            book_type: self.book_type.clone().unwrap_or_default(),
            favorite: self.favorite,
        }
    }
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Print the collection as currently filtered and sorted.
pub fn list(args: ListArgs) -> Result<()> {
    let library = Library::open(SqliteBookStore::open()?)?;
    let books = library.visible(&args.view.filters(), &args.view.sort);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("No books matched.");
        return Ok(());
    }

    for book in &books {
        println!("{}", summary_line(book));
    }
    println!("{} of {} books shown", books.len(), library.books().len());
    Ok(())
}

/// One-line rendering of a record for the terminal.
fn summary_line(book: &Book) -> String {
    let mut line = format!("{:>4}  {}", book.id.unwrap_or_default(), book.title);
    if let Some(author) = book.author.as_deref() {
        line.push_str(&format!(" by {author}"));
    }

    let mut details = vec![book.read_status.as_str().to_string()];
    if let Some(kind) = book.book_type {
        details.push(kind.as_str().to_string());
    }
    if let Some(rating) = book.rating {
        details.push(format!("{rating}/5"));
    }
    line.push_str(&format!("  ({})", details.join(", ")));

    if book.favorite {
        line.push_str("  *");
    }
    line
}
