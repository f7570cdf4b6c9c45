//! Command-line front-end for the book collection manager. The binary only
//! parses flags, wires up logging, and dispatches into the command modules;
//! everything domain-shaped lives in the library crate.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "book-collection-manager")]
#[command(author, version, about = "Catalog the books you own and read", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book to the collection
    Add(commands::AddArgs),

    /// Edit an existing book by id
    Edit(commands::EditArgs),

    /// Delete a book by id
    Delete {
        id: i64,
    },

    /// Toggle the favorite flag on a book
    Favorite {
        id: i64,
    },

    /// List the collection with optional filters and sorting
    List(commands::ListArgs),

    /// Export the filtered collection to CSV
    Export(commands::ExportArgs),

    /// Show or change stored preferences
    #[command(subcommand)]
    Prefs(commands::PrefsCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "book_collection_manager=debug"
    } else {
        "book_collection_manager=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Add(args) => commands::add(args),
        Commands::Edit(args) => commands::edit(args),
        Commands::Delete { id } => commands::delete(id),
        Commands::Favorite { id } => commands::favorite(id),
        Commands::List(args) => commands::list(args),
        Commands::Export(args) => commands::export(args),
        Commands::Prefs(command) => commands::prefs(command),
    }
}
