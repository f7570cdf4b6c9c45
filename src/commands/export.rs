//! Export command implementation

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use book_collection_manager::{
    to_csv, FilePreferenceStore, Library, Preferences, SqliteBookStore,
};

use super::ViewArgs;

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Destination file
    #[arg(short, long, default_value = "books.csv")]
    output: PathBuf,

    /// Reveal the exported file with the system handler
    #[arg(long)]
    open: bool,
}

/// Write the filtered, sorted collection as CSV, honoring the stored
/// column-visibility preferences.
pub fn export(args: ExportArgs) -> Result<()> {
    let library = Library::open(SqliteBookStore::open()?)?;
    let prefs = Preferences::new(FilePreferenceStore::open_default()?);

    let books = library.visible(&args.view.filters(), &args.view.sort);
    let csv = to_csv(&books, &prefs.column_visibility());

    fs::write(&args.output, csv)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Exported {} books to {}", books.len(), args.output.display());

    if args.open {
        open::that(&args.output)
            .with_context(|| format!("failed to open {}", args.output.display()))?;
    }
    Ok(())
}
