//! Preference command implementations

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use book_collection_manager::models::{COLUMN_ORDER, FILTER_KEYS};
use book_collection_manager::{
    ColumnVisibility, FilePreferenceStore, FilterVisibility, Preferences, ThemeMode,
};

#[derive(Subcommand)]
pub enum PrefsCommand {
    /// Print the stored preferences
    Show,

    /// Change which table columns are visible
    Columns(VisibilityArgs),

    /// Change which filter controls are shown
    Filters(VisibilityArgs),

    /// Switch the color theme (light or dark)
    Theme {
        mode: String,
    },
}

#[derive(Args)]
pub struct VisibilityArgs {
    /// Keys to make visible
    #[arg(long, value_name = "KEY")]
    show: Vec<String>,

    /// Keys to hide
    #[arg(long, value_name = "KEY")]
    hide: Vec<String>,

    /// Restore the default (everything visible) before applying changes
    #[arg(long)]
    reset: bool,
}

pub fn prefs(command: PrefsCommand) -> Result<()> {
    let mut prefs = Preferences::new(FilePreferenceStore::open_default()?);

    match command {
        PrefsCommand::Show => {
            println!("Theme:   {}", prefs.theme());
            let columns = prefs.column_visibility();
            println!(
                "Columns: {}",
                describe(COLUMN_ORDER, |key| columns.is_visible(key))
            );
            let filters = prefs.filter_visibility();
            println!(
                "Filters: {}",
                describe(FILTER_KEYS, |key| filters.is_visible(key))
            );
        }
        PrefsCommand::Columns(args) => {
            let mut columns = if args.reset {
                ColumnVisibility::default()
            } else {
                prefs.column_visibility()
            };
            apply_changes(&args, COLUMN_ORDER, "column", |key, visible| {
                columns.set(key, visible)
            })?;
            prefs.set_column_visibility(&columns);
            println!(
                "Columns: {}",
                describe(COLUMN_ORDER, |key| columns.is_visible(key))
            );
        }
        PrefsCommand::Filters(args) => {
            let mut filters = if args.reset {
                FilterVisibility::default()
            } else {
                prefs.filter_visibility()
            };
            apply_changes(&args, FILTER_KEYS, "filter", |key, visible| {
                filters.set(key, visible)
            })?;
            prefs.set_filter_visibility(&filters);
            println!(
                "Filters: {}",
                describe(FILTER_KEYS, |key| filters.is_visible(key))
            );
        }
        PrefsCommand::Theme { mode } => {
            let theme: ThemeMode = mode.parse()?;
            prefs.set_theme(theme);
            println!("Theme set to {theme}");
        }
    }
    Ok(())
}

/// Apply the show/hide lists through `set`, rejecting keys the visibility
/// record does not know.
fn apply_changes(
    args: &VisibilityArgs,
    known: &[&str],
    kind: &str,
    mut set: impl FnMut(&str, bool) -> bool,
) -> Result<()> {
    for (keys, visible) in [(&args.show, true), (&args.hide, false)] {
        for key in keys {
            if !set(key, visible) {
                bail!(
                    "unknown {kind} {key:?} (expected one of: {})",
                    known.join(", ")
                );
            }
        }
    }
    Ok(())
}

/// Human summary of a visibility record: the visible keys, plus the hidden
/// ones in parentheses when there are any.
fn describe(keys: &[&str], is_visible: impl Fn(&str) -> bool) -> String {
    let (visible, hidden): (Vec<&str>, Vec<&str>) =
        keys.iter().copied().partition(|key| is_visible(key));
    if hidden.is_empty() {
        visible.join(", ")
    } else {
        format!("{} (hidden: {})", visible.join(", "), hidden.join(", "))
    }
}
