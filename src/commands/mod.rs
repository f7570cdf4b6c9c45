//! Command implementations for the CLI front-end. Each command opens the
//! store, drives the library controller or the engines, and prints a short
//! confirmation; all catalog logic lives in the library crate.

mod book;
mod export;
mod list;
mod prefs;

pub use book::{add, delete, edit, favorite, AddArgs, EditArgs};
pub use export::{export, ExportArgs};
pub use list::{list, ListArgs, ViewArgs};
pub use prefs::{prefs, PrefsCommand};
