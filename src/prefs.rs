//! Durable user preferences: which filter controls and table columns are
//! shown, plus the color theme. The backing store is plain string key/value
//! pairs; a typed layer above it handles the JSON payloads. Preference
//! problems never abort the application: a missing or corrupt entry reads
//! as the default, and a failed write is logged and dropped.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::db;
use crate::error::Result;
use crate::models::{ColumnVisibility, FilterVisibility, ThemeMode};

/// Preference key holding the column-visibility JSON document.
pub const COLUMN_VISIBILITY_KEY: &str = "columnVisibility";
/// Preference key holding the filter-visibility JSON document.
pub const FILTER_VISIBILITY_KEY: &str = "filterVisibility";
/// Preference key holding the bare theme name.
pub const THEME_KEY: &str = "theme";

/// File name of the JSON object holding every preference, stored next to the
/// database in the application data directory.
const PREFS_FILE_NAME: &str = "preferences.json";

/// String key/value storage surviving across sessions. `get` answers `None`
/// for an unknown key; `set` persists immediately. Callers treat the store
/// as infallible; implementations absorb and log their own write errors.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Production store: one JSON object in a file. The whole map is read once
/// at open and rewritten on every `set`.
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// Open the store at its default location in the application data
    /// directory, creating the directory if needed.
    pub fn open_default() -> Result<Self> {
        let dir = db::data_dir()?;
        fs::create_dir_all(&dir)?;
        Ok(Self::open(dir.join(PREFS_FILE_NAME)))
    }

    /// Open the store at an explicit path. A missing file is an empty store;
    /// an unreadable or corrupt file is treated the same, with a warning, so
    /// one bad byte does not take the preferences hostage.
    pub fn open(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "preference file corrupt, starting fresh");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "preference file unreadable, starting fresh");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    fn persist(&self) {
        let payload = match serde_json::to_string_pretty(&self.values) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(%err, "could not serialize preferences");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, payload) {
            tracing::warn!(path = %self.path.display(), %err, "could not write preferences");
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }
}

/// Volatile store for tests and one-shot runs.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Typed access to the three persisted preferences over any backing store.
pub struct Preferences<P: PreferenceStore> {
    store: P,
}

impl<P: PreferenceStore> Preferences<P> {
    pub fn new(store: P) -> Self {
        Self { store }
    }

    /// The stored column-visibility map, or the all-visible default when the
    /// key is absent or its payload does not parse.
    pub fn column_visibility(&self) -> ColumnVisibility {
        self.parse_or_default(COLUMN_VISIBILITY_KEY)
    }

    pub fn set_column_visibility(&mut self, columns: &ColumnVisibility) {
        self.store_json(COLUMN_VISIBILITY_KEY, columns);
    }

    /// The stored filter-visibility map, with the same fallback rule.
    pub fn filter_visibility(&self) -> FilterVisibility {
        self.parse_or_default(FILTER_VISIBILITY_KEY)
    }

    pub fn set_filter_visibility(&mut self, filters: &FilterVisibility) {
        self.store_json(FILTER_VISIBILITY_KEY, filters);
    }

    /// The stored theme; anything unrecognized falls back to light.
    pub fn theme(&self) -> ThemeMode {
        match self.store.get(THEME_KEY) {
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(%value, "stored theme unrecognized, using light");
                ThemeMode::Light
            }),
            None => ThemeMode::Light,
        }
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.store.set(THEME_KEY, theme.as_str());
    }

    fn parse_or_default<T>(&self, key: &str) -> T
    where
        T: Default + serde::de::DeserializeOwned,
    {
        let Some(raw) = self.store.get(key) else {
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "stored preference unparseable, using defaults");
                T::default()
            }
        }
    }

    fn store_json<T: serde::Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(payload) => self.store.set(key, &payload),
            Err(err) => tracing::warn!(key, %err, "could not serialize preference"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_keys_read_as_defaults() {
        let prefs = Preferences::new(MemoryPreferenceStore::default());
        assert_eq!(prefs.column_visibility(), ColumnVisibility::default());
        assert_eq!(prefs.filter_visibility(), FilterVisibility::default());
        assert_eq!(prefs.theme(), ThemeMode::Light);
    }

    #[test]
    fn test_visibility_round_trips() {
        let mut prefs = Preferences::new(MemoryPreferenceStore::default());

        let mut columns = ColumnVisibility::default();
        columns.set("rating", false);
        prefs.set_column_visibility(&columns);
        assert_eq!(prefs.column_visibility(), columns);

        let mut filters = FilterVisibility::default();
        filters.set("favorite", false);
        prefs.set_filter_visibility(&filters);
        assert_eq!(prefs.filter_visibility(), filters);
    }

    #[test]
    fn test_corrupt_payload_falls_back_to_defaults() {
        let mut store = MemoryPreferenceStore::default();
        store.set(COLUMN_VISIBILITY_KEY, "{not json");
        store.set(THEME_KEY, "sepia");
        let prefs = Preferences::new(store);
        assert_eq!(prefs.column_visibility(), ColumnVisibility::default());
        assert_eq!(prefs.theme(), ThemeMode::Light);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");

        {
            let mut prefs = Preferences::new(FilePreferenceStore::open(path.clone()));
            prefs.set_theme(ThemeMode::Dark);
            let mut columns = ColumnVisibility::default();
            columns.set("actions", false);
            prefs.set_column_visibility(&columns);
        }

        let prefs = Preferences::new(FilePreferenceStore::open(path));
        assert_eq!(prefs.theme(), ThemeMode::Dark);
        assert!(!prefs.column_visibility().is_visible("actions"));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "]]garbage[[").unwrap();

        let store = FilePreferenceStore::open(path.clone());
        assert_eq!(store.get(THEME_KEY), None);

        // The store is still writable afterwards.
        let mut prefs = Preferences::new(store);
        prefs.set_theme(ThemeMode::Dark);
        let reopened = FilePreferenceStore::open(path);
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("dark"));
    }
}
