//! The view-state controller. It owns a cached copy of the collection and
//! funnels every mutation through the same contract: validate first, issue
//! exactly one store call, then reload the whole collection. A failed store
//! call leaves the cache as it was, so the caller never renders a
//! half-applied change.

use crate::catalog;
use crate::db::BookStore;
use crate::error::{CatalogError, Result};
use crate::models::{Book, Filters};

pub struct Library<S: BookStore> {
    store: S,
    books: Vec<Book>,
}

impl<S: BookStore> Library<S> {
    /// Load the full collection from the store.
    pub fn open(store: S) -> Result<Self> {
        let books = store.list_all()?;
        tracing::debug!(count = books.len(), "collection loaded");
        Ok(Self { store, books })
    }

    /// The cached collection, in store order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// The cached record with the given id, if any.
    pub fn get(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|book| book.id == Some(id))
    }

    /// The collection as currently filtered and sorted.
    pub fn visible(&self, filters: &Filters, sort_key: &str) -> Vec<Book> {
        catalog::apply(&self.books, filters, sort_key)
    }

    /// Persist a new draft. The draft must validate and must not carry an id
    /// yet; the id assigned by the store is returned.
    pub fn add(&mut self, book: Book) -> Result<i64> {
        if book.id.is_some() {
            return Err(CatalogError::Validation(
                "a new book must not carry an id".to_string(),
            ));
        }
        book.validate()?;

        let id = self.store.add(&book)?;
        self.reload()?;
        tracing::info!(id, title = %book.title, "book added");
        Ok(id)
    }

    /// Rewrite an existing record in full. The record must validate and must
    /// carry the id it was loaded with.
    pub fn update(&mut self, book: Book) -> Result<i64> {
        let id = book.id.ok_or_else(|| {
            CatalogError::Validation("an id is required to update a book".to_string())
        })?;
        book.validate()?;

        self.store.update(id, &book)?;
        self.reload()?;
        tracing::info!(id, "book updated");
        Ok(id)
    }

    /// Remove a record by id.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.store.delete(id)?;
        self.reload()?;
        tracing::info!(id, "book deleted");
        Ok(())
    }

    /// The favorite shortcut: rewrite the full record with the flag flipped.
    /// Returns the new flag value.
    pub fn toggle_favorite(&mut self, id: i64) -> Result<bool> {
        let mut book = self
            .get(id)
            .cloned()
            .ok_or(CatalogError::BookNotFound(id))?;
        book.favorite = !book.favorite;
        let now_favorite = book.favorite;

        self.store.update(id, &book)?;
        self.reload()?;
        tracing::info!(id, favorite = now_favorite, "favorite toggled");
        Ok(now_favorite)
    }

    fn reload(&mut self) -> Result<()> {
        self.books = self.store.list_all()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadStatus;

    use std::cell::RefCell;

    /// In-memory double that can be switched to fail every mutation.
    struct ScriptedStore {
        books: RefCell<Vec<Book>>,
        next_id: RefCell<i64>,
        fail_writes: bool,
    }

    impl ScriptedStore {
        fn new() -> Self {
            Self {
                books: RefCell::new(Vec::new()),
                next_id: RefCell::new(1),
                fail_writes: false,
            }
        }
    }

    impl BookStore for ScriptedStore {
        fn add(&self, book: &Book) -> Result<i64> {
            if self.fail_writes {
                return Err(CatalogError::Generic("disk on fire".to_string()));
            }
            let mut next_id = self.next_id.borrow_mut();
            let id = *next_id;
            *next_id += 1;
            let mut stored = book.clone();
            stored.id = Some(id);
            self.books.borrow_mut().push(stored);
            Ok(id)
        }

        fn update(&self, id: i64, book: &Book) -> Result<i64> {
            if self.fail_writes {
                return Err(CatalogError::Generic("disk on fire".to_string()));
            }
            let mut books = self.books.borrow_mut();
            let slot = books
                .iter_mut()
                .find(|b| b.id == Some(id))
                .ok_or(CatalogError::BookNotFound(id))?;
            *slot = book.clone();
            slot.id = Some(id);
            Ok(id)
        }

        fn delete(&self, id: i64) -> Result<()> {
            if self.fail_writes {
                return Err(CatalogError::Generic("disk on fire".to_string()));
            }
            let mut books = self.books.borrow_mut();
            let before = books.len();
            books.retain(|b| b.id != Some(id));
            if books.len() == before {
                return Err(CatalogError::BookNotFound(id));
            }
            Ok(())
        }

        fn list_all(&self) -> Result<Vec<Book>> {
            Ok(self.books.borrow().clone())
        }
    }

    #[test]
    fn test_add_assigns_id_and_reloads() {
        let mut library = Library::open(ScriptedStore::new()).unwrap();
        let id = library.add(Book::new("Dune")).unwrap();
        assert_eq!(library.books().len(), 1);
        assert_eq!(library.get(id).unwrap().title, "Dune");
    }

    #[test]
    fn test_add_rejects_invalid_drafts_before_the_store() {
        let mut library = Library::open(ScriptedStore::new()).unwrap();

        let err = library.add(Book::new(" ")).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let mut persisted = Book::new("Dune");
        persisted.id = Some(7);
        let err = library.add(persisted).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        assert!(library.books().is_empty());
    }

    #[test]
    fn test_update_requires_an_id() {
        let mut library = Library::open(ScriptedStore::new()).unwrap();
        let err = library.update(Book::new("Dune")).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn test_update_rewrites_and_reloads() {
        let mut library = Library::open(ScriptedStore::new()).unwrap();
        let id = library.add(Book::new("Dune")).unwrap();

        let mut changed = library.get(id).unwrap().clone();
        changed.read_status = ReadStatus::Read;
        changed.rating = Some(5);
        library.update(changed).unwrap();

        let stored = library.get(id).unwrap();
        assert_eq!(stored.read_status, ReadStatus::Read);
        assert_eq!(stored.rating, Some(5));
    }

    #[test]
    fn test_toggle_favorite_flips_and_persists() {
        let mut library = Library::open(ScriptedStore::new()).unwrap();
        let id = library.add(Book::new("Dune")).unwrap();

        assert!(library.toggle_favorite(id).unwrap());
        assert!(library.get(id).unwrap().favorite);
        assert!(!library.toggle_favorite(id).unwrap());
        assert!(!library.get(id).unwrap().favorite);
    }

    #[test]
    fn test_toggle_favorite_unknown_id() {
        let mut library = Library::open(ScriptedStore::new()).unwrap();
        assert!(matches!(
            library.toggle_favorite(404),
            Err(CatalogError::BookNotFound(404))
        ));
    }

    #[test]
    fn test_failed_store_calls_leave_the_cache_untouched() {
        let mut store = ScriptedStore::new();
        let seeded = store.add(&Book::new("Dune")).unwrap();
        store.fail_writes = true;

        let mut library = Library::open(store).unwrap();
        let before = library.books().to_vec();

        assert!(library.add(Book::new("Cosmos")).is_err());
        assert!(library.delete(seeded).is_err());
        assert!(library.toggle_favorite(seeded).is_err());

        assert_eq!(library.books(), &before[..]);
    }

    #[test]
    fn test_visible_delegates_to_the_pipeline() {
        let mut library = Library::open(ScriptedStore::new()).unwrap();
        library.add(Book::new("Zoo")).unwrap();
        library.add(Book::new("Ant")).unwrap();

        let visible = library.visible(&Filters::default(), "title");
        assert_eq!(visible[0].title, "Ant");

        let filters = Filters {
            title: "zoo".into(),
            ..Filters::default()
        };
        let visible = library.visible(&filters, "title");
        assert_eq!(visible.len(), 1);
    }
}
