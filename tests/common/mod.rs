//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use bookshelf_mcp::application::service::LibraryService;
use bookshelf_mcp::domain::model::book::AddBookRequest;
use bookshelf_mcp::domain::model::library::Library;
use bookshelf_mcp::domain::repository::{LibraryRepository, RepositoryError};

// =============================================================================
// InMemoryRepo — repository without file I/O
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InMemoryError {
    #[error("in-memory store error")]
    Unavailable,
    #[error("in-memory store holds invalid data")]
    Corrupt,
}

impl RepositoryError for InMemoryError {
    fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt)
    }
}

/// Keeps the serialized JSON in memory. `fail_saves` makes every save fail
/// with an I/O-like error.
pub struct InMemoryRepo {
    store: RefCell<Option<String>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            store: RefCell::new(None),
            saves: Cell::new(0),
            fail_saves: Cell::new(false),
        }
    }

    pub fn with_raw(json: &str) -> Self {
        let repo = Self::new();
        *repo.store.borrow_mut() = Some(json.to_string());
        repo
    }

    pub fn stored(&self) -> Option<Library> {
        self.store
            .borrow()
            .as_ref()
            .map(|json| serde_json::from_str(json).unwrap())
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl LibraryRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Option<Library>, Self::Error> {
        match self.store.borrow().as_ref() {
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(|_| InMemoryError::Corrupt),
            None => Ok(None),
        }
    }

    fn save(&self, library: &Library) -> Result<(), Self::Error> {
        if self.fail_saves.get() {
            return Err(InMemoryError::Unavailable);
        }
        let json = serde_json::to_string(library).unwrap();
        *self.store.borrow_mut() = Some(json);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

// =============================================================================
// Request / fixture helpers
// =============================================================================

pub fn book_request(
    title: &str,
    author: &str,
    year: i32,
    genre: &str,
    read: bool,
) -> AddBookRequest {
    AddBookRequest {
        title: title.into(),
        author: author.into(),
        year,
        genre: genre.into(),
        read,
    }
}

/// Standard fixture:
/// ```text
/// 1. Dune            Frank Herbert    1965 Sci-Fi   read
/// 2. Emma            Jane Austen      1815 Romance  unread
/// 3. Neuromancer     William Gibson   1984 Sci-Fi   read
/// 4. Dune            Brian Herbert    2025 Sci-Fi   read
/// ```
pub fn standard_library() -> Library {
    let mut library = Library::new();
    for req in [
        book_request("Dune", "Frank Herbert", 1965, "Sci-Fi", true),
        book_request("Emma", "Jane Austen", 1815, "Romance", false),
        book_request("Neuromancer", "William Gibson", 1984, "Sci-Fi", true),
        book_request("Dune", "Brian Herbert", 2025, "Sci-Fi", true),
    ] {
        library.add_book(req).unwrap();
    }
    library
}

/// Stores `library` in an InMemoryRepo and opens a service over it.
pub fn service_with_library(library: &Library) -> LibraryService<InMemoryRepo> {
    let repo = InMemoryRepo::new();
    repo.save(library).unwrap();
    LibraryService::open(repo).unwrap()
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// Asserts the result is Err and its message contains `expected`.
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
