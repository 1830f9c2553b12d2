use tracing::{debug, info, warn};

use crate::domain::error::DomainError;
use crate::domain::model::book::{AddBookRequest, Book};
use crate::domain::model::library::Library;
use crate::domain::model::stats::LibraryStats;
use crate::domain::repository::LibraryRepository;

use super::error::AppError;

/// Command handlers over the collection.
///
/// Owns the in-memory library, loaded once by [`LibraryService::open`]. Every
/// mutation is applied to a working copy, persisted, and only then committed,
/// so a failed save leaves both memory and file at the previous state.
pub struct LibraryService<R: LibraryRepository> {
    repo: R,
    library: Library,
}

impl<R: LibraryRepository> LibraryService<R> {
    /// Loads the stored library. A missing store yields an empty library, a
    /// corrupt one fails with [`AppError::CorruptStore`].
    pub fn open(repo: R) -> Result<Self, AppError> {
        let library = repo
            .load()
            .map_err(AppError::from_repository)?
            .unwrap_or_default();
        debug!(books = library.len(), "library loaded");
        Ok(Self { repo, library })
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn books(&self) -> &[Book] {
        self.library.books()
    }

    pub fn add_book(&mut self, req: AddBookRequest) -> Result<Book, AppError> {
        let mut next = self.library.clone();
        let book = next.add_book(req).map_err(rejected)?.clone();
        self.commit(next)?;
        info!(title = book.title(), "book added");
        Ok(book)
    }

    /// Removes all books titled `title`; returns the number removed.
    pub fn remove_book(&mut self, title: &str) -> Result<usize, AppError> {
        let mut next = self.library.clone();
        let removed = next.remove_by_title(title).map_err(rejected)?;
        self.commit(next)?;
        info!(title, removed, "book removed");
        Ok(removed)
    }

    pub fn search_book(&self, title: &str) -> Result<&Book, AppError> {
        self.library.find_by_title(title).map_err(rejected)
    }

    pub fn stats(&self) -> LibraryStats {
        self.library.stats()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.library.titles()
    }

    /// Writes the current library unconditionally (used at shutdown).
    pub fn flush(&self) -> Result<(), AppError> {
        self.persist(&self.library)
    }

    // --- private ---

    fn commit(&mut self, next: Library) -> Result<(), AppError> {
        self.persist(&next)?;
        self.library = next;
        Ok(())
    }

    fn persist(&self, library: &Library) -> Result<(), AppError> {
        self.repo
            .save(library)
            .map_err(AppError::from_repository)?;
        debug!(books = library.len(), "library saved");
        Ok(())
    }
}

fn rejected(err: DomainError) -> AppError {
    warn!(%err, "command rejected");
    AppError::Domain(err)
}
