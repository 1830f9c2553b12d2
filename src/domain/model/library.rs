use serde::{Deserialize, Serialize};

use super::book::{AddBookRequest, Book};
use super::stats::LibraryStats;
use crate::domain::error::DomainError;

/// The collection — aggregate root. Insertion order is preserved and titles are
/// not unique; all mutations go through here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Validates and appends. Duplicate titles are allowed.
    pub fn add_book(&mut self, req: AddBookRequest) -> Result<&Book, DomainError> {
        let book = Book::from_request(req)?;
        self.books.push(book);
        Ok(&self.books[self.books.len() - 1])
    }

    /// Removes every book whose title equals `title` exactly and returns how
    /// many were removed.
    pub fn remove_by_title(&mut self, title: &str) -> Result<usize, DomainError> {
        if self.books.is_empty() {
            return Err(DomainError::EmptyLibrary);
        }
        let before = self.books.len();
        self.books.retain(|b| b.title() != title);
        match before - self.books.len() {
            0 => Err(DomainError::TitleNotFound(title.to_string())),
            n => Ok(n),
        }
    }

    /// First book (in collection order) whose title equals `title` exactly.
    pub fn find_by_title(&self, title: &str) -> Result<&Book, DomainError> {
        if self.books.is_empty() {
            return Err(DomainError::EmptyLibrary);
        }
        self.books
            .iter()
            .find(|b| b.title() == title)
            .ok_or_else(|| DomainError::TitleNotFound(title.to_string()))
    }

    /// Distinct titles in first-occurrence order.
    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = Vec::new();
        for book in &self.books {
            if !titles.contains(&book.title()) {
                titles.push(book.title());
            }
        }
        titles
    }

    pub fn stats(&self) -> LibraryStats {
        LibraryStats::compute(&self.books)
    }
}

impl FromIterator<Book> for Library {
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        Self {
            books: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(title: &str, author: &str, read: bool) -> AddBookRequest {
        AddBookRequest {
            title: title.into(),
            author: author.into(),
            year: 1990,
            genre: "Fiction".into(),
            read,
        }
    }

    fn make_library() -> Library {
        let mut lib = Library::new();
        lib.add_book(req("Dune", "Herbert", true)).unwrap();
        lib.add_book(req("Emma", "Austen", false)).unwrap();
        lib.add_book(req("Dune", "Someone Else", false)).unwrap();
        lib
    }

    #[test]
    fn add_appends_in_order() {
        let lib = make_library();
        assert_eq!(lib.len(), 3);
        assert_eq!(lib.books()[1].title(), "Emma");
        assert_eq!(lib.books()[2].author(), "Someone Else");
    }

    #[test]
    fn add_rejects_invalid_without_mutation() {
        let mut lib = make_library();
        let before = lib.clone();
        let result = lib.add_book(req("", "Nobody", true));
        assert_eq!(result, Err(DomainError::MissingField("title")));
        assert_eq!(lib, before);
    }

    #[test]
    fn remove_drops_every_exact_match() {
        let mut lib = make_library();
        assert_eq!(lib.remove_by_title("Dune"), Ok(2));
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.titles(), vec!["Emma"]);
    }

    #[test]
    fn remove_is_exact_match_only() {
        let mut lib = make_library();
        assert_eq!(
            lib.remove_by_title("dune"),
            Err(DomainError::TitleNotFound("dune".into()))
        );
        assert_eq!(
            lib.remove_by_title("Dun"),
            Err(DomainError::TitleNotFound("Dun".into()))
        );
        assert_eq!(lib.len(), 3);
    }

    #[test]
    fn remove_from_empty_library() {
        let mut lib = Library::new();
        assert_eq!(lib.remove_by_title("Dune"), Err(DomainError::EmptyLibrary));
    }

    #[test]
    fn find_returns_first_match() {
        let lib = make_library();
        let found = lib.find_by_title("Dune").unwrap();
        assert_eq!(found.author(), "Herbert");
    }

    #[test]
    fn find_in_empty_library() {
        let lib = Library::new();
        assert_eq!(lib.find_by_title("Dune"), Err(DomainError::EmptyLibrary));
    }

    #[test]
    fn titles_are_distinct_in_first_occurrence_order() {
        let lib = make_library();
        assert_eq!(lib.titles(), vec!["Dune", "Emma"]);
    }

    #[test]
    fn stats_reflect_read_flags() {
        let stats = make_library().stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.read, 1);
        assert!(!stats.is_complete());
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut lib = Library::new();
        lib.add_book(req("Dune", "Herbert", true)).unwrap();
        let json = serde_json::to_value(&lib).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["title"], "Dune");

        let back: Library = serde_json::from_value(json).unwrap();
        assert_eq!(back, lib);
    }
}
