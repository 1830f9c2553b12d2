use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Earliest publication year accepted on add.
pub const MIN_YEAR: i32 = 1000;
/// Latest publication year accepted on add.
pub const MAX_YEAR: i32 = 2025;

/// Add request as collected by the presentation layer. Text fields must not be
/// blank; they are stored exactly as given.
#[derive(Debug, Clone)]
pub struct AddBookRequest {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
    pub read: bool,
}

/// A single entry of the collection, persisted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    year: i32,
    genre: String,
    read: bool,
}

impl Book {
    /// Validates the request and builds the record.
    pub fn from_request(req: AddBookRequest) -> Result<Self, DomainError> {
        let title = required("title", &req.title)?;
        let author = required("author", &req.author)?;
        let genre = required("genre", &req.genre)?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&req.year) {
            return Err(DomainError::YearOutOfRange(req.year));
        }

        Ok(Self {
            title,
            author,
            year: req.year,
            genre,
            read: req.read,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn is_read(&self) -> bool {
        self.read
    }
}

fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(value.to_string())
}
