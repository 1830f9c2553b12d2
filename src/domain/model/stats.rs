use super::book::Book;

/// Summary figures shown by the View Library command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LibraryStats {
    pub total: usize,
    pub read: usize,
    /// 0.0 for an empty library.
    pub read_percentage: f64,
}

impl LibraryStats {
    pub fn compute(books: &[Book]) -> Self {
        let total = books.len();
        let read = books.iter().filter(|b| b.is_read()).count();
        let read_percentage = if total > 0 {
            read as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            read,
            read_percentage,
        }
    }

    /// Every book has been read. Never true for an empty library.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.read == self.total
    }
}
