use serde::Serialize;

use crate::domain::model::book::Book;
use crate::domain::model::stats::LibraryStats;

use super::error::AppError;

/// Output format for read-only views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Markdown,
    Json,
}

pub const COMPLETION_MESSAGE: &str =
    "Congratulations! You have read all the books in your library!";

/// JSON view of the statistics, including the completion flag.
#[derive(Debug, Clone, Serialize)]
pub struct StatsView {
    pub total: usize,
    pub read: usize,
    /// Two decimal places, as displayed.
    pub read_percentage: String,
    pub complete: bool,
}

impl From<&LibraryStats> for StatsView {
    fn from(stats: &LibraryStats) -> Self {
        Self {
            total: stats.total,
            read: stats.read,
            read_percentage: format!("{:.2}", stats.read_percentage),
            complete: stats.is_complete(),
        }
    }
}

/// Search / View results → display text.
pub struct Renderer;

impl Renderer {
    pub fn book_markdown(book: &Book) -> String {
        let mut buf = String::new();
        buf.push_str(&format!("## {}\n\n", book.title()));
        buf.push_str(&format!("- Author: {}\n", book.author()));
        buf.push_str(&format!("- Year: {}\n", book.year()));
        buf.push_str(&format!("- Genre: {}\n", book.genre()));
        buf.push_str(&format!("- Read: {}\n", yes_no(book.is_read())));
        buf
    }

    pub fn stats_markdown(stats: &LibraryStats) -> String {
        let mut buf = String::from("# Library Statistics\n\n");
        buf.push_str(&format!("- Total books: {}\n", stats.total));
        buf.push_str(&format!("- Books read: {}\n", stats.read));
        buf.push_str(&format!(
            "- Percentage read: {:.2}%\n",
            stats.read_percentage
        ));
        if stats.is_complete() {
            buf.push_str(&format!("\n{COMPLETION_MESSAGE}\n"));
        }
        buf
    }

    pub fn titles_markdown(titles: &[&str]) -> String {
        let mut buf = format!("# Titles ({})\n\n", titles.len());
        for (i, title) in titles.iter().enumerate() {
            buf.push_str(&format!("{}. {}\n", i + 1, title));
        }
        buf
    }

    pub fn book(book: &Book, format: RenderFormat) -> Result<String, AppError> {
        match format {
            RenderFormat::Markdown => Ok(Self::book_markdown(book)),
            RenderFormat::Json => to_json(book),
        }
    }

    pub fn stats(stats: &LibraryStats, format: RenderFormat) -> Result<String, AppError> {
        match format {
            RenderFormat::Markdown => Ok(Self::stats_markdown(stats)),
            RenderFormat::Json => to_json(&StatsView::from(stats)),
        }
    }
}

fn yes_no(read: bool) -> &'static str {
    if read {
        "Yes"
    } else {
        "No"
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(AppError::Render)
}
