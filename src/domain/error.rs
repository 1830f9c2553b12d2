#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("year {0} out of range (1000-2025)")]
    YearOutOfRange(i32),

    #[error("library is empty")]
    EmptyLibrary,

    #[error("no book titled '{0}'")]
    TitleNotFound(String),
}
