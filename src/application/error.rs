use crate::domain::error::DomainError;
use crate::domain::repository::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("library store is corrupt: {0}")]
    CorruptStore(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("render error: {0}")]
    Render(#[source] serde_json::Error),
}

impl AppError {
    pub(crate) fn from_repository<E: RepositoryError>(err: E) -> Self {
        if err.is_corrupt() {
            Self::CorruptStore(Box::new(err))
        } else {
            Self::Storage(Box::new(err))
        }
    }

    /// Recoverable by the user (bad input, empty library, unknown title).
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
