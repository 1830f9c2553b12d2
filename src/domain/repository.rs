use super::model::library::Library;

/// Failure raised by a repository implementation.
pub trait RepositoryError: std::error::Error + Send + Sync + 'static {
    /// The backing data exists but could not be decoded.
    fn is_corrupt(&self) -> bool;
}

/// Persistence abstraction, implemented in the infra layer.
/// `save` replaces the stored collection in full.
pub trait LibraryRepository {
    type Error: RepositoryError;

    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Library>, Self::Error>;
    fn save(&self, library: &Library) -> Result<(), Self::Error>;
}
