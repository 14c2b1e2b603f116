use super::domain::{Gig, GigId};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait GigRepository: Send + Sync {
    /// Every stored gig in a stable order.
    fn list(&self) -> Result<Vec<Gig>, RepositoryError>;
    fn fetch(&self, id: &GigId) -> Result<Option<Gig>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("gig not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
