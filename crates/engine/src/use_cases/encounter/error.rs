//! Encounter operation errors.

use tabletop_domain::DomainError;

use crate::entities::AccessError;
use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum EncounterError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("{0}")]
    Domain(#[from] DomainError),
    /// Another client changed the turn order first; reload and retry.
    #[error("Turn order changed concurrently: {0}")]
    Conflict(RepoError),
    #[error("Repository error: {0}")]
    Repo(RepoError),
}

impl From<RepoError> for EncounterError {
    fn from(err: RepoError) -> Self {
        if err.is_conflict() {
            Self::Conflict(err)
        } else {
            Self::Repo(err)
        }
    }
}

impl EncounterError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_unauthorized())
    }
}
