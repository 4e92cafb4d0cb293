//! Map and fog-of-war use cases.
//!
//! The DM uploads a battle map and reveals it cell by cell. Players only read.

mod load;
mod toggle;
mod upload;

use std::sync::Arc;

use tabletop_domain::{DomainError, MapId};

use crate::entities::AccessError;
use crate::infrastructure::ports::RepoError;

pub use load::LoadMap;
pub use toggle::{FogToggle, ToggleFogCell};
pub use upload::UploadMap;

/// Container for map and fog use cases.
pub struct FogUseCases {
    pub load_map: Arc<LoadMap>,
    pub upload_map: Arc<UploadMap>,
    pub toggle_cell: Arc<ToggleFogCell>,
}

impl FogUseCases {
    pub fn new(
        load_map: Arc<LoadMap>,
        upload_map: Arc<UploadMap>,
        toggle_cell: Arc<ToggleFogCell>,
    ) -> Self {
        Self {
            load_map,
            upload_map,
            toggle_cell,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FogError {
    #[error("Map not found: {0}")]
    MapNotFound(MapId),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("{0}")]
    Domain(#[from] DomainError),
    /// The map or its grid changed since it was read; reload and retry.
    #[error("Map changed concurrently: {0}")]
    Conflict(RepoError),
    #[error("Repository error: {0}")]
    Repo(RepoError),
}

impl From<RepoError> for FogError {
    fn from(err: RepoError) -> Self {
        if err.is_conflict() {
            Self::Conflict(err)
        } else {
            Self::Repo(err)
        }
    }
}

impl FogError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_unauthorized())
    }
}
