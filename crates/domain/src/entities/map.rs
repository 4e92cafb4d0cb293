//! Tabletop map with its fog-of-war grid

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::fog::{FogGrid, GridDimensions};
use crate::ids::{CampaignId, MapId};
use crate::value_objects::Revision;

/// A battle map image shown to the table, covered by a fog grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabletopMap {
    id: MapId,
    campaign_id: CampaignId,
    image_url: String,
    #[serde(rename = "fogOfWarGrid")]
    fog: FogGrid,
    fog_revision: Revision,
    created_at: DateTime<Utc>,
}

impl TabletopMap {
    /// A new map, fully covered by a default grid.
    pub fn new(
        campaign_id: CampaignId,
        image_url: impl Into<String>,
        dims: GridDimensions,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: MapId::new(),
            campaign_id,
            image_url: validated_url(image_url.into())?,
            fog: FogGrid::create_default(dims),
            fog_revision: Revision::INITIAL,
            created_at: now,
        })
    }

    // Read-only accessors

    pub fn id(&self) -> MapId {
        self.id
    }

    pub fn campaign_id(&self) -> CampaignId {
        self.campaign_id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn fog(&self) -> &FogGrid {
        &self.fog
    }

    pub fn fog_revision(&self) -> Revision {
        self.fog_revision
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Swap the map image. The fog grid is replaced wholesale by a fresh,
    /// fully covered grid; nothing of the old grid is kept.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if the requester is not the DM, `Validation` for a
    /// blank URL. The map is unchanged on error.
    pub fn replace_image(
        &mut self,
        image_url: impl Into<String>,
        dims: GridDimensions,
        requester_is_dm: bool,
    ) -> Result<(), DomainError> {
        if !requester_is_dm {
            return Err(DomainError::unauthorized("only the DM can change the map"));
        }
        self.image_url = validated_url(image_url.into())?;
        self.fog = self.fog.resize(dims);
        self.fog_revision = self.fog_revision.next();
        Ok(())
    }

    /// Toggle one fog cell, bumping the fog revision on success.
    pub fn toggle_fog_cell(
        &mut self,
        row: usize,
        col: usize,
        requester_is_dm: bool,
    ) -> Result<bool, DomainError> {
        let covered = self.fog.toggle_cell(row, col, requester_is_dm)?;
        self.fog_revision = self.fog_revision.next();
        Ok(covered)
    }

    /// Install a fog grid that was persisted or received from another client.
    pub fn set_fog(&mut self, fog: FogGrid, revision: Revision) {
        self.fog = fog;
        self.fog_revision = revision;
    }
}

fn validated_url(url: String) -> Result<String, DomainError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Map image URL cannot be empty"));
    }
    Ok(trimmed.to_string())
}
