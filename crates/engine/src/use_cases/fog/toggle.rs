//! Toggle fog cell use case.

use std::sync::Arc;

use serde::Serialize;
use tabletop_domain::{MapId, Revision, UserId};

use super::FogError;
use crate::entities::Authorization;
use crate::infrastructure::ports::{ChangeNotification, ChangeNotifier, MapRepo};

/// Outcome of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FogToggle {
    pub map_id: MapId,
    pub row: usize,
    pub col: usize,
    pub covered: bool,
    pub revision: Revision,
}

/// Flips one cell of a map's fog grid.
///
/// The grid is written back against the revision that was read, so a toggle
/// racing another toggle or an image replacement fails with
/// `FogError::Conflict` instead of overwriting it.
pub struct ToggleFogCell {
    auth: Arc<Authorization>,
    maps: Arc<dyn MapRepo>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl ToggleFogCell {
    pub fn new(
        auth: Arc<Authorization>,
        maps: Arc<dyn MapRepo>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            auth,
            maps,
            notifier,
        }
    }

    pub async fn execute(
        &self,
        map_id: MapId,
        requester: UserId,
        row: usize,
        col: usize,
    ) -> Result<FogToggle, FogError> {
        let map = self
            .maps
            .get(map_id)
            .await?
            .ok_or(FogError::MapNotFound(map_id))?;
        let campaign_id = map.campaign_id();
        let access = self.auth.access(campaign_id, requester).await?;

        let (mut grid, revision) = self
            .maps
            .load_fog_grid(map_id)
            .await?
            .ok_or(FogError::MapNotFound(map_id))?;

        let covered = grid
            .toggle_cell(row, col, access.is_dm())
            .inspect_err(|e| {
                tracing::warn!(
                    map_id = %map_id,
                    user_id = %requester,
                    row,
                    col,
                    error = %e,
                    "Fog toggle rejected"
                );
            })?;

        let revision = self.maps.save_fog_grid(map_id, &grid, revision).await?;

        tracing::debug!(map_id = %map_id, row, col, covered, revision = %revision, "Fog cell toggled");

        self.notifier.publish(ChangeNotification::FogCellToggled {
            campaign_id,
            map_id,
            row,
            col,
            covered,
            revision,
        });

        Ok(FogToggle {
            map_id,
            row,
            col,
            covered,
            revision,
        })
    }
}
