//! Upload map use case.

use std::sync::Arc;

use tabletop_domain::{CampaignId, DomainError, GridDimensions, TabletopMap, UserId};

use super::FogError;
use crate::entities::Authorization;
use crate::infrastructure::ports::{ChangeNotification, ChangeNotifier, ClockPort, MapRepo};

/// Sets the campaign's map image.
///
/// An existing map keeps its id but gets a fresh, fully covered grid of the
/// configured size. Nothing revealed on the previous image survives.
///
/// The write is conditional on the fog revision that was read; if a toggle
/// lands in between, the upload fails with `FogError::Conflict` and the
/// toggle stands.
pub struct UploadMap {
    auth: Arc<Authorization>,
    maps: Arc<dyn MapRepo>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn ClockPort>,
    fog_dimensions: GridDimensions,
}

impl UploadMap {
    pub fn new(
        auth: Arc<Authorization>,
        maps: Arc<dyn MapRepo>,
        notifier: Arc<dyn ChangeNotifier>,
        clock: Arc<dyn ClockPort>,
        fog_dimensions: GridDimensions,
    ) -> Self {
        Self {
            auth,
            maps,
            notifier,
            clock,
            fog_dimensions,
        }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        requester: UserId,
        image_url: &str,
    ) -> Result<TabletopMap, FogError> {
        let access = self.auth.access(campaign_id, requester).await?;
        if !access.is_dm() {
            tracing::warn!(
                campaign_id = %campaign_id,
                user_id = %requester,
                "Non-DM tried to upload a map"
            );
            return Err(DomainError::unauthorized("only the DM can change the map").into());
        }

        let (map, expected) = match self.maps.latest_in_campaign(campaign_id).await? {
            Some(mut map) => {
                let read_at = map.fog_revision();
                map.replace_image(image_url, self.fog_dimensions, access.is_dm())?;
                (map, Some(read_at))
            }
            None => {
                let map = TabletopMap::new(
                    campaign_id,
                    image_url,
                    self.fog_dimensions,
                    self.clock.now(),
                )?;
                (map, None)
            }
        };

        self.maps.save(&map, expected).await.inspect_err(|e| {
            if e.is_conflict() {
                tracing::warn!(map_id = %map.id(), "Map upload lost a revision race");
            }
        })?;

        tracing::info!(
            campaign_id = %campaign_id,
            map_id = %map.id(),
            grid = %map.fog().dimensions(),
            "Map replaced"
        );

        self.notifier
            .publish(ChangeNotification::MapReplaced { map: map.clone() });
        Ok(map)
    }
}
