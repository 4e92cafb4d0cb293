use std::sync::Arc;

use tabletop_domain::{CampaignId, TabletopMap, UserId};

use super::FogError;
use crate::entities::Authorization;
use crate::infrastructure::ports::MapRepo;

/// The campaign's current map, if one was uploaded.
pub struct LoadMap {
    auth: Arc<Authorization>,
    maps: Arc<dyn MapRepo>,
}

impl LoadMap {
    pub fn new(auth: Arc<Authorization>, maps: Arc<dyn MapRepo>) -> Self {
        Self { auth, maps }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
    ) -> Result<Option<TabletopMap>, FogError> {
        self.auth.access(campaign_id, user_id).await?;
        Ok(self.maps.latest_in_campaign(campaign_id).await?)
    }
}
