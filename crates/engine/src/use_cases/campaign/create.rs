//! Create campaign use case.

use std::sync::Arc;

use tabletop_domain::{Campaign, CampaignName, InviteCode, UserId};

use super::CampaignError;
use crate::infrastructure::ports::{CampaignRepo, ClockPort, RandomPort};

/// Codes drawn before giving up on finding an unused one.
pub const MAX_INVITE_CODE_ATTEMPTS: usize = 8;

/// Creates a campaign owned by `dm` with a fresh invite code.
pub struct CreateCampaign {
    campaigns: Arc<dyn CampaignRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl CreateCampaign {
    pub fn new(
        campaigns: Arc<dyn CampaignRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            campaigns,
            clock,
            random,
        }
    }

    pub async fn execute(&self, dm: UserId, name: &str) -> Result<Campaign, CampaignError> {
        let name = CampaignName::new(name)?;
        let invite_code = self.unused_invite_code().await?;

        let campaign = Campaign::new(dm, name, invite_code, self.clock.now());
        self.campaigns.save(&campaign).await?;

        tracing::info!(
            campaign_id = %campaign.id(),
            dm_id = %dm,
            invite_code = %campaign.invite_code(),
            "Campaign created"
        );
        Ok(campaign)
    }

    async fn unused_invite_code(&self) -> Result<InviteCode, CampaignError> {
        for attempt in 1..=MAX_INVITE_CODE_ATTEMPTS {
            let code = InviteCode::generate(|min, max| self.random.gen_range(min, max));
            if self.campaigns.find_by_invite_code(&code).await?.is_none() {
                return Ok(code);
            }
            tracing::debug!(attempt, code = %code, "Invite code already taken");
        }
        tracing::warn!(
            attempts = MAX_INVITE_CODE_ATTEMPTS,
            "Gave up looking for an unused invite code"
        );
        Err(CampaignError::InviteCodeExhausted)
    }
}
