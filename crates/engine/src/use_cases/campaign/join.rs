//! Join campaign use case.

use std::sync::Arc;

use tabletop_domain::{Campaign, InviteCode, JoinOutcome, UserId};

use super::CampaignError;
use crate::infrastructure::ports::{CampaignRepo, ChangeNotification, ChangeNotifier};

/// Adds a player to the campaign behind an invite code.
///
/// Joining a campaign one already belongs to succeeds without changes.
pub struct JoinCampaign {
    campaigns: Arc<dyn CampaignRepo>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl JoinCampaign {
    pub fn new(campaigns: Arc<dyn CampaignRepo>, notifier: Arc<dyn ChangeNotifier>) -> Self {
        Self {
            campaigns,
            notifier,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        invite_code: &str,
    ) -> Result<(Campaign, JoinOutcome), CampaignError> {
        let code = InviteCode::parse(invite_code).map_err(|_| CampaignError::InvalidInviteCode)?;
        let mut campaign = self
            .campaigns
            .find_by_invite_code(&code)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, code = %code, "Unknown invite code");
                CampaignError::InvalidInviteCode
            })?;

        let outcome = campaign.join(user_id)?;
        if outcome == JoinOutcome::Joined {
            self.campaigns.save(&campaign).await?;
            tracing::info!(
                campaign_id = %campaign.id(),
                user_id = %user_id,
                "Player joined campaign"
            );
            self.notifier.publish(ChangeNotification::MemberJoined {
                campaign_id: campaign.id(),
                user_id,
            });
        }

        Ok((campaign, outcome))
    }
}
