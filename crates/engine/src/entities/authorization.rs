//! Authorization entity module.
//!
//! Resolves what a user may do in a campaign. Every mutating use case asks
//! this first and passes the resulting `is_dm` flag into the domain.

use std::sync::Arc;

use tabletop_domain::{Campaign, CampaignId, CampaignRole, UserId};

use crate::infrastructure::ports::{CampaignRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("Campaign not found: {0}")]
    CampaignNotFound(CampaignId),
    #[error("User {user_id} is not a member of campaign {campaign_id}")]
    NotAMember {
        campaign_id: CampaignId,
        user_id: UserId,
    },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// A user's standing in a campaign, with the campaign it was resolved from.
#[derive(Debug, Clone)]
pub struct CampaignAccess {
    pub campaign: Campaign,
    pub role: CampaignRole,
}

impl CampaignAccess {
    pub fn is_dm(&self) -> bool {
        self.role.is_dm()
    }
}

/// Authorization entity - answers role questions for a campaign.
pub struct Authorization {
    campaigns: Arc<dyn CampaignRepo>,
}

impl Authorization {
    pub fn new(campaigns: Arc<dyn CampaignRepo>) -> Self {
        Self { campaigns }
    }

    /// The user's role: `Dm` for the campaign's DM, `Player` for a member.
    pub async fn role(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
    ) -> Result<CampaignRole, AccessError> {
        Ok(self.access(campaign_id, user_id).await?.role)
    }

    /// Load the campaign and resolve the user's role in it.
    pub async fn access(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
    ) -> Result<CampaignAccess, AccessError> {
        let campaign = self
            .campaigns
            .get(campaign_id)
            .await?
            .ok_or(AccessError::CampaignNotFound(campaign_id))?;

        match campaign.role_of(user_id) {
            Some(role) => Ok(CampaignAccess { campaign, role }),
            None => {
                tracing::warn!(
                    campaign_id = %campaign_id,
                    user_id = %user_id,
                    "Rejected request from non-member"
                );
                Err(AccessError::NotAMember {
                    campaign_id,
                    user_id,
                })
            }
        }
    }
}
