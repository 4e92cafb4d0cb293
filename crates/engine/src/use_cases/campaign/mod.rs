//! Campaign use cases.
//!
//! Creating a campaign, joining one by invite code, and listing the
//! campaigns a user belongs to.

mod create;
mod join;

use std::sync::Arc;

use tabletop_domain::{Campaign, DomainError, UserId};

use crate::infrastructure::ports::{CampaignRepo, RepoError};

pub use create::{CreateCampaign, MAX_INVITE_CODE_ATTEMPTS};
pub use join::JoinCampaign;

/// Container for campaign use cases.
pub struct CampaignUseCases {
    pub create: Arc<CreateCampaign>,
    pub join: Arc<JoinCampaign>,
    pub list: Arc<ListCampaigns>,
}

impl CampaignUseCases {
    pub fn new(
        create: Arc<CreateCampaign>,
        join: Arc<JoinCampaign>,
        list: Arc<ListCampaigns>,
    ) -> Self {
        Self { create, join, list }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("Invalid invite code")]
    InvalidInviteCode,
    #[error("Could not allocate a unique invite code")]
    InviteCodeExhausted,
    #[error("{0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Campaigns the user runs or plays in, oldest first.
pub struct ListCampaigns {
    campaigns: Arc<dyn CampaignRepo>,
}

impl ListCampaigns {
    pub fn new(campaigns: Arc<dyn CampaignRepo>) -> Self {
        Self { campaigns }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<Vec<Campaign>, CampaignError> {
        Ok(self.campaigns.list_for_user(user_id).await?)
    }
}
