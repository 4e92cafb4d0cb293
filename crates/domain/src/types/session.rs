//! Session-related domain types
//!
//! Types related to user roles in a campaign.

use serde::{Deserialize, Serialize};

/// Role of a user in a campaign.
///
/// Only the DM may run encounters, edit the fog of war, or post system
/// messages. Players create characters, roll dice, and chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CampaignRole {
    /// Dungeon Master - owns the campaign, full control
    Dm,
    /// Player - controls one or more characters
    Player,
}

impl CampaignRole {
    /// Check if this role is DM
    pub fn is_dm(&self) -> bool {
        matches!(self, CampaignRole::Dm)
    }

    /// Check if this role is Player
    pub fn is_player(&self) -> bool {
        matches!(self, CampaignRole::Player)
    }
}

impl std::fmt::Display for CampaignRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignRole::Dm => write!(f, "DM"),
            CampaignRole::Player => write!(f, "Player"),
        }
    }
}
