//! Recorded dice rolls shown in a campaign's roll log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CampaignId, DiceRollId, UserId};
use crate::value_objects::DiceRollResult;

/// One roll made at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollRecord {
    pub id: DiceRollId,
    pub campaign_id: CampaignId,
    pub player_id: UserId,
    /// Formula as rolled, e.g. "2d6+3"
    pub roll_type: String,
    pub result: i32,
    /// Individual die faces
    #[serde(default)]
    pub rolls: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

impl DiceRollRecord {
    pub fn from_result(
        campaign_id: CampaignId,
        player_id: UserId,
        result: &DiceRollResult,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: DiceRollId::new(),
            campaign_id,
            player_id,
            roll_type: result.formula.to_string(),
            result: result.total,
            rolls: result.individual_rolls.clone(),
            created_at: now,
        }
    }
}
