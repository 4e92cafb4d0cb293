//! Character aggregate - a player's character in a campaign

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::character_sheet::CharacterSheet;
use crate::encounter::Participant;
use crate::ids::{CampaignId, CharacterId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    id: CharacterId,
    campaign_id: CampaignId,
    player_id: UserId,
    sheet: CharacterSheet,
    created_at: DateTime<Utc>,
}

impl Character {
    pub fn new(
        campaign_id: CampaignId,
        player_id: UserId,
        sheet: CharacterSheet,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            campaign_id,
            player_id,
            sheet,
            created_at: now,
        }
    }

    #[inline]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[inline]
    pub fn campaign_id(&self) -> CampaignId {
        self.campaign_id
    }

    #[inline]
    pub fn player_id(&self) -> UserId {
        self.player_id
    }

    pub fn sheet(&self) -> &CharacterSheet {
        &self.sheet
    }

    pub fn name(&self) -> &str {
        self.sheet.name.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// This character as an encounter participant with the given initiative.
    pub fn as_participant(&self, initiative: i32) -> Participant {
        Participant::new(self.id, initiative).controlled_by(self.player_id)
    }
}
