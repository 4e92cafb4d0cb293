//! Common test helpers: a seeded table with a DM, a player and characters.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tabletop_domain::{
    AbilityScores, Campaign, CampaignName, Character, CampaignId, CharacterSheet, InviteCode,
    NewCharacterSheet, UserId,
};

use crate::entities::Authorization;
use crate::infrastructure::ports::MockCampaignRepo;

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 19, 30, 0).unwrap()
}

pub fn sheet(name: &str) -> NewCharacterSheet {
    NewCharacterSheet {
        name: name.to_string(),
        race: "Half-Orc".to_string(),
        class: "Barbarian".to_string(),
        ability_scores: AbilityScores::default(),
        background: Some("Outlander".to_string()),
        alignment: None,
    }
}

pub fn character(campaign_id: CampaignId, player: UserId, name: &str) -> Character {
    let sheet = CharacterSheet::from_new(sheet(name)).unwrap();
    Character::new(campaign_id, player, sheet, fixed_time())
}

/// A campaign run by `dm` with `player` joined and four of the player's
/// characters.
pub struct Table {
    pub dm: UserId,
    pub player: UserId,
    pub campaign: Campaign,
    pub characters: Vec<Character>,
}

impl Table {
    pub fn new() -> Self {
        let dm = UserId::new();
        let player = UserId::new();
        let mut campaign = Campaign::new(
            dm,
            CampaignName::new("Lost Mine of Phandelver").unwrap(),
            InviteCode::parse("PHAN01").unwrap(),
            fixed_time(),
        );
        campaign.join(player).unwrap();
        let characters = ["Ash", "Bram", "Cora", "Dain"]
            .iter()
            .map(|name| character(campaign.id(), player, name))
            .collect();
        Self {
            dm,
            player,
            campaign,
            characters,
        }
    }

    /// Campaign repo mock that serves this table's campaign for any id.
    pub fn campaign_repo(&self) -> MockCampaignRepo {
        let campaign = self.campaign.clone();
        let mut repo = MockCampaignRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(campaign.clone())));
        repo
    }

    pub fn auth(&self) -> Arc<Authorization> {
        Arc::new(Authorization::new(Arc::new(self.campaign_repo())))
    }
}
