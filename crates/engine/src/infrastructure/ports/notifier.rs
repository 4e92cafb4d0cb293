//! Change notification port.
//!
//! Every committed mutation is announced to the other clients of the same
//! campaign. Notifications carry the full post-change state where it is
//! small (turn order, a single fog cell) so receivers never have to re-read.

use serde::{Deserialize, Serialize};
use tabletop_domain::*;

/// What a subscriber listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum ChangeScope {
    Campaign(CampaignId),
    Map(MapId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChangeNotification {
    #[serde(rename_all = "camelCase")]
    EncounterStarted {
        campaign_id: CampaignId,
        encounter: ActiveEncounter,
    },
    #[serde(rename_all = "camelCase")]
    TurnAdvanced {
        campaign_id: CampaignId,
        encounter: ActiveEncounter,
    },
    #[serde(rename_all = "camelCase")]
    EncounterEnded { campaign_id: CampaignId },
    #[serde(rename_all = "camelCase")]
    MapReplaced { map: TabletopMap },
    #[serde(rename_all = "camelCase")]
    FogCellToggled {
        campaign_id: CampaignId,
        map_id: MapId,
        row: usize,
        col: usize,
        covered: bool,
        revision: Revision,
    },
    #[serde(rename_all = "camelCase")]
    DiceRolled { roll: DiceRollRecord },
    #[serde(rename_all = "camelCase")]
    ChatMessagePosted { message: ChatMessage },
    #[serde(rename_all = "camelCase")]
    CharacterCreated {
        campaign_id: CampaignId,
        character_id: CharacterId,
        player_id: UserId,
        name: String,
    },
    #[serde(rename_all = "camelCase")]
    MemberJoined {
        campaign_id: CampaignId,
        user_id: UserId,
    },
}

impl ChangeNotification {
    /// The campaign the change happened in.
    pub fn campaign_id(&self) -> CampaignId {
        match self {
            Self::EncounterStarted { campaign_id, .. }
            | Self::TurnAdvanced { campaign_id, .. }
            | Self::EncounterEnded { campaign_id }
            | Self::FogCellToggled { campaign_id, .. }
            | Self::CharacterCreated { campaign_id, .. }
            | Self::MemberJoined { campaign_id, .. } => *campaign_id,
            Self::MapReplaced { map } => map.campaign_id(),
            Self::DiceRolled { roll } => roll.campaign_id,
            Self::ChatMessagePosted { message } => message.campaign_id(),
        }
    }

    /// The narrowest scope the change belongs to.
    pub fn scope(&self) -> ChangeScope {
        match self {
            Self::FogCellToggled { map_id, .. } => ChangeScope::Map(*map_id),
            other => ChangeScope::Campaign(other.campaign_id()),
        }
    }

    /// Whether a subscriber to `scope` should see this notification.
    ///
    /// Campaign subscribers see everything in the campaign, map subscribers
    /// see that map's fog changes and its replacement.
    pub fn is_visible_in(&self, scope: ChangeScope) -> bool {
        match scope {
            ChangeScope::Campaign(id) => self.campaign_id() == id,
            ChangeScope::Map(id) => match self {
                Self::FogCellToggled { map_id, .. } => *map_id == id,
                Self::MapReplaced { map } => map.id() == id,
                _ => false,
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::EncounterStarted { .. } => "encounter_started",
            Self::TurnAdvanced { .. } => "turn_advanced",
            Self::EncounterEnded { .. } => "encounter_ended",
            Self::MapReplaced { .. } => "map_replaced",
            Self::FogCellToggled { .. } => "fog_cell_toggled",
            Self::DiceRolled { .. } => "dice_rolled",
            Self::ChatMessagePosted { .. } => "chat_message_posted",
            Self::CharacterCreated { .. } => "character_created",
            Self::MemberJoined { .. } => "member_joined",
        }
    }
}

/// Fan-out of committed changes. Publishing never fails the mutation that
/// produced it.
#[cfg_attr(test, mockall::automock)]
pub trait ChangeNotifier: Send + Sync {
    fn publish(&self, notification: ChangeNotification);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fog_toggles_are_map_scoped_but_visible_to_campaign() {
        let campaign_id = CampaignId::new();
        let map_id = MapId::new();
        let toggled = ChangeNotification::FogCellToggled {
            campaign_id,
            map_id,
            row: 1,
            col: 2,
            covered: false,
            revision: Revision::new(2),
        };

        assert_eq!(toggled.scope(), ChangeScope::Map(map_id));
        assert!(toggled.is_visible_in(ChangeScope::Campaign(campaign_id)));
        assert!(toggled.is_visible_in(ChangeScope::Map(map_id)));
        assert!(!toggled.is_visible_in(ChangeScope::Map(MapId::new())));
    }

    #[test]
    fn encounter_changes_are_not_visible_to_map_scope() {
        let ended = ChangeNotification::EncounterEnded {
            campaign_id: CampaignId::new(),
        };
        assert!(!ended.is_visible_in(ChangeScope::Map(MapId::new())));
    }

    #[test]
    fn serializes_with_type_tag() {
        let campaign_id = CampaignId::new();
        let json = serde_json::to_value(ChangeNotification::EncounterEnded { campaign_id })
            .expect("serialize");
        assert_eq!(json["type"], "encounterEnded");
        assert_eq!(json["campaignId"], serde_json::json!(campaign_id));
    }
}
