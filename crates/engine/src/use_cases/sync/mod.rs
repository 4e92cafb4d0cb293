//! Client-side mirror of a campaign's shared state.
//!
//! Each connected client owns one `CampaignMirror`, seeds it from a snapshot
//! and then feeds it notifications. Nothing here is global; two mirrors of
//! the same campaign never share state.

use std::collections::VecDeque;

use tabletop_domain::{
    ActiveEncounter, CampaignId, ChatMessage, DiceRollRecord, EncounterState, FogGrid,
    ParticipantId, TabletopMap, UserId,
};

use crate::infrastructure::notifier::ScopedSubscription;
use crate::infrastructure::ports::ChangeNotification;

/// What applying one notification did to the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Older than what the mirror already holds, or for another campaign
    Ignored,
    /// At least one earlier change was missed; reload the snapshot.
    /// Fog toggles are still applied, turn changes for an unknown encounter
    /// are not.
    NeedsResync,
}

#[derive(Debug, Clone)]
pub struct CampaignMirror {
    campaign_id: CampaignId,
    encounter: EncounterState,
    map: Option<TabletopMap>,
    rolls: VecDeque<DiceRollRecord>,
    chat: VecDeque<ChatMessage>,
    log_capacity: usize,
}

impl CampaignMirror {
    pub fn new(campaign_id: CampaignId, log_capacity: usize) -> Self {
        Self {
            campaign_id,
            encounter: EncounterState::NoEncounter,
            map: None,
            rolls: VecDeque::new(),
            chat: VecDeque::new(),
            log_capacity: log_capacity.max(1),
        }
    }

    /// Replace the mirrored state with a freshly loaded snapshot.
    pub fn seed(&mut self, encounter: Option<ActiveEncounter>, map: Option<TabletopMap>) {
        self.encounter = encounter.into();
        self.map = map;
    }

    pub fn campaign_id(&self) -> CampaignId {
        self.campaign_id
    }

    pub fn encounter(&self) -> &EncounterState {
        &self.encounter
    }

    pub fn map(&self) -> Option<&TabletopMap> {
        self.map.as_ref()
    }

    pub fn fog(&self) -> Option<&FogGrid> {
        self.map.as_ref().map(|m| m.fog())
    }

    /// Newest first.
    pub fn recent_rolls(&self) -> impl Iterator<Item = &DiceRollRecord> {
        self.rolls.iter()
    }

    /// Oldest first.
    pub fn chat(&self) -> impl Iterator<Item = &ChatMessage> {
        self.chat.iter()
    }

    pub fn is_my_turn(&self, user_id: UserId) -> bool {
        self.encounter
            .encounter()
            .is_some_and(|e| e.is_users_turn(user_id))
    }

    pub fn is_participants_turn(&self, participant_id: ParticipantId) -> bool {
        self.encounter.is_participants_turn(participant_id)
    }

    pub fn apply(&mut self, notification: &ChangeNotification) -> ApplyOutcome {
        if notification.campaign_id() != self.campaign_id {
            return ApplyOutcome::Ignored;
        }

        match notification {
            ChangeNotification::EncounterStarted { encounter, .. } => {
                self.encounter = EncounterState::Active(encounter.clone());
                ApplyOutcome::Applied
            }
            ChangeNotification::TurnAdvanced { encounter, .. } => self.apply_turn(encounter),
            ChangeNotification::EncounterEnded { .. } => {
                self.encounter = EncounterState::NoEncounter;
                ApplyOutcome::Applied
            }
            ChangeNotification::MapReplaced { map } => self.apply_map(map),
            ChangeNotification::FogCellToggled {
                map_id,
                row,
                col,
                covered,
                revision,
                ..
            } => {
                let Some(map) = self.map.as_mut().filter(|m| m.id() == *map_id) else {
                    return ApplyOutcome::NeedsResync;
                };
                let current = map.fog_revision();
                if !current.is_superseded_by(*revision) {
                    return ApplyOutcome::Ignored;
                }
                let mut fog = map.fog().clone();
                if fog.is_covered(*row, *col) != Some(*covered) {
                    // The mirrored grid always accepts the DM's edits
                    if fog.toggle_cell(*row, *col, true).is_err() {
                        return ApplyOutcome::NeedsResync;
                    }
                }
                map.set_fog(fog, *revision);
                if current.next() == *revision {
                    ApplyOutcome::Applied
                } else {
                    tracing::debug!(map_id = %map_id, %current, %revision, "Fog revision gap");
                    ApplyOutcome::NeedsResync
                }
            }
            ChangeNotification::DiceRolled { roll } => {
                self.rolls.push_front(roll.clone());
                self.rolls.truncate(self.log_capacity);
                ApplyOutcome::Applied
            }
            ChangeNotification::ChatMessagePosted { message } => {
                self.chat.push_back(message.clone());
                while self.chat.len() > self.log_capacity {
                    self.chat.pop_front();
                }
                ApplyOutcome::Applied
            }
            ChangeNotification::CharacterCreated { .. } | ChangeNotification::MemberJoined { .. } => {
                ApplyOutcome::Applied
            }
        }
    }

    /// Wait for the next notification and apply it. `None` once the
    /// subscription has closed.
    pub async fn apply_next(
        &mut self,
        subscription: &mut ScopedSubscription,
    ) -> Option<ApplyOutcome> {
        let notification = subscription.recv().await?;
        Some(self.apply(&notification))
    }

    fn apply_turn(&mut self, incoming: &ActiveEncounter) -> ApplyOutcome {
        let Some(current) = self.encounter.encounter() else {
            return ApplyOutcome::NeedsResync;
        };
        if current.id != incoming.id {
            tracing::debug!(
                campaign_id = %self.campaign_id,
                current = %current.id,
                incoming = %incoming.id,
                "Turn change for another encounter"
            );
            return ApplyOutcome::NeedsResync;
        }
        if !current.is_superseded_by(incoming) {
            return ApplyOutcome::Ignored;
        }
        self.encounter = EncounterState::Active(incoming.clone());
        ApplyOutcome::Applied
    }

    fn apply_map(&mut self, incoming: &TabletopMap) -> ApplyOutcome {
        if let Some(current) = &self.map {
            if current.id() == incoming.id()
                && !current.fog_revision().is_superseded_by(incoming.fog_revision())
            {
                return ApplyOutcome::Ignored;
            }
        }
        self.map = Some(incoming.clone());
        ApplyOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::*;
    use tabletop_domain::{start_encounter, GridDimensions, MapId, Revision};

    fn started(table: &Table) -> ActiveEncounter {
        let roster = table
            .characters
            .iter()
            .take(2)
            .enumerate()
            .map(|(i, c)| c.as_participant(10 - i as i32))
            .collect();
        ActiveEncounter::begin(start_encounter(roster, true).unwrap())
    }

    fn map(table: &Table) -> TabletopMap {
        TabletopMap::new(
            table.campaign.id(),
            "https://cdn.example/maps/road.png",
            GridDimensions::new(3, 3).unwrap(),
            fixed_time(),
        )
        .unwrap()
    }

    #[test]
    fn follows_encounter_lifecycle() {
        let table = Table::new();
        let campaign_id = table.campaign.id();
        let mut mirror = CampaignMirror::new(campaign_id, 10);
        let mut encounter = started(&table);

        mirror.apply(&ChangeNotification::EncounterStarted {
            campaign_id,
            encounter: encounter.clone(),
        });
        assert!(mirror.is_my_turn(table.player));
        assert!(!mirror.is_my_turn(table.dm));

        encounter.advance(true).unwrap();
        let advanced = ChangeNotification::TurnAdvanced {
            campaign_id,
            encounter: encounter.clone(),
        };
        assert_eq!(mirror.apply(&advanced), ApplyOutcome::Applied);
        assert!(mirror.is_participants_turn(table.characters[1].id().into()));

        // Redelivered notification is stale
        assert_eq!(mirror.apply(&advanced), ApplyOutcome::Ignored);

        mirror.apply(&ChangeNotification::EncounterEnded { campaign_id });
        assert!(!mirror.encounter().is_active());
        assert!(!mirror.is_my_turn(table.player));
    }

    #[test]
    fn late_turn_from_replaced_encounter_is_not_applied() {
        let table = Table::new();
        let campaign_id = table.campaign.id();
        let mut mirror = CampaignMirror::new(campaign_id, 10);

        let mut old = started(&table);
        mirror.apply(&ChangeNotification::EncounterStarted {
            campaign_id,
            encounter: old.clone(),
        });

        let restarted = started(&table);
        assert_eq!(
            mirror.apply(&ChangeNotification::EncounterStarted {
                campaign_id,
                encounter: restarted.clone(),
            }),
            ApplyOutcome::Applied
        );

        // Old encounter's advance arrives after the restart, at a higher revision
        old.advance(true).unwrap();
        let outcome = mirror.apply(&ChangeNotification::TurnAdvanced {
            campaign_id,
            encounter: old,
        });
        assert_eq!(outcome, ApplyOutcome::NeedsResync);
        assert_eq!(mirror.encounter().encounter(), Some(&restarted));
        assert!(mirror.is_participants_turn(table.characters[0].id().into()));
    }

    #[test]
    fn turn_after_end_is_not_applied() {
        let table = Table::new();
        let campaign_id = table.campaign.id();
        let mut mirror = CampaignMirror::new(campaign_id, 10);
        let mut encounter = started(&table);
        mirror.seed(Some(encounter.clone()), None);
        mirror.apply(&ChangeNotification::EncounterEnded { campaign_id });

        encounter.advance(true).unwrap();
        let outcome = mirror.apply(&ChangeNotification::TurnAdvanced {
            campaign_id,
            encounter,
        });
        assert_eq!(outcome, ApplyOutcome::NeedsResync);
        assert!(!mirror.encounter().is_active());
    }

    #[test]
    fn other_campaigns_are_ignored() {
        let table = Table::new();
        let mut mirror = CampaignMirror::new(table.campaign.id(), 10);
        let outcome = mirror.apply(&ChangeNotification::EncounterEnded {
            campaign_id: CampaignId::new(),
        });
        assert_eq!(outcome, ApplyOutcome::Ignored);
    }

    #[test]
    fn fog_toggles_apply_in_revision_order() {
        let table = Table::new();
        let campaign_id = table.campaign.id();
        let map = map(&table);
        let map_id = map.id();
        let mut mirror = CampaignMirror::new(campaign_id, 10);
        mirror.seed(None, Some(map));

        let toggle = |revision: u64, covered: bool| ChangeNotification::FogCellToggled {
            campaign_id,
            map_id,
            row: 1,
            col: 1,
            covered,
            revision: Revision::new(revision),
        };

        assert_eq!(mirror.apply(&toggle(2, false)), ApplyOutcome::Applied);
        assert_eq!(mirror.fog().and_then(|f| f.is_covered(1, 1)), Some(false));

        // Late delivery of an older state
        assert_eq!(mirror.apply(&toggle(2, true)), ApplyOutcome::Ignored);
        assert_eq!(mirror.fog().and_then(|f| f.is_covered(1, 1)), Some(false));

        // Revision 3 was missed
        assert_eq!(mirror.apply(&toggle(4, true)), ApplyOutcome::NeedsResync);
        assert_eq!(mirror.fog().and_then(|f| f.is_covered(1, 1)), Some(true));
    }

    #[test]
    fn toggles_for_unknown_map_ask_for_resync() {
        let table = Table::new();
        let campaign_id = table.campaign.id();
        let mut mirror = CampaignMirror::new(campaign_id, 10);
        let outcome = mirror.apply(&ChangeNotification::FogCellToggled {
            campaign_id,
            map_id: MapId::new(),
            row: 0,
            col: 0,
            covered: false,
            revision: Revision::new(2),
        });
        assert_eq!(outcome, ApplyOutcome::NeedsResync);
    }

    #[test]
    fn replaced_map_swaps_whole_grid() {
        let table = Table::new();
        let mut original = map(&table);
        let mut mirror = CampaignMirror::new(table.campaign.id(), 10);
        mirror.seed(None, Some(original.clone()));

        original
            .replace_image("https://cdn.example/maps/river.png", GridDimensions::default(), true)
            .unwrap();
        let outcome = mirror.apply(&ChangeNotification::MapReplaced {
            map: original.clone(),
        });

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(
            mirror.fog().map(|f| f.dimensions()),
            Some(GridDimensions::default())
        );
    }

    #[test]
    fn roll_log_is_bounded_newest_first() {
        let table = Table::new();
        let campaign_id = table.campaign.id();
        let mut mirror = CampaignMirror::new(campaign_id, 2);
        for face in 1..=3 {
            let result = tabletop_domain::DiceFormula::parse("d6")
                .unwrap()
                .roll_with(|_, _| face);
            let roll = DiceRollRecord::from_result(campaign_id, table.player, &result, fixed_time());
            mirror.apply(&ChangeNotification::DiceRolled { roll });
        }
        let totals: Vec<i32> = mirror.recent_rolls().map(|r| r.result).collect();
        assert_eq!(totals, vec![3, 2]);
    }
}
