//! Start encounter use case - rolls the campaign's characters into a turn order.

use std::collections::HashMap;
use std::sync::Arc;

use tabletop_domain::{start_encounter, ActiveEncounter, CampaignId, CharacterId, UserId};

use super::EncounterError;
use crate::entities::Authorization;
use crate::infrastructure::ports::{
    ChangeNotification, ChangeNotifier, CharacterRepo, TurnOrderRepo,
};

/// Initiative used for a character nobody entered a roll for.
pub const DEFAULT_INITIATIVE: i32 = 0;

/// Starts (or restarts) the encounter for a campaign.
///
/// Every character in the campaign takes part. Any encounter already stored
/// for the campaign is replaced in a single conditional write against the
/// version that was read; a concurrent write in between yields
/// `EncounterError::Conflict` and leaves the store untouched.
pub struct StartEncounter {
    auth: Arc<Authorization>,
    characters: Arc<dyn CharacterRepo>,
    turns: Arc<dyn TurnOrderRepo>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl StartEncounter {
    pub fn new(
        auth: Arc<Authorization>,
        characters: Arc<dyn CharacterRepo>,
        turns: Arc<dyn TurnOrderRepo>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            auth,
            characters,
            turns,
            notifier,
        }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        requester: UserId,
        initiatives: &HashMap<CharacterId, i32>,
    ) -> Result<ActiveEncounter, EncounterError> {
        let access = self.auth.access(campaign_id, requester).await?;
        let characters = self.characters.list_in_campaign(campaign_id).await?;

        let roster = characters
            .iter()
            .map(|c| {
                let initiative = initiatives
                    .get(&c.id())
                    .copied()
                    .unwrap_or(DEFAULT_INITIATIVE);
                c.as_participant(initiative)
            })
            .collect();

        let order = start_encounter(roster, access.is_dm()).inspect_err(|e| {
            tracing::warn!(
                campaign_id = %campaign_id,
                user_id = %requester,
                error = %e,
                "Start encounter rejected"
            );
        })?;
        let encounter = ActiveEncounter::begin(order);

        let replaced = self.turns.load(campaign_id).await?.map(|e| e.version());
        self.turns
            .save(campaign_id, &encounter, replaced)
            .await
            .inspect_err(|e| {
                if e.is_conflict() {
                    tracing::warn!(campaign_id = %campaign_id, "Start encounter lost a revision race");
                }
            })?;

        tracing::info!(
            campaign_id = %campaign_id,
            encounter_id = %encounter.id,
            participants = encounter.order.len(),
            restarted = replaced.is_some(),
            "Encounter started"
        );

        self.notifier.publish(ChangeNotification::EncounterStarted {
            campaign_id,
            encounter: encounter.clone(),
        });

        Ok(encounter)
    }
}
