//! Advance turn use case.

use std::sync::Arc;

use tabletop_domain::{ActiveEncounter, CampaignId, DomainError, EncounterState, UserId};

use super::EncounterError;
use crate::entities::Authorization;
use crate::infrastructure::ports::{ChangeNotification, ChangeNotifier, TurnOrderRepo};

/// Moves the active turn to the next participant, wrapping at the end.
///
/// The write is conditional on the revision that was read, so two DMs
/// clicking "next" at once advance exactly one step; the slower one gets
/// `EncounterError::Conflict`.
pub struct AdvanceTurn {
    auth: Arc<Authorization>,
    turns: Arc<dyn TurnOrderRepo>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl AdvanceTurn {
    pub fn new(
        auth: Arc<Authorization>,
        turns: Arc<dyn TurnOrderRepo>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            auth,
            turns,
            notifier,
        }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        requester: UserId,
    ) -> Result<ActiveEncounter, EncounterError> {
        let access = self.auth.access(campaign_id, requester).await?;

        let mut state = EncounterState::from(self.turns.load(campaign_id).await?);
        let expected = state.encounter().map(|e| e.version());

        state.advance(access.is_dm()).inspect_err(|e| {
            tracing::warn!(
                campaign_id = %campaign_id,
                user_id = %requester,
                error = %e,
                "Advance turn rejected"
            );
        })?;
        let encounter = state
            .encounter()
            .cloned()
            .ok_or(DomainError::NoActiveEncounter)?;

        self.turns
            .save(campaign_id, &encounter, expected)
            .await
            .inspect_err(|e| {
                if e.is_conflict() {
                    tracing::warn!(campaign_id = %campaign_id, "Advance turn lost a revision race");
                }
            })?;

        tracing::debug!(
            campaign_id = %campaign_id,
            active = encounter.active.index(),
            revision = %encounter.revision,
            "Turn advanced"
        );

        self.notifier.publish(ChangeNotification::TurnAdvanced {
            campaign_id,
            encounter: encounter.clone(),
        });

        Ok(encounter)
    }
}
