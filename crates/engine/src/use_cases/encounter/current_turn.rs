//! Current turn query.

use std::sync::Arc;

use serde::Serialize;
use tabletop_domain::{ActiveEncounter, CampaignId, TurnSlot, UserId};

use super::EncounterError;
use crate::entities::Authorization;
use crate::infrastructure::ports::TurnOrderRepo;

/// What a client needs to render the initiative tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTurn {
    pub encounter: Option<ActiveEncounter>,
    pub active: Option<TurnSlot>,
    /// True when the active slot is one of the asking user's characters
    pub is_my_turn: bool,
}

pub struct GetCurrentTurn {
    auth: Arc<Authorization>,
    turns: Arc<dyn TurnOrderRepo>,
}

impl GetCurrentTurn {
    pub fn new(auth: Arc<Authorization>, turns: Arc<dyn TurnOrderRepo>) -> Self {
        Self { auth, turns }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
    ) -> Result<CurrentTurn, EncounterError> {
        self.auth.access(campaign_id, user_id).await?;
        let encounter = self.turns.load(campaign_id).await?;

        let active = encounter.as_ref().and_then(|e| e.active_slot().cloned());
        let is_my_turn = encounter
            .as_ref()
            .is_some_and(|e| e.is_users_turn(user_id));

        Ok(CurrentTurn {
            encounter,
            active,
            is_my_turn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockTurnOrderRepo;
    use crate::test_fixtures::*;
    use tabletop_domain::start_encounter;

    #[tokio::test]
    async fn players_see_their_own_turn() {
        let table = Table::new();
        let roster = vec![table.characters[0].as_participant(15)];
        let stored = ActiveEncounter::begin(start_encounter(roster, true).unwrap());

        let mut turns = MockTurnOrderRepo::new();
        turns
            .expect_load()
            .returning(move |_| Ok(Some(stored.clone())));

        let query = GetCurrentTurn::new(table.auth(), Arc::new(turns));

        let player_view = query
            .execute(table.campaign.id(), table.player)
            .await
            .unwrap();
        assert!(player_view.is_my_turn);
        assert_eq!(
            player_view.active.map(|s| s.participant_id),
            Some(table.characters[0].id().into())
        );

        let dm_view = query.execute(table.campaign.id(), table.dm).await.unwrap();
        assert!(!dm_view.is_my_turn);
    }

    #[tokio::test]
    async fn nobody_has_a_turn_without_encounter() {
        let table = Table::new();
        let mut turns = MockTurnOrderRepo::new();
        turns.expect_load().returning(|_| Ok(None));

        let query = GetCurrentTurn::new(table.auth(), Arc::new(turns));
        let view = query
            .execute(table.campaign.id(), table.player)
            .await
            .unwrap();
        assert_eq!(view.encounter, None);
        assert!(!view.is_my_turn);
    }
}
