//! End encounter use case.

use std::sync::Arc;

use tabletop_domain::{end_encounter, CampaignId, UserId};

use super::EncounterError;
use crate::entities::Authorization;
use crate::infrastructure::ports::{ChangeNotification, ChangeNotifier, TurnOrderRepo};

/// Clears the campaign's turn order. Ending when nothing is running is a
/// no-op that still notifies, so late clients converge.
pub struct EndEncounter {
    auth: Arc<Authorization>,
    turns: Arc<dyn TurnOrderRepo>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl EndEncounter {
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
    ) -> Result<(), EncounterError> {
        let access = self.auth.access(campaign_id, requester).await?;
        end_encounter(access.is_dm()).inspect_err(|_| {
            tracing::warn!(
                campaign_id = %campaign_id,
                user_id = %requester,
                "Non-DM tried to end the encounter"
            );
        })?;

        self.turns.clear(campaign_id).await?;

        tracing::info!(campaign_id = %campaign_id, "Encounter ended");
        self.notifier
            .publish(ChangeNotification::EncounterEnded { campaign_id });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockChangeNotifier, MockTurnOrderRepo};
    use crate::test_fixtures::*;
    use mockall::predicate::*;

    #[tokio::test]
    async fn dm_clears_and_notifies() {
        let table = Table::new();
        let campaign_id = table.campaign.id();

        let mut turns = MockTurnOrderRepo::new();
        turns
            .expect_clear()
            .with(eq(campaign_id))
            .times(1)
            .returning(|_| Ok(()));
        let mut notifier = MockChangeNotifier::new();
        notifier
            .expect_publish()
            .with(eq(ChangeNotification::EncounterEnded { campaign_id }))
            .times(1)
            .return_const(());

        let use_case = EndEncounter::new(table.auth(), Arc::new(turns), Arc::new(notifier));
        use_case.execute(campaign_id, table.dm).await.unwrap();
    }

    #[tokio::test]
    async fn player_cannot_end() {
        let table = Table::new();
        let use_case = EndEncounter::new(
            table.auth(),
            Arc::new(MockTurnOrderRepo::new()),
            Arc::new(MockChangeNotifier::new()),
        );
        let err = use_case
            .execute(table.campaign.id(), table.player)
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }
}
