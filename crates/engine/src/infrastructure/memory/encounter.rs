//! In-memory turn order storage.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tabletop_domain::{ActiveEncounter, CampaignId, EncounterVersion};

use crate::infrastructure::ports::{RepoError, TurnOrderRepo};

#[derive(Default)]
pub struct InMemoryTurnOrderRepo {
    encounters: DashMap<CampaignId, ActiveEncounter>,
}

impl InMemoryTurnOrderRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TurnOrderRepo for InMemoryTurnOrderRepo {
    async fn load(&self, campaign_id: CampaignId) -> Result<Option<ActiveEncounter>, RepoError> {
        Ok(self.encounters.get(&campaign_id).map(|e| e.value().clone()))
    }

    async fn save(
        &self,
        campaign_id: CampaignId,
        encounter: &ActiveEncounter,
        expected: Option<EncounterVersion>,
    ) -> Result<(), RepoError> {
        let expected_revision = expected.map(|v| v.revision);
        match self.encounters.entry(campaign_id) {
            Entry::Occupied(mut stored) => {
                let actual = stored.get().version();
                if expected != Some(actual) {
                    return Err(RepoError::conflict(
                        "TurnOrder",
                        expected_revision,
                        Some(actual.revision),
                    ));
                }
                stored.insert(encounter.clone());
            }
            Entry::Vacant(slot) => {
                if expected.is_some() {
                    return Err(RepoError::conflict("TurnOrder", expected_revision, None));
                }
                slot.insert(encounter.clone());
            }
        }
        Ok(())
    }

    async fn clear(&self, campaign_id: CampaignId) -> Result<(), RepoError> {
        self.encounters.remove(&campaign_id);
        Ok(())
    }
}
