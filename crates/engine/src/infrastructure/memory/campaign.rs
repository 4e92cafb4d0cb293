//! In-memory campaign and character storage.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tabletop_domain::{Campaign, CampaignId, Character, CharacterId, InviteCode, UserId};

use crate::infrastructure::ports::{CampaignRepo, CharacterRepo, RepoError};

#[derive(Default)]
pub struct InMemoryCampaignRepo {
    campaigns: DashMap<CampaignId, Campaign>,
}

impl InMemoryCampaignRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CampaignRepo for InMemoryCampaignRepo {
    async fn get(&self, id: CampaignId) -> Result<Option<Campaign>, RepoError> {
        Ok(self.campaigns.get(&id).map(|c| c.value().clone()))
    }

    async fn find_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> Result<Option<Campaign>, RepoError> {
        Ok(self
            .campaigns
            .iter()
            .find(|c| c.invite_code() == code)
            .map(|c| c.value().clone()))
    }

    async fn save(&self, campaign: &Campaign) -> Result<(), RepoError> {
        self.campaigns.insert(campaign.id(), campaign.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Campaign>, RepoError> {
        let mut campaigns: Vec<Campaign> = self
            .campaigns
            .iter()
            .filter(|c| c.is_member(user_id))
            .map(|c| c.value().clone())
            .collect();
        campaigns.sort_by_key(|c| c.created_at());
        Ok(campaigns)
    }
}

/// Characters keep the sequence number of their first save so the roster
/// comes back in creation order.
#[derive(Default)]
pub struct InMemoryCharacterRepo {
    characters: DashMap<CharacterId, (u64, Character)>,
    sequence: AtomicU64,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        Ok(self.characters.get(&id).map(|c| c.value().1.clone()))
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        self.characters
            .entry(character.id())
            .and_modify(|(_, stored)| *stored = character.clone())
            .or_insert_with(|| {
                let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
                (seq, character.clone())
            });
        Ok(())
    }

    async fn list_in_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<Character>, RepoError> {
        let mut roster: Vec<(u64, Character)> = self
            .characters
            .iter()
            .filter(|c| c.value().1.campaign_id() == campaign_id)
            .map(|c| c.value().clone())
            .collect();
        roster.sort_by_key(|(seq, _)| *seq);
        Ok(roster.into_iter().map(|(_, c)| c).collect())
    }
}
