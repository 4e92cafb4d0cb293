//! In-memory dice and chat logs, appended per campaign.

use std::collections::HashMap;

use async_trait::async_trait;
use tabletop_domain::{CampaignId, ChatMessage, DiceRollRecord};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{ChatRepo, DiceRollRepo, RepoError};

#[derive(Default)]
pub struct InMemoryDiceRollRepo {
    rolls: RwLock<HashMap<CampaignId, Vec<DiceRollRecord>>>,
}

impl InMemoryDiceRollRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiceRollRepo for InMemoryDiceRollRepo {
    async fn save(&self, roll: &DiceRollRecord) -> Result<(), RepoError> {
        self.rolls
            .write()
            .await
            .entry(roll.campaign_id)
            .or_default()
            .push(roll.clone());
        Ok(())
    }

    async fn list_recent(
        &self,
        campaign_id: CampaignId,
        limit: usize,
    ) -> Result<Vec<DiceRollRecord>, RepoError> {
        let rolls = self.rolls.read().await;
        Ok(rolls
            .get(&campaign_id)
            .map(|log| log.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct InMemoryChatRepo {
    messages: RwLock<HashMap<CampaignId, Vec<ChatMessage>>>,
}

impl InMemoryChatRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatRepo for InMemoryChatRepo {
    async fn save(&self, message: &ChatMessage) -> Result<(), RepoError> {
        self.messages
            .write()
            .await
            .entry(message.campaign_id())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn list_recent(
        &self,
        campaign_id: CampaignId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, RepoError> {
        let messages = self.messages.read().await;
        Ok(messages
            .get(&campaign_id)
            .map(|log| log[log.len().saturating_sub(limit)..].to_vec())
            .unwrap_or_default())
    }
}
