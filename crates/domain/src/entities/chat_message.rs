//! Campaign chat messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::ids::{CampaignId, ChatMessageId, UserId};

/// Maximum length of a chat message body
pub const MAX_CHAT_MESSAGE_LENGTH: usize = 2000;

/// In-character, out-of-character, or a system notice from the DM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChatMessageKind {
    #[default]
    #[serde(rename = "OOC")]
    Ooc,
    #[serde(rename = "IC")]
    Ic,
    #[serde(rename = "system")]
    System,
}

impl fmt::Display for ChatMessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ooc => write!(f, "OOC"),
            Self::Ic => write!(f, "IC"),
            Self::System => write!(f, "system"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    id: ChatMessageId,
    campaign_id: CampaignId,
    sender_id: UserId,
    #[serde(rename = "type")]
    kind: ChatMessageKind,
    content: String,
    created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message. Content is trimmed.
    ///
    /// # Errors
    ///
    /// - `Validation` for empty or overlong content
    /// - `Unauthorized` for a `System` message from a non-DM
    pub fn new(
        campaign_id: CampaignId,
        sender_id: UserId,
        kind: ChatMessageKind,
        content: impl Into<String>,
        sender_is_dm: bool,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if kind == ChatMessageKind::System && !sender_is_dm {
            return Err(DomainError::unauthorized("only the DM can post system messages"));
        }
        let content = content.into();
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::validation("Message cannot be empty"));
        }
        if content.chars().count() > MAX_CHAT_MESSAGE_LENGTH {
            return Err(DomainError::validation(format!(
                "Message cannot exceed {} characters",
                MAX_CHAT_MESSAGE_LENGTH
            )));
        }
        Ok(Self {
            id: ChatMessageId::new(),
            campaign_id,
            sender_id,
            kind,
            content: content.to_string(),
            created_at: now,
        })
    }

    pub fn id(&self) -> ChatMessageId {
        self.id
    }

    pub fn campaign_id(&self) -> CampaignId {
        self.campaign_id
    }

    pub fn sender_id(&self) -> UserId {
        self.sender_id
    }

    pub fn kind(&self) -> ChatMessageKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
