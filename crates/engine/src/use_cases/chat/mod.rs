//! Chat use cases.

use std::sync::Arc;

use tabletop_domain::{CampaignId, ChatMessage, ChatMessageKind, DomainError, UserId};

use crate::entities::{AccessError, Authorization};
use crate::infrastructure::ports::{
    ChangeNotification, ChangeNotifier, ChatRepo, ClockPort, RepoError,
};

/// Container for chat use cases.
pub struct ChatUseCases {
    pub post: Arc<PostChatMessage>,
    pub history: Arc<RecentMessages>,
}

impl ChatUseCases {
    pub fn new(post: Arc<PostChatMessage>, history: Arc<RecentMessages>) -> Self {
        Self { post, history }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("{0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct PostChatMessage {
    auth: Arc<Authorization>,
    messages: Arc<dyn ChatRepo>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn ClockPort>,
}

impl PostChatMessage {
    pub fn new(
        auth: Arc<Authorization>,
        messages: Arc<dyn ChatRepo>,
        notifier: Arc<dyn ChangeNotifier>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            auth,
            messages,
            notifier,
            clock,
        }
    }

    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        sender_id: UserId,
        kind: ChatMessageKind,
        content: &str,
    ) -> Result<ChatMessage, ChatError> {
        let access = self.auth.access(campaign_id, sender_id).await?;
        let message = ChatMessage::new(
            campaign_id,
            sender_id,
            kind,
            content,
            access.is_dm(),
            self.clock.now(),
        )
        .inspect_err(|e| {
            if e.is_unauthorized() {
                tracing::warn!(
                    campaign_id = %campaign_id,
                    user_id = %sender_id,
                    "Non-DM tried to post a system message"
                );
            }
        })?;
        self.messages.save(&message).await?;

        tracing::debug!(campaign_id = %campaign_id, kind = %kind, "Chat message posted");
        self.notifier.publish(ChangeNotification::ChatMessagePosted {
            message: message.clone(),
        });
        Ok(message)
    }
}

/// The campaign's latest chat messages, oldest first.
pub struct RecentMessages {
    auth: Arc<Authorization>,
    messages: Arc<dyn ChatRepo>,
    default_limit: usize,
}

impl RecentMessages {
    pub fn new(auth: Arc<Authorization>, messages: Arc<dyn ChatRepo>, default_limit: usize) -> Self {
        Self {
            auth,
            messages,
            default_limit,
        }
    }

    /// `limit` defaults to the configured history size and never exceeds it.
    pub async fn execute(
        &self,
        campaign_id: CampaignId,
        user_id: UserId,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        self.auth.access(campaign_id, user_id).await?;
        let limit = limit.map_or(self.default_limit, |l| l.min(self.default_limit));
        Ok(self.messages.list_recent(campaign_id, limit).await?)
    }
}
