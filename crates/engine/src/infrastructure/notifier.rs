//! In-process change fan-out over a tokio broadcast channel.

use tokio::sync::broadcast;

use crate::infrastructure::ports::{ChangeNotification, ChangeNotifier, ChangeScope};

/// Broadcasts every notification; subscribers filter by scope.
#[derive(Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<ChangeNotification>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Receive notifications visible in `scope` from now on.
    pub fn subscribe(&self, scope: ChangeScope) -> ScopedSubscription {
        ScopedSubscription {
            scope,
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl ChangeNotifier for BroadcastNotifier {
    fn publish(&self, notification: ChangeNotification) {
        let kind = notification.kind();
        let campaign_id = notification.campaign_id();
        if self.tx.send(notification).is_err() {
            // No subscribers - normal when nobody is connected
            tracing::trace!(kind, campaign_id = %campaign_id, "No subscribers for notification");
        }
    }
}

/// A receiver limited to one scope.
pub struct ScopedSubscription {
    scope: ChangeScope,
    rx: broadcast::Receiver<ChangeNotification>,
}

impl ScopedSubscription {
    pub fn scope(&self) -> ChangeScope {
        self.scope
    }

    /// Next notification in scope, or `None` once the notifier is gone.
    ///
    /// A subscriber that fell behind skips the notifications it missed.
    pub async fn recv(&mut self) -> Option<ChangeNotification> {
        loop {
            match self.rx.recv().await {
                Ok(notification) if notification.is_visible_in(self.scope) => {
                    return Some(notification)
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, scope = ?self.scope, "Subscriber lagged, notifications dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Option<ChangeNotification> {
        loop {
            match self.rx.try_recv() {
                Ok(notification) if notification.is_visible_in(self.scope) => {
                    return Some(notification)
                }
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, scope = ?self.scope, "Subscriber lagged, notifications dropped");
                }
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletop_domain::{CampaignId, MapId, Revision, UserId};

    fn joined(campaign_id: CampaignId) -> ChangeNotification {
        ChangeNotification::MemberJoined {
            campaign_id,
            user_id: UserId::new(),
        }
    }

    #[tokio::test]
    async fn subscribers_only_see_their_campaign() {
        let notifier = BroadcastNotifier::new(16);
        let mine = CampaignId::new();
        let other = CampaignId::new();
        let mut sub = notifier.subscribe(ChangeScope::Campaign(mine));

        notifier.publish(joined(other));
        notifier.publish(joined(mine));

        let received = sub.recv().await.expect("notification");
        assert_eq!(received.campaign_id(), mine);
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test]
    async fn map_subscribers_see_fog_toggles() {
        let notifier = BroadcastNotifier::new(16);
        let campaign_id = CampaignId::new();
        let map_id = MapId::new();
        let mut sub = notifier.subscribe(ChangeScope::Map(map_id));

        notifier.publish(joined(campaign_id));
        notifier.publish(ChangeNotification::FogCellToggled {
            campaign_id,
            map_id,
            row: 0,
            col: 0,
            covered: false,
            revision: Revision::new(2),
        });

        let received = sub.recv().await.expect("notification");
        assert_eq!(received.kind(), "fog_cell_toggled");
    }

    #[tokio::test]
    async fn lagging_subscriber_skips_ahead() {
        let notifier = BroadcastNotifier::new(2);
        let campaign_id = CampaignId::new();
        let mut sub = notifier.subscribe(ChangeScope::Campaign(campaign_id));

        for _ in 0..5 {
            notifier.publish(joined(campaign_id));
        }

        let mut received = 0;
        while sub.try_recv().is_some() {
            received += 1;
        }
        assert_eq!(received, 2);
    }

    #[tokio::test]
    async fn recv_ends_when_notifier_dropped() {
        let notifier = BroadcastNotifier::new(4);
        let mut sub = notifier.subscribe(ChangeScope::Campaign(CampaignId::new()));
        drop(notifier);
        assert!(sub.recv().await.is_none());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let notifier = BroadcastNotifier::new(4);
        notifier.publish(joined(CampaignId::new()));
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
