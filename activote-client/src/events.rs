use tokio::sync::broadcast;
use tracing::debug;

/// Notifications about the ledger the client keeps on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    /// The backend accepted a vote; a new block is expected.
    VoteRecorded { voter_id: u64, candidate_id: u64 },
    /// The ledger view was re-fetched and now holds `blocks` entries.
    Refreshed { blocks: usize },
    /// Re-fetching the ledger failed. Not retried.
    RefreshFailed { reason: String },
}

/// Fan-out channel for [`LedgerEvent`]s.
#[derive(Debug, Clone)]
pub struct LedgerBus {
    tx: broadcast::Sender<LedgerEvent>,
}

impl LedgerBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Returns how many subscribers received the event; zero is not an error.
    pub fn publish(&self, event: LedgerEvent) -> usize {
        debug!(?event, "ledger event");
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.tx.subscribe()
    }
}

impl Default for LedgerBus {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let bus = LedgerBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        let event = LedgerEvent::VoteRecorded { voter_id: 1, candidate_id: 2 };
        assert_eq!(bus.publish(event.clone()), 2);
        assert_eq!(a.recv().await.unwrap(), event);
        assert_eq!(b.recv().await.unwrap(), event);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = LedgerBus::new(0);
        assert_eq!(bus.publish(LedgerEvent::Refreshed { blocks: 3 }), 0);
    }
}
