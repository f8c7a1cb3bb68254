use std::{sync::Arc, time::Duration};

use activote_client::{LedgerBus, LedgerEvent, VotingApi};
use tokio::{
    sync::{broadcast::error::RecvError, RwLock},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use crate::components::BlockchainViewer;

/// Shared ledger view, written by the refresher and read by pages.
pub type SharedLedger = Arc<RwLock<BlockchainViewer>>;

/// Keeps `ledger` in sync with the backend after votes.
///
/// Each `VoteRecorded` event waits `settle`, then re-fetches the chain once and
/// answers with `Refreshed` or `RefreshFailed`. The subscription is taken
/// before the task starts so an event published right after this call is not
/// missed. The task holds its own bus handle, so it runs until aborted.
pub fn spawn_ledger_refresher(
    api: Arc<dyn VotingApi>,
    bus: LedgerBus,
    ledger: SharedLedger,
    settle: Duration,
) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            let event = match rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Ledger refresher skipped {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let LedgerEvent::VoteRecorded { voter_id, candidate_id } = event else {
                continue;
            };
            debug!(voter_id, candidate_id, "vote recorded, refreshing ledger");

            if !settle.is_zero() {
                tokio::time::sleep(settle).await;
            }

            match api.get_blockchain().await {
                Ok(blocks) => {
                    let count = blocks.len();
                    ledger.write().await.replace(blocks);
                    info!("Ledger refreshed: {} blocks", count);
                    bus.publish(LedgerEvent::Refreshed { blocks: count });
                }
                Err(e) => {
                    error!("Error fetching blockchain data: {}", e);
                    bus.publish(LedgerEvent::RefreshFailed { reason: e.to_string() });
                }
            }
        }
        debug!("ledger refresher stopped");
    })
}
