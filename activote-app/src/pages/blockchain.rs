use std::sync::Arc;

use activote_client::VotingApi;
use tracing::{error, info};

use crate::{components::BlockchainViewer, pages::PageLoad};

pub const BLOCKCHAIN_LOAD_FAILED: &str = "Failed to load blockchain data.";

/// Public ledger explorer. Fetches the chain once per load.
pub struct BlockchainPage {
    api: Arc<dyn VotingApi>,
    viewer: BlockchainViewer,
    error: Option<String>,
}

impl BlockchainPage {
    pub fn new(api: Arc<dyn VotingApi>) -> Self {
        Self { api, viewer: BlockchainViewer::default(), error: None }
    }

    pub async fn load(&mut self) -> PageLoad {
        match self.api.get_blockchain().await {
            Ok(blocks) => {
                info!("Fetched {} blocks", blocks.len());
                self.viewer.replace(blocks);
                self.error = None;
                PageLoad::Ready
            }
            Err(e) => {
                error!("Error fetching blockchain data: {}", e);
                self.error = Some(BLOCKCHAIN_LOAD_FAILED.to_string());
                PageLoad::Failed(BLOCKCHAIN_LOAD_FAILED.to_string())
            }
        }
    }

    pub fn viewer(&self) -> &BlockchainViewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut BlockchainViewer {
        &mut self.viewer
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
