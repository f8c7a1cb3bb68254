use activote_common::{utils::format_timestamp, Block};

/// Number of blocks visible at once.
pub const BLOCKS_TO_SHOW: usize = 7;

/// How a block relates to the one before it in the fetched list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    /// First entry of the list; nothing to compare against.
    Genesis,
    Linked,
    /// `previousHash` does not match the preceding entry's `hash`.
    Broken,
}

/// Detail panel for one selected block. Fields are shown as received.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDetail<'a> {
    pub block: &'a Block,
    /// Zero-based position in the fetched list.
    pub position: usize,
    pub timestamp: String,
    pub linkage: Linkage,
}

/// Sliding window over an already-fetched list of blocks.
#[derive(Debug, Clone)]
pub struct BlockchainViewer {
    blocks: Vec<Block>,
    start: usize,
    window: usize,
    selected: Option<u64>,
}

impl Default for BlockchainViewer {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl BlockchainViewer {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self::with_window(blocks, BLOCKS_TO_SHOW)
    }

    pub fn with_window(blocks: Vec<Block>, window: usize) -> Self {
        Self { blocks, start: 0, window: window.max(1), selected: None }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end index of the visible window.
    pub fn end(&self) -> usize {
        (self.start + self.window).min(self.blocks.len())
    }

    pub fn visible(&self) -> &[Block] {
        &self.blocks[self.start.min(self.blocks.len())..self.end()]
    }

    pub fn can_prev(&self) -> bool {
        self.start > 0
    }

    pub fn can_next(&self) -> bool {
        self.start + self.window < self.blocks.len()
    }

    /// Shifts the window one block forward. Returns false at the end.
    pub fn next(&mut self) -> bool {
        if self.can_next() {
            self.start += 1;
            true
        } else {
            false
        }
    }

    /// Shifts the window one block back. Returns false at the beginning.
    pub fn prev(&mut self) -> bool {
        if self.can_prev() {
            self.start -= 1;
            true
        } else {
            false
        }
    }

    /// Moves the window so it starts at `start`, clamped to the last full window.
    pub fn jump_to(&mut self, start: usize) {
        let last = self.blocks.len().saturating_sub(self.window);
        self.start = start.min(last);
    }

    pub fn caption(&self) -> String {
        if self.blocks.is_empty() {
            return "No blocks recorded yet".to_string();
        }
        format!(
            "Showing blocks {} - {} of {}",
            self.start + 1,
            self.end(),
            self.blocks.len()
        )
    }

    /// Opens the detail panel for the block with `block_id`.
    pub fn select(&mut self, block_id: u64) -> Option<BlockDetail<'_>> {
        if self.blocks.iter().any(|b| b.id == block_id) {
            self.selected = Some(block_id);
            self.detail()
        } else {
            None
        }
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn detail(&self) -> Option<BlockDetail<'_>> {
        let id = self.selected?;
        let position = self.blocks.iter().position(|b| b.id == id)?;
        let block = &self.blocks[position];
        let linkage = match position.checked_sub(1).map(|p| &self.blocks[p]) {
            None => Linkage::Genesis,
            Some(parent) if block.links_to(parent) => Linkage::Linked,
            Some(_) => Linkage::Broken,
        };
        Some(BlockDetail {
            block,
            position,
            timestamp: format_timestamp(block.timestamp.as_ref()),
            linkage,
        })
    }

    /// Swaps in a freshly fetched list, keeping the window in range. The open
    /// detail panel survives when its block is still present.
    pub fn replace(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
        self.jump_to(self.start);
        if let Some(id) = self.selected {
            if !self.blocks.iter().any(|b| b.id == id) {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: u64) -> Vec<Block> {
        (1..=n)
            .map(|id| Block {
                id,
                hash: format!("h{}", id),
                previous_hash: if id == 1 { "0".into() } else { format!("h{}", id - 1) },
                timestamp: None,
                data: None,
                nonce: None,
                difficulty: None,
            })
            .collect()
    }

    fn ids(viewer: &BlockchainViewer) -> Vec<u64> {
        viewer.visible().iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_window_navigation_over_ten_blocks() {
        let mut viewer = BlockchainViewer::new(chain(10));
        assert_eq!(ids(&viewer), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(!viewer.can_prev());
        assert!(viewer.can_next());
        assert_eq!(viewer.caption(), "Showing blocks 1 - 7 of 10");

        assert!(viewer.next());
        assert_eq!(ids(&viewer), vec![2, 3, 4, 5, 6, 7, 8]);

        assert!(viewer.next());
        assert!(viewer.next());
        assert_eq!(ids(&viewer), vec![4, 5, 6, 7, 8, 9, 10]);
        assert!(!viewer.can_next());
        assert!(!viewer.next());
        assert_eq!(viewer.caption(), "Showing blocks 4 - 10 of 10");

        while viewer.prev() {}
        assert_eq!(viewer.start(), 0);
        assert!(!viewer.prev());
    }

    #[test]
    fn test_short_and_empty_lists() {
        let mut viewer = BlockchainViewer::new(chain(3));
        assert_eq!(ids(&viewer), vec![1, 2, 3]);
        assert!(!viewer.can_next());
        assert!(!viewer.can_prev());
        assert_eq!(viewer.caption(), "Showing blocks 1 - 3 of 3");

        viewer.replace(Vec::new());
        assert!(viewer.visible().is_empty());
        assert_eq!(viewer.caption(), "No blocks recorded yet");
    }

    #[test]
    fn test_detail_and_linkage() {
        let mut blocks = chain(4);
        blocks[3].previous_hash = "tampered".into();
        let mut viewer = BlockchainViewer::new(blocks);

        assert_eq!(viewer.select(1).unwrap().linkage, Linkage::Genesis);
        assert_eq!(viewer.select(2).unwrap().linkage, Linkage::Linked);
        let detail = viewer.select(4).unwrap();
        assert_eq!(detail.linkage, Linkage::Broken);
        assert_eq!(detail.position, 3);
        assert_eq!(detail.timestamp, "Invalid Date");

        assert!(viewer.select(99).is_none());
        viewer.close_detail();
        assert!(viewer.detail().is_none());
    }

    #[test]
    fn test_replace_clamps_window_and_keeps_selection() {
        let mut viewer = BlockchainViewer::new(chain(12));
        viewer.jump_to(100);
        assert_eq!(viewer.start(), 5);
        viewer.select(11);

        viewer.replace(chain(13));
        assert_eq!(viewer.start(), 5);
        assert_eq!(viewer.detail().map(|d| d.block.id), Some(11));

        viewer.replace(chain(8));
        assert_eq!(viewer.start(), 1);
        assert!(viewer.detail().is_none());
    }
}
