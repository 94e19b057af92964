//! Test utilities for the resolver.

use crate::{Block, BlockBoundary, BlockFetcher, BlockId, FIRST_BLOCK, FetchError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// An in-memory chain that counts every fetch it serves.
///
/// Block `n` is mined at `timestamps[n]`; index 0 is genesis.
#[derive(Debug, Default)]
pub struct SyntheticChain {
    timestamps: Vec<u64>,
    fetches: Mutex<HashMap<BlockId, usize>>,
}

impl SyntheticChain {
    /// Creates a chain from per-block timestamps, starting at genesis.
    pub fn from_timestamps(timestamps: impl IntoIterator<Item = u64>) -> Self {
        Self { timestamps: timestamps.into_iter().collect(), fetches: Mutex::default() }
    }

    /// Creates a chain whose block `k` is mined at `genesis + interval * k`, up to `head`.
    pub fn linear(head: u64, genesis: u64, interval: u64) -> Self {
        Self::from_timestamps((0..=head).map(|k| genesis + interval * k))
    }

    /// The head block number.
    pub fn head(&self) -> u64 {
        self.timestamps.len().saturating_sub(1) as u64
    }

    /// Returns block `number`, if the chain has produced it.
    pub fn block(&self, number: u64) -> Option<Block> {
        self.timestamps.get(number as usize).map(|timestamp| Block::new(number, *timestamp))
    }

    /// The number of times `id` has been fetched.
    pub fn fetches(&self, id: BlockId) -> usize {
        self.fetches.lock().get(&id).copied().unwrap_or_default()
    }

    /// The total number of fetches served.
    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().values().sum()
    }

    /// The highest fetch count of any single identifier.
    pub fn max_fetches_per_id(&self) -> usize {
        self.fetches.lock().values().copied().max().unwrap_or_default()
    }

    /// Resolves `target` by scanning every block.
    pub fn expected(&self, target: u64, boundary: BlockBoundary) -> u64 {
        let head = self.head();
        let first = self.timestamps[FIRST_BLOCK as usize];
        if target < first {
            return FIRST_BLOCK;
        }
        if target >= self.timestamps[head as usize] {
            return head;
        }
        let mut blocks = FIRST_BLOCK..=head;
        match boundary {
            BlockBoundary::AtOrBefore => blocks
                .rev()
                .find(|n| self.timestamps[*n as usize] <= target)
                .unwrap_or(FIRST_BLOCK),
            BlockBoundary::AtOrAfter => {
                blocks.find(|n| self.timestamps[*n as usize] >= target).unwrap_or(head)
            }
        }
    }
}

#[async_trait]
impl BlockFetcher for SyntheticChain {
    async fn fetch_block(&self, id: BlockId) -> Result<Block, FetchError> {
        *self.fetches.lock().entry(id).or_default() += 1;
        let number = id.as_number().unwrap_or_else(|| self.head());
        self.block(number).ok_or_else(|| FetchError::Upstream(format!("block {number} not found")))
    }
}
