//! Establishes the first and latest block of the chain.

use crate::{
    Block, BlockCache, BlockFetcher, BlockId, FIRST_BLOCK, ResolverError, ResolverResult,
};

/// The oldest and newest block the resolver searches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainBoundaries {
    /// Block [`FIRST_BLOCK`], or the head itself on a chain that has not produced it yet.
    pub first: Block,
    /// The chain head at the time the boundaries were established.
    pub latest: Block,
}

impl ChainBoundaries {
    /// Fetches both boundary blocks through `cache`.
    pub async fn fetch<F: BlockFetcher>(cache: &BlockCache<F>) -> ResolverResult<Self> {
        let latest = cache.get_or_fetch(BlockId::Latest).await?;
        let first = if latest.number < FIRST_BLOCK {
            latest
        } else {
            cache.get_or_fetch(BlockId::FIRST).await?
        };
        Ok(Self { first, latest })
    }

    /// The average seconds per block between the two boundaries.
    ///
    /// Fails with [`ResolverError::InsufficientChainData`] if the chain is shorter than two blocks
    /// or every block shares one timestamp.
    pub fn average_interval(&self) -> ResolverResult<f64> {
        let blocks = self.latest.number.saturating_sub(self.first.number);
        let seconds = self.latest.timestamp.saturating_sub(self.first.timestamp);
        if self.latest.number <= FIRST_BLOCK || blocks == 0 || seconds == 0 {
            return Err(ResolverError::InsufficientChainData { latest: self.latest.number });
        }
        Ok(seconds as f64 / blocks as f64)
    }

    /// Returns the boundary block number for a `target` outside the searchable range.
    ///
    /// Timestamps before the first block resolve to [`FIRST_BLOCK`]; timestamps at or after the
    /// head resolve to the head. Anything in between needs a search and yields `None`.
    pub fn clamp(&self, target: u64) -> Option<u64> {
        if target < self.first.timestamp {
            Some(FIRST_BLOCK.min(self.latest.number))
        } else if target >= self.latest.timestamp {
            Some(self.latest.number)
        } else {
            None
        }
    }
}
