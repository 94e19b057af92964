//! Flags pinning a token query to a point in the chain.

use alloy_eips::BlockId;
use alloy_provider::Provider;
use clap::Args;
use tokscan_providers_alloy::{TokenClient, TokenError};
use tokscan_resolver::BlockFetcher;

/// Selects the block token state is read at. The latest block when neither flag is given.
#[derive(Args, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockArgs {
    /// Read state as of this UNIX timestamp, in seconds.
    #[arg(long, conflicts_with = "block")]
    pub at: Option<u64>,
    /// Read state at this block number.
    #[arg(long)]
    pub block: Option<u64>,
}

impl BlockArgs {
    /// Resolves the flags to a [`BlockId`], looking up the block for `--at` if needed.
    pub async fn block_id<P, F>(
        &self,
        client: &TokenClient<P, F>,
    ) -> Result<Option<BlockId>, TokenError>
    where
        P: Provider + Clone,
        F: BlockFetcher,
    {
        match (self.at, self.block) {
            (Some(timestamp), _) => client.block_at(timestamp).await.map(Some),
            (None, Some(number)) => Ok(Some(BlockId::number(number))),
            (None, None) => Ok(None),
        }
    }
}
