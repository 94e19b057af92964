//! The `block-at` subcommand.

use alloy_provider::Provider;
use clap::Args;
use tokscan_providers_alloy::TokenClient;
use tokscan_resolver::BlockFetcher;
use tracing::info;

/// Resolves a UNIX timestamp to a block number.
#[derive(Args, Debug, Clone)]
pub struct BlockAtCommand {
    /// The UNIX timestamp, in seconds.
    pub timestamp: u64,
}

impl BlockAtCommand {
    /// Resolves the timestamp and reports how many blocks were fetched.
    pub async fn execute<P, F>(&self, client: &TokenClient<P, F>) -> anyhow::Result<String>
    where
        P: Provider + Clone,
        F: BlockFetcher,
    {
        let resolver = client.resolver();
        let number = resolver.resolve_block_for_timestamp(self.timestamp).await?;
        info!(
            target: "tokscan",
            timestamp = self.timestamp,
            number,
            boundary = %resolver.config().boundary,
            interval = ?resolver.average_block_interval(),
            "Resolved block"
        );
        Ok(format!("block: {number}\nfetches: {}", resolver.request_count()))
    }
}
