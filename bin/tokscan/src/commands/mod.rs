//! Subcommands of the `tokscan` binary.

use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_provider::Provider;
use clap::Subcommand;
use tokscan_providers_alloy::TokenClient;
use tokscan_resolver::BlockFetcher;

mod block_at;
pub use block_at::BlockAtCommand;

mod erc20;
pub use erc20::Erc20Command;

mod erc721;
pub use erc721::Erc721Command;

mod erc1155;
pub use erc1155::Erc1155Command;

/// Subcommands for the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Resolve a UNIX timestamp to a block number.
    #[command(alias = "block")]
    BlockAt(BlockAtCommand),
    /// Query an ERC-20 token.
    #[command(subcommand)]
    Erc20(Erc20Command),
    /// Query an ERC-721 collection.
    #[command(subcommand)]
    Erc721(Erc721Command),
    /// Query an ERC-1155 multi-token contract.
    #[command(subcommand)]
    Erc1155(Erc1155Command),
}

impl Commands {
    /// Runs the subcommand and returns its output.
    pub async fn execute<P, F>(&self, client: &TokenClient<P, F>) -> anyhow::Result<String>
    where
        P: Provider + Clone,
        F: BlockFetcher,
    {
        match self {
            Self::BlockAt(command) => command.execute(client).await,
            Self::Erc20(command) => command.execute(client).await,
            Self::Erc721(command) => command.execute(client).await,
            Self::Erc1155(command) => command.execute(client).await,
        }
    }
}

/// Renders the block a query was answered at.
fn block_label(block: Option<BlockId>) -> String {
    match block {
        Some(BlockId::Number(BlockNumberOrTag::Number(number))) => number.to_string(),
        _ => "latest".to_string(),
    }
}
