//! The `erc1155` subcommands.

use super::block_label;
use crate::flags::BlockArgs;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use clap::Subcommand;
use tokscan_providers_alloy::TokenClient;
use tokscan_resolver::BlockFetcher;

/// Queries an ERC-1155 multi-token contract.
#[derive(Subcommand, Debug, Clone)]
pub enum Erc1155Command {
    /// Print the balance of a token id held by an account.
    Balance {
        /// The multi-token contract.
        contract: Address,
        /// The account holding the tokens.
        account: Address,
        /// The token id.
        id: U256,
        /// The block to read at.
        #[command(flatten)]
        block: BlockArgs,
    },
    /// Print the metadata URI of a token id.
    Uri {
        /// The multi-token contract.
        contract: Address,
        /// The token id.
        id: U256,
        /// The block to read at.
        #[command(flatten)]
        block: BlockArgs,
    },
}

impl Erc1155Command {
    /// Runs the query.
    pub async fn execute<P, F>(&self, client: &TokenClient<P, F>) -> anyhow::Result<String>
    where
        P: Provider + Clone,
        F: BlockFetcher,
    {
        match self {
            Self::Balance { contract, account, id, block } => {
                let block = block.block_id(client).await?;
                let balance = client.erc1155(*contract).balance_of(*account, *id, block).await?;
                Ok(format!("block: {}\nbalance: {balance}", block_label(block)))
            }
            Self::Uri { contract, id, block } => {
                let block = block.block_id(client).await?;
                let uri = client.erc1155(*contract).uri(*id, block).await?;
                Ok(format!("block: {}\nuri: {uri}", block_label(block)))
            }
        }
    }
}
