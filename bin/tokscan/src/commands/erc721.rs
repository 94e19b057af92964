//! The `erc721` subcommands.

use super::block_label;
use crate::flags::BlockArgs;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use clap::Subcommand;
use tokscan_providers_alloy::TokenClient;
use tokscan_resolver::BlockFetcher;

/// Queries an ERC-721 collection.
#[derive(Subcommand, Debug, Clone)]
pub enum Erc721Command {
    /// Print the collection's name and symbol.
    Info {
        /// The collection contract.
        collection: Address,
        /// The block to read at.
        #[command(flatten)]
        block: BlockArgs,
    },
    /// Print the owner of a token.
    Owner {
        /// The collection contract.
        collection: Address,
        /// The token id.
        token_id: U256,
        /// The block to read at.
        #[command(flatten)]
        block: BlockArgs,
    },
    /// Print how many tokens of the collection an account holds.
    Balance {
        /// The collection contract.
        collection: Address,
        /// The account holding the tokens.
        owner: Address,
        /// The block to read at.
        #[command(flatten)]
        block: BlockArgs,
    },
    /// Print the metadata URI of a token.
    Uri {
        /// The collection contract.
        collection: Address,
        /// The token id.
        token_id: U256,
        /// The block to read at.
        #[command(flatten)]
        block: BlockArgs,
    },
}

impl Erc721Command {
    /// Runs the query.
    pub async fn execute<P, F>(&self, client: &TokenClient<P, F>) -> anyhow::Result<String>
    where
        P: Provider + Clone,
        F: BlockFetcher,
    {
        match self {
            Self::Info { collection, block } => {
                let block = block.block_id(client).await?;
                let reader = client.erc721(*collection);
                let name = reader.name(block).await?;
                let symbol = reader.symbol(block).await?;
                Ok(format!("block: {}\nname: {name}\nsymbol: {symbol}", block_label(block)))
            }
            Self::Owner { collection, token_id, block } => {
                let block = block.block_id(client).await?;
                let owner = client.erc721(*collection).owner_of(*token_id, block).await?;
                Ok(format!("block: {}\nowner: {owner}", block_label(block)))
            }
            Self::Balance { collection, owner, block } => {
                let block = block.block_id(client).await?;
                let balance = client.erc721(*collection).balance_of(*owner, block).await?;
                Ok(format!("block: {}\nbalance: {balance}", block_label(block)))
            }
            Self::Uri { collection, token_id, block } => {
                let block = block.block_id(client).await?;
                let uri = client.erc721(*collection).token_uri(*token_id, block).await?;
                Ok(format!("block: {}\nuri: {uri}", block_label(block)))
            }
        }
    }
}
