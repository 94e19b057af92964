//! The `erc20` subcommands.

use super::block_label;
use crate::flags::BlockArgs;
use alloy_primitives::Address;
use alloy_provider::Provider;
use clap::Subcommand;
use tokscan_providers_alloy::{TokenClient, format_token_amount};
use tokscan_resolver::BlockFetcher;

/// Queries an ERC-20 token.
#[derive(Subcommand, Debug, Clone)]
pub enum Erc20Command {
    /// Print the token's name, symbol, decimals and total supply.
    Info {
        /// The token contract.
        token: Address,
        /// The block to read at.
        #[command(flatten)]
        block: BlockArgs,
    },
    /// Print the balance of an account.
    Balance {
        /// The token contract.
        token: Address,
        /// The account holding the tokens.
        owner: Address,
        /// The block to read at.
        #[command(flatten)]
        block: BlockArgs,
    },
    /// Print how much a spender may transfer on behalf of an owner.
    Allowance {
        /// The token contract.
        token: Address,
        /// The account holding the tokens.
        owner: Address,
        /// The account allowed to spend them.
        spender: Address,
        /// The block to read at.
        #[command(flatten)]
        block: BlockArgs,
    },
}

impl Erc20Command {
    /// Runs the query.
    pub async fn execute<P, F>(&self, client: &TokenClient<P, F>) -> anyhow::Result<String>
    where
        P: Provider + Clone,
        F: BlockFetcher,
    {
        match self {
            Self::Info { token, block } => {
                let block = block.block_id(client).await?;
                let reader = client.erc20(*token);
                let metadata = reader.metadata(block).await?;
                let supply = reader.total_supply(block).await?;
                Ok(format!(
                    "block: {}\nname: {}\nsymbol: {}\ndecimals: {}\ntotal supply: {} ({supply})",
                    block_label(block),
                    metadata.name,
                    metadata.symbol,
                    metadata.decimals,
                    format_token_amount(supply, metadata.decimals)?,
                ))
            }
            Self::Balance { token, owner, block } => {
                let block = block.block_id(client).await?;
                let reader = client.erc20(*token);
                let balance = reader.balance_of(*owner, block).await?;
                let decimals = reader.decimals(block).await?;
                Ok(format!(
                    "block: {}\nbalance: {} ({balance})",
                    block_label(block),
                    format_token_amount(balance, decimals)?,
                ))
            }
            Self::Allowance { token, owner, spender, block } => {
                let block = block.block_id(client).await?;
                let reader = client.erc20(*token);
                let allowance = reader.allowance(*owner, *spender, block).await?;
                let decimals = reader.decimals(block).await?;
                Ok(format!(
                    "block: {}\nallowance: {} ({allowance})",
                    block_label(block),
                    format_token_amount(allowance, decimals)?,
                ))
            }
        }
    }
}
