//! Contains the [`TokenClient`], which reads token state as of a point in time.

use crate::{Erc20Reader, Erc721Reader, Erc1155Reader, TokenError};
use alloy_eips::BlockId;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use tokscan_resolver::{BlockFetcher, BlockResolver};
use tracing::debug;

/// A token balance together with the block it was read at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalBalance {
    /// The block the balance was read at.
    pub block: u64,
    /// The balance in base units.
    pub balance: U256,
}

/// Combines a [`Provider`] with a [`BlockResolver`] so token state can be read as of a
/// UNIX timestamp.
#[derive(Debug)]
pub struct TokenClient<P, F> {
    provider: P,
    resolver: BlockResolver<F>,
}

impl<P, F> TokenClient<P, F>
where
    P: Provider + Clone,
    F: BlockFetcher,
{
    /// Creates a new [`TokenClient`].
    pub const fn new(provider: P, resolver: BlockResolver<F>) -> Self {
        Self { provider, resolver }
    }

    /// Returns the [`BlockResolver`].
    pub const fn resolver(&self) -> &BlockResolver<F> {
        &self.resolver
    }

    /// Returns an [`Erc20Reader`] for `token`.
    pub fn erc20(&self, token: Address) -> Erc20Reader<P> {
        Erc20Reader::new(self.provider.clone(), token)
    }

    /// Returns an [`Erc721Reader`] for `collection`.
    pub fn erc721(&self, collection: Address) -> Erc721Reader<P> {
        Erc721Reader::new(self.provider.clone(), collection)
    }

    /// Returns an [`Erc1155Reader`] for `contract`.
    pub fn erc1155(&self, contract: Address) -> Erc1155Reader<P> {
        Erc1155Reader::new(self.provider.clone(), contract)
    }

    /// Resolves `timestamp` to the block whose state should be read.
    pub async fn block_at(&self, timestamp: u64) -> Result<BlockId, TokenError> {
        let number = self.resolver.resolve_block_for_timestamp(timestamp).await?;
        Ok(BlockId::number(number))
    }

    /// Returns the ERC-20 balance of `owner` as of `timestamp`.
    pub async fn erc20_balance_at(
        &self,
        token: Address,
        owner: Address,
        timestamp: u64,
    ) -> Result<HistoricalBalance, TokenError> {
        let block = self.resolver.resolve_block_for_timestamp(timestamp).await?;
        let balance = self.erc20(token).balance_of(owner, Some(BlockId::number(block))).await?;
        debug!(target: "tokens", %token, %owner, timestamp, block, %balance, "Read historical balance");
        Ok(HistoricalBalance { block, balance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{abi::IERC20, test_utils::mock_provider};
    use alloy_primitives::{Bytes, address};
    use alloy_sol_types::SolCall;
    use std::sync::Arc;
    use tokscan_resolver::{BlockId as ChainBlockId, test_utils::SyntheticChain};

    #[tokio::test]
    async fn test_erc20_balance_at() {
        let (asserter, provider) = mock_provider();
        let chain = Arc::new(SyntheticChain::linear(100, 1_000, 10));
        let client = TokenClient::new(provider, BlockResolver::new(Arc::clone(&chain)));

        let balance = U256::from(42_000u64);
        asserter.push_success(&Bytes::from(IERC20::balanceOfCall::abi_encode_returns(&balance)));

        let token = address!("0x6b175474e89094c44da98b954eedeac495271d0f");
        let owner = address!("0x000000000000000000000000000000000000dead");
        let read = client.erc20_balance_at(token, owner, 1_325).await.unwrap();
        assert_eq!(read, HistoricalBalance { block: 32, balance });
        assert_eq!(chain.fetches(ChainBlockId::Number(33)), 1);
    }

    #[tokio::test]
    async fn test_block_at_clamps_to_head() {
        let (_, provider) = mock_provider();
        let client =
            TokenClient::new(provider, BlockResolver::new(SyntheticChain::linear(100, 1_000, 10)));
        assert_eq!(client.block_at(9_999).await.unwrap(), BlockId::number(100));
    }
}
