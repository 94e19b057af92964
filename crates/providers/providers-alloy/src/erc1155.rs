//! Contains the [`Erc1155Reader`].

use crate::{
    TokenError,
    abi::{IERC1155, substitute_token_id},
    call::call_decoded,
};
use alloy_eips::BlockId;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;

/// Reads ERC-1155 state, optionally as of a historical block.
#[derive(Debug, Clone)]
pub struct Erc1155Reader<P> {
    provider: P,
    contract: Address,
}

impl<P: Provider> Erc1155Reader<P> {
    /// Creates a new [`Erc1155Reader`] for the multi-token contract at `contract`.
    pub const fn new(provider: P, contract: Address) -> Self {
        Self { provider, contract }
    }

    /// The multi-token contract address.
    pub const fn contract(&self) -> Address {
        self.contract
    }

    /// Returns the balance of token `id` held by `account`.
    pub async fn balance_of(
        &self,
        account: Address,
        id: U256,
        block: Option<BlockId>,
    ) -> Result<U256, TokenError> {
        let call = IERC1155::balanceOfCall { account, id };
        call_decoded(&self.provider, self.contract, &call, block).await
    }

    /// Returns the balances of each `(account, id)` pair, in order.
    pub async fn balance_of_batch(
        &self,
        pairs: &[(Address, U256)],
        block: Option<BlockId>,
    ) -> Result<Vec<U256>, TokenError> {
        let (accounts, ids) = pairs.iter().copied().unzip();
        let call = IERC1155::balanceOfBatchCall { accounts, ids };
        call_decoded(&self.provider, self.contract, &call, block).await
    }

    /// Returns the metadata URI of token `id` with the `{id}` placeholder expanded.
    pub async fn uri(&self, id: U256, block: Option<BlockId>) -> Result<String, TokenError> {
        let uri =
            call_decoded(&self.provider, self.contract, &IERC1155::uriCall { id }, block).await?;
        Ok(substitute_token_id(&uri, id))
    }
}
