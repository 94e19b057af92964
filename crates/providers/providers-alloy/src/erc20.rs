//! Contains the [`Erc20Reader`].

use crate::{
    TokenError,
    abi::{IERC20, decode_string_or_bytes32},
    call::{call_decoded, call_raw, decode_error},
};
use alloy_eips::BlockId;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;

/// The descriptive fields of an ERC-20 token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc20Metadata {
    /// The token name.
    pub name: String,
    /// The token symbol.
    pub symbol: String,
    /// The number of decimals balances are scaled by.
    pub decimals: u8,
}

/// Reads ERC-20 state, optionally as of a historical block.
#[derive(Debug, Clone)]
pub struct Erc20Reader<P> {
    provider: P,
    token: Address,
}

impl<P: Provider> Erc20Reader<P> {
    /// Creates a new [`Erc20Reader`] for the token at `token`.
    pub const fn new(provider: P, token: Address) -> Self {
        Self { provider, token }
    }

    /// The token contract address.
    pub const fn token(&self) -> Address {
        self.token
    }

    /// Returns the token name.
    ///
    /// Tokens that predate the standard and return `bytes32` are supported.
    pub async fn name(&self, block: Option<BlockId>) -> Result<String, TokenError> {
        let data = call_raw(&self.provider, self.token, &IERC20::nameCall {}, block).await?;
        decode_string_or_bytes32::<IERC20::nameCall>(&data)
            .map_err(|err| decode_error::<IERC20::nameCall>(self.token, err))
    }

    /// Returns the token symbol.
    ///
    /// Tokens that predate the standard and return `bytes32` are supported.
    pub async fn symbol(&self, block: Option<BlockId>) -> Result<String, TokenError> {
        let data = call_raw(&self.provider, self.token, &IERC20::symbolCall {}, block).await?;
        decode_string_or_bytes32::<IERC20::symbolCall>(&data)
            .map_err(|err| decode_error::<IERC20::symbolCall>(self.token, err))
    }

    /// Returns the number of decimals.
    pub async fn decimals(&self, block: Option<BlockId>) -> Result<u8, TokenError> {
        call_decoded(&self.provider, self.token, &IERC20::decimalsCall {}, block).await
    }

    /// Returns the total supply in base units.
    pub async fn total_supply(&self, block: Option<BlockId>) -> Result<U256, TokenError> {
        call_decoded(&self.provider, self.token, &IERC20::totalSupplyCall {}, block).await
    }

    /// Returns the balance of `owner` in base units.
    pub async fn balance_of(
        &self,
        owner: Address,
        block: Option<BlockId>,
    ) -> Result<U256, TokenError> {
        call_decoded(&self.provider, self.token, &IERC20::balanceOfCall { owner }, block).await
    }

    /// Returns how much `spender` may still transfer on behalf of `owner`.
    pub async fn allowance(
        &self,
        owner: Address,
        spender: Address,
        block: Option<BlockId>,
    ) -> Result<U256, TokenError> {
        call_decoded(&self.provider, self.token, &IERC20::allowanceCall { owner, spender }, block)
            .await
    }

    /// Returns name, symbol and decimals, all read at the same block.
    pub async fn metadata(&self, block: Option<BlockId>) -> Result<Erc20Metadata, TokenError> {
        Ok(Erc20Metadata {
            name: self.name(block).await?,
            symbol: self.symbol(block).await?,
            decimals: self.decimals(block).await?,
        })
    }
}
