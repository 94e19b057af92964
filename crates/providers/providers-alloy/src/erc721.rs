//! Contains the [`Erc721Reader`].

use crate::{
    TokenError,
    abi::{IERC721, decode_string_or_bytes32},
    call::{call_decoded, call_raw, decode_error},
};
use alloy_eips::BlockId;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;

/// Reads ERC-721 state, optionally as of a historical block.
#[derive(Debug, Clone)]
pub struct Erc721Reader<P> {
    provider: P,
    collection: Address,
}

impl<P: Provider> Erc721Reader<P> {
    /// Creates a new [`Erc721Reader`] for the collection at `collection`.
    pub const fn new(provider: P, collection: Address) -> Self {
        Self { provider, collection }
    }

    /// The collection contract address.
    pub const fn collection(&self) -> Address {
        self.collection
    }

    /// Returns the collection name.
    pub async fn name(&self, block: Option<BlockId>) -> Result<String, TokenError> {
        let data = call_raw(&self.provider, self.collection, &IERC721::nameCall {}, block).await?;
        decode_string_or_bytes32::<IERC721::nameCall>(&data)
            .map_err(|err| decode_error::<IERC721::nameCall>(self.collection, err))
    }

    /// Returns the collection symbol.
    pub async fn symbol(&self, block: Option<BlockId>) -> Result<String, TokenError> {
        let data = call_raw(&self.provider, self.collection, &IERC721::symbolCall {}, block).await?;
        decode_string_or_bytes32::<IERC721::symbolCall>(&data)
            .map_err(|err| decode_error::<IERC721::symbolCall>(self.collection, err))
    }

    /// Returns the number of tokens held by `owner`.
    pub async fn balance_of(
        &self,
        owner: Address,
        block: Option<BlockId>,
    ) -> Result<U256, TokenError> {
        call_decoded(&self.provider, self.collection, &IERC721::balanceOfCall { owner }, block)
            .await
    }

    /// Returns the owner of `token_id`. Reverts for tokens that do not exist.
    pub async fn owner_of(
        &self,
        token_id: U256,
        block: Option<BlockId>,
    ) -> Result<Address, TokenError> {
        let call = IERC721::ownerOfCall { tokenId: token_id };
        call_decoded(&self.provider, self.collection, &call, block).await
    }

    /// Returns the metadata URI of `token_id`.
    pub async fn token_uri(
        &self,
        token_id: U256,
        block: Option<BlockId>,
    ) -> Result<String, TokenError> {
        let call = IERC721::tokenURICall { tokenId: token_id };
        call_decoded(&self.provider, self.collection, &call, block).await
    }
}
