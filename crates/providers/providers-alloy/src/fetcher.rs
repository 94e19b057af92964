//! Contains the [`AlloyBlockFetcher`], the JSON-RPC backed [`BlockFetcher`].

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::U64;
use alloy_rpc_client::RpcClient;
use alloy_transport::RpcError;
use async_trait::async_trait;
use serde::Deserialize;
use tokscan_resolver::{Block, BlockFetcher, BlockId, FetchError};
use tracing::trace;
use url::Url;

/// The subset of an `eth_getBlockByNumber` result the resolver needs.
#[derive(Debug, Deserialize)]
struct RawBlock {
    number: U64,
    timestamp: U64,
}

/// Fetches block headers with `eth_getBlockByNumber`.
#[derive(Debug, Clone)]
pub struct AlloyBlockFetcher {
    /// The JSON-RPC client.
    client: RpcClient,
}

impl AlloyBlockFetcher {
    /// Creates a new [`AlloyBlockFetcher`] on top of an existing [`RpcClient`].
    pub const fn new(client: RpcClient) -> Self {
        Self { client }
    }

    /// Creates a new [`AlloyBlockFetcher`] talking HTTP to `url`.
    pub fn new_http(url: Url) -> Self {
        Self::new(RpcClient::new_http(url))
    }
}

#[async_trait]
impl BlockFetcher for AlloyBlockFetcher {
    async fn fetch_block(&self, id: BlockId) -> Result<Block, FetchError> {
        let tag = match id {
            BlockId::Number(number) => BlockNumberOrTag::Number(number),
            BlockId::Latest => BlockNumberOrTag::Latest,
        };
        trace!(target: "alloy_fetcher", %id, "Requesting block");

        let raw = self
            .client
            .request::<_, Option<RawBlock>>("eth_getBlockByNumber", (tag, false))
            .await
            .map_err(|err| match err {
                RpcError::DeserError { .. } => FetchError::Malformed(err.to_string()),
                err => FetchError::Upstream(err.to_string()),
            })?
            .ok_or_else(|| FetchError::Upstream(format!("block {id} not found")))?;

        Ok(Block::new(raw.number.to(), raw.timestamp.to()))
    }
}
