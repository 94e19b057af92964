//! The collaborator the resolver fetches blocks through.

use crate::{Block, BlockId, FetchError};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

/// Fetches a single block by number or tag.
///
/// Implementations are expected to be expensive (one network round-trip per call); the resolver
/// caches every result and never asks for the same [`BlockId`] twice.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait BlockFetcher: Debug + Send + Sync {
    /// Fetches the block identified by `id`.
    async fn fetch_block(&self, id: BlockId) -> Result<Block, FetchError>;
}

#[async_trait]
impl<T: BlockFetcher + ?Sized> BlockFetcher for Arc<T> {
    async fn fetch_block(&self, id: BlockId) -> Result<Block, FetchError> {
        (**self).fetch_block(id).await
    }
}
