//! Contains the [`BlockCache`], a session-lived memo of fetched blocks.

use crate::{Block, BlockFetcher, BlockId, ResolverError, ResolverResult};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::sync::OnceCell;
use tracing::{debug, trace};

/// Memoizes blocks returned by a [`BlockFetcher`].
///
/// Entries are never evicted. Each identifier owns a [`OnceCell`], so concurrent lookups of the
/// same identifier share a single in-flight fetch while lookups of different identifiers proceed
/// in parallel. A failed fetch caches nothing and the next lookup tries again.
#[derive(Debug)]
pub struct BlockCache<F> {
    /// The upstream block source.
    fetcher: F,
    /// Cached blocks keyed by the identifier they were requested with.
    entries: Mutex<HashMap<BlockId, Arc<OnceCell<Block>>>>,
    /// Fetches issued to the upstream source.
    requests: AtomicU64,
    /// The timeout applied to each fetch.
    fetch_timeout: Duration,
}

impl<F: BlockFetcher> BlockCache<F> {
    /// Creates an empty [`BlockCache`] in front of `fetcher`.
    pub fn new(fetcher: F, fetch_timeout: Duration) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
            requests: AtomicU64::new(0),
            fetch_timeout,
        }
    }

    /// Returns the block for `id`, fetching it only if it has not been seen before.
    pub async fn get_or_fetch(&self, id: BlockId) -> ResolverResult<Block> {
        let cell = self.cell(id);
        if let Some(block) = cell.get() {
            trace!(target: "block_cache", %id, "Cache hit");
            return Ok(*block);
        }
        let result = cell.get_or_try_init(|| self.fetch(id)).await.copied();
        if result.is_err() {
            self.discard(id, &cell);
        }
        result
    }

    /// Returns the block for `id` if it is already cached.
    pub fn get(&self, id: BlockId) -> Option<Block> {
        self.entries.lock().get(&id).and_then(|cell| cell.get().copied())
    }

    /// The number of fetches issued to the upstream source.
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// The number of identifiers with a cached block.
    pub fn len(&self) -> usize {
        self.entries.lock().values().filter(|cell| cell.initialized()).count()
    }

    /// Returns `true` if no block has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, id: BlockId) -> Arc<OnceCell<Block>> {
        Arc::clone(self.entries.lock().entry(id).or_default())
    }

    /// Removes the empty cell for `id` unless another lookup is still waiting on it.
    fn discard(&self, id: BlockId, cell: &Arc<OnceCell<Block>>) {
        let mut entries = self.entries.lock();
        let unused = entries.get(&id).is_some_and(|entry| {
            Arc::ptr_eq(entry, cell) && !entry.initialized() && Arc::strong_count(entry) == 2
        });
        if unused {
            entries.remove(&id);
        }
    }

    async fn fetch(&self, id: BlockId) -> ResolverResult<Block> {
        let requests = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        #[cfg(feature = "metrics")]
        ::metrics::counter!(crate::metrics::BLOCK_FETCHES_NAME).increment(1);

        let block = match tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch_block(id))
            .await
        {
            Ok(result) => result.map_err(|err| ResolverError::from_fetch(id, err))?,
            Err(_) => {
                return Err(ResolverError::Upstream {
                    id,
                    reason: format!("timed out after {:?}", self.fetch_timeout),
                });
            }
        };

        match id {
            BlockId::Number(number) if number != block.number => {
                return Err(ResolverError::MalformedResponse {
                    id,
                    reason: format!("expected block {number}, got block {}", block.number),
                });
            }
            // The head is also reachable by number once its height is known.
            BlockId::Latest => {
                let _ = self.cell(BlockId::Number(block.number)).set(block);
            }
            BlockId::Number(_) => {}
        }

        debug!(
            target: "block_cache",
            %id,
            number = block.number,
            timestamp = block.timestamp,
            requests,
            "Fetched block"
        );
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, MockBlockFetcher};
    use mockall::predicate::eq;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_fetches_each_identifier_once() {
        let mut fetcher = MockBlockFetcher::new();
        fetcher
            .expect_fetch_block()
            .with(eq(BlockId::Number(5)))
            .times(1)
            .returning(|_| Ok(Block::new(5, 1_050)));

        let cache = BlockCache::new(fetcher, TIMEOUT);
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_fetch(5.into()).await.unwrap(), Block::new(5, 1_050));
        assert_eq!(cache.get_or_fetch(5.into()).await.unwrap(), Block::new(5, 1_050));
        assert_eq!(cache.request_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_latest_is_aliased_by_number() {
        let mut fetcher = MockBlockFetcher::new();
        fetcher
            .expect_fetch_block()
            .with(eq(BlockId::Latest))
            .times(1)
            .returning(|_| Ok(Block::new(100, 2_000)));

        let cache = BlockCache::new(fetcher, TIMEOUT);
        cache.get_or_fetch(BlockId::Latest).await.unwrap();

        // Served from the alias, the mock would panic on a second call.
        assert_eq!(cache.get_or_fetch(100.into()).await.unwrap(), Block::new(100, 2_000));
        assert_eq!(cache.get(BlockId::Number(100)), Some(Block::new(100, 2_000)));
        assert_eq!(cache.request_count(), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let mut fetcher = MockBlockFetcher::new();
        let mut seq = mockall::Sequence::new();
        fetcher
            .expect_fetch_block()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(FetchError::Upstream("rate limited".to_string())));
        fetcher
            .expect_fetch_block()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Block::new(3, 1_030)));

        let cache = BlockCache::new(fetcher, TIMEOUT);
        let err = cache.get_or_fetch(3.into()).await.unwrap_err();
        assert_eq!(
            err,
            ResolverError::Upstream { id: BlockId::Number(3), reason: "rate limited".to_string() }
        );
        assert_eq!(cache.get(3.into()), None);
        assert!(cache.entries.lock().is_empty());

        assert_eq!(cache.get_or_fetch(3.into()).await.unwrap(), Block::new(3, 1_030));
        assert_eq!(cache.request_count(), 2);
    }

    #[tokio::test]
    async fn test_malformed_is_propagated() {
        let mut fetcher = MockBlockFetcher::new();
        fetcher
            .expect_fetch_block()
            .returning(|_| Err(FetchError::Malformed("timestamp is not a quantity".to_string())));

        let cache = BlockCache::new(fetcher, TIMEOUT);
        let err = cache.get_or_fetch(BlockId::Latest).await.unwrap_err();
        assert!(matches!(err, ResolverError::MalformedResponse { id: BlockId::Latest, .. }));
    }

    #[derive(Debug)]
    struct StalledFetcher;

    #[async_trait::async_trait]
    impl BlockFetcher for StalledFetcher {
        async fn fetch_block(&self, _: BlockId) -> Result<Block, FetchError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Block::default())
        }
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let cache = BlockCache::new(StalledFetcher, Duration::from_millis(10));
        let err = cache.get_or_fetch(BlockId::Latest).await.unwrap_err();
        assert!(matches!(err, ResolverError::Upstream { id: BlockId::Latest, .. }));
        assert!(cache.is_empty());
        assert!(cache.entries.lock().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_mismatched_block_number() {
        let mut fetcher = MockBlockFetcher::new();
        fetcher.expect_fetch_block().returning(|_| Ok(Block::new(8, 1_080)));

        let cache = BlockCache::new(fetcher, TIMEOUT);
        let err = cache.get_or_fetch(9.into()).await.unwrap_err();
        assert!(matches!(err, ResolverError::MalformedResponse { id: BlockId::Number(9), .. }));
        assert_eq!(cache.get(9.into()), None);
    }

    #[tokio::test]
    async fn test_failed_lookups_leave_no_entries() {
        let mut fetcher = MockBlockFetcher::new();
        fetcher
            .expect_fetch_block()
            .returning(|id| Err(FetchError::Upstream(format!("block {id} not found"))));

        let cache = BlockCache::new(fetcher, TIMEOUT);
        for number in 1_000..1_100u64 {
            assert!(cache.get_or_fetch(number.into()).await.is_err());
        }
        assert_eq!(cache.request_count(), 100);
        assert!(cache.entries.lock().is_empty());
    }
}
