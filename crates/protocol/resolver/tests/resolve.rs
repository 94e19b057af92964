//! End-to-end resolution against synthetic chains.

use std::sync::Arc;
use tokscan_resolver::{
    BlockBoundary, BlockFetcher, BlockId, BlockResolver, ResolverConfig, test_utils::SyntheticChain,
};

/// Deterministic block times between 0 and `max_gap` seconds, so runs of equal timestamps occur.
fn jittered_chain(head: u64, max_gap: u64, seed: u64) -> SyntheticChain {
    let mut state = seed;
    let mut timestamp = 1_600_000_000;
    SyntheticChain::from_timestamps((0..=head).map(|_| {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        timestamp += (state >> 33) % (max_gap + 1);
        timestamp
    }))
}

fn resolver_for<F: BlockFetcher>(fetcher: F, boundary: BlockBoundary) -> BlockResolver<F> {
    BlockResolver::with_config(fetcher, ResolverConfig::default().with_boundary(boundary))
}

#[tokio::test]
async fn resolves_every_timestamp_on_linear_chain() {
    let chain = Arc::new(SyntheticChain::linear(100, 1_000, 10));
    let resolver = resolver_for(Arc::clone(&chain), BlockBoundary::AtOrBefore);

    assert_eq!(resolver.resolve_block_for_timestamp(1_325).await.unwrap(), 32);
    assert_eq!(resolver.resolve_block_for_timestamp(500).await.unwrap(), 1);
    assert_eq!(resolver.resolve_block_for_timestamp(5_000).await.unwrap(), 100);

    for target in 990..2_010 {
        let number = resolver.resolve_block_for_timestamp(target).await.unwrap();
        assert_eq!(number, chain.expected(target, BlockBoundary::AtOrBefore), "target {target}");
    }
    // The whole sweep never fetches an identifier twice.
    assert_eq!(chain.max_fetches_per_id(), 1);
}

#[tokio::test]
async fn optimal_block_brackets_target() {
    for boundary in [BlockBoundary::AtOrBefore, BlockBoundary::AtOrAfter] {
        let chain = Arc::new(jittered_chain(2_000, 30, 7));
        let resolver = resolver_for(Arc::clone(&chain), boundary);
        let first = chain.block(1).unwrap().timestamp;
        let latest = chain.block(chain.head()).unwrap().timestamp;

        for target in (first..latest).step_by(97) {
            let number = resolver.resolve_block_for_timestamp(target).await.unwrap();
            let block = chain.block(number).unwrap();
            match boundary {
                BlockBoundary::AtOrBefore => {
                    let next = chain.block(number + 1).unwrap();
                    assert!(block.timestamp <= target && next.timestamp > target);
                }
                BlockBoundary::AtOrAfter => {
                    assert!(block.timestamp >= target);
                    if number > 1 {
                        assert!(chain.block(number - 1).unwrap().timestamp < target);
                    }
                }
            }
        }
        assert_eq!(chain.max_fetches_per_id(), 1);
    }
}

#[tokio::test]
async fn resolution_is_monotonic() {
    let chain = Arc::new(jittered_chain(5_000, 20, 42));
    let resolver = resolver_for(Arc::clone(&chain), BlockBoundary::AtOrBefore);
    let first = chain.block(1).unwrap().timestamp;
    let latest = chain.block(chain.head()).unwrap().timestamp;

    let mut previous = 0;
    for target in (first - 50..latest + 50).step_by(311) {
        let number = resolver.resolve_block_for_timestamp(target).await.unwrap();
        assert!(number >= previous, "{target} resolved to {number}, before {previous}");
        previous = number;
    }
}

#[tokio::test]
async fn terminates_on_adversarial_chains() {
    // A long plateau followed by a sudden jump defeats pure interpolation.
    let head = 4_096u64;
    let skewed = (0..=head).map(|k| if k < head - 8 { 1_000 + k / 512 } else { 1_000_000 + k });
    // Almost every block shares a single timestamp.
    let flat = (0..=head).map(|k| if k < head { 5_000 } else { 5_001 });

    for timestamps in [skewed.collect::<Vec<_>>(), flat.collect()] {
        for boundary in [BlockBoundary::AtOrBefore, BlockBoundary::AtOrAfter] {
            let chain = Arc::new(SyntheticChain::from_timestamps(timestamps.clone()));
            let first = chain.block(1).unwrap().timestamp;
            let latest = chain.block(head).unwrap().timestamp;
            for target in [first, first + 1, first + 4, latest - 1, (first + latest) / 2] {
                let resolver = resolver_for(Arc::clone(&chain), boundary);
                let number = resolver.resolve_block_for_timestamp(target).await.unwrap();
                assert_eq!(number, chain.expected(target, boundary), "{boundary} {target}");
                assert!(resolver.request_count() <= head);
            }
        }
    }
}

#[tokio::test]
async fn head_is_not_refetched_by_number() {
    let chain = Arc::new(SyntheticChain::linear(50, 1_000, 12));
    let resolver = resolver_for(Arc::clone(&chain), BlockBoundary::AtOrAfter);

    // 1_599 sits just before the head, whose predecessor check needs block 49 only.
    assert_eq!(resolver.resolve_block_for_timestamp(1_599).await.unwrap(), 50);
    assert_eq!(chain.fetches(BlockId::Latest), 1);
    assert_eq!(chain.fetches(BlockId::Number(50)), 0);
}
