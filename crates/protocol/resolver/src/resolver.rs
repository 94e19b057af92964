//! Contains the [`BlockResolver`], which maps timestamps to block numbers.

use crate::{
    AverageInterval, Block, BlockBoundary, BlockCache, BlockFetcher, ChainBoundaries, FIRST_BLOCK,
    ProbeHistory, ResolverConfig, ResolverError, ResolverResult, SearchWindow, next_probe,
};
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};

/// Resolves UNIX timestamps to block numbers through an expensive [`BlockFetcher`].
///
/// The search interpolates on the running average block interval, refining the estimate after
/// each probe, and bisects the remaining window whenever two interpolated probes in a row fail to
/// halve it. Fetched blocks, the chain boundaries and the interval estimate are kept
/// for the lifetime of the resolver and shared by concurrent calls.
#[derive(Debug)]
pub struct BlockResolver<F> {
    /// Memo of every fetched block.
    cache: BlockCache<F>,
    /// The first and latest block, established on first use.
    boundaries: OnceCell<ChainBoundaries>,
    /// Seconds per block, refined on every probe.
    interval: AverageInterval,
    /// Resolver tunables.
    config: ResolverConfig,
}

impl<F: BlockFetcher> BlockResolver<F> {
    /// Creates a new [`BlockResolver`] with the default [`ResolverConfig`].
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, ResolverConfig::default())
    }

    /// Creates a new [`BlockResolver`] with the given [`ResolverConfig`].
    pub fn with_config(fetcher: F, config: ResolverConfig) -> Self {
        Self {
            cache: BlockCache::new(fetcher, config.fetch_timeout),
            boundaries: OnceCell::new(),
            interval: AverageInterval::default(),
            config,
        }
    }

    /// Returns the [`ResolverConfig`].
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The number of blocks fetched from the upstream source so far.
    pub fn request_count(&self) -> u64 {
        self.cache.request_count()
    }

    /// The current average block interval estimate, in seconds.
    pub fn average_block_interval(&self) -> Option<f64> {
        self.interval.get()
    }

    /// Returns the chain boundaries, fetching them on first use.
    ///
    /// A chain too short to yield an average interval is not an error here: the condition is
    /// logged and every timestamp then resolves to one of the boundaries.
    pub async fn boundaries(&self) -> ResolverResult<ChainBoundaries> {
        self.boundaries
            .get_or_try_init(|| async {
                let boundaries = ChainBoundaries::fetch(&self.cache).await?;
                match boundaries.average_interval() {
                    Ok(interval) => {
                        self.interval.set(interval);
                        debug!(
                            target: "resolver",
                            first = boundaries.first.number,
                            latest = boundaries.latest.number,
                            interval,
                            "Established chain boundaries"
                        );
                    }
                    Err(err) => {
                        warn!(target: "resolver", %err, "No average block interval, resolving to boundaries only");
                    }
                }
                Ok::<_, ResolverError>(boundaries)
            })
            .await
            .copied()
    }

    /// Resolves `target` (UNIX seconds) to a block number.
    ///
    /// With [`BlockBoundary::AtOrBefore`] this is the last block mined at or before `target`;
    /// with [`BlockBoundary::AtOrAfter`] the first block mined at or after it. Timestamps before
    /// the first block resolve to [`FIRST_BLOCK`] and timestamps at or past the head resolve to
    /// the head.
    pub async fn resolve_block_for_timestamp(&self, target: u64) -> ResolverResult<u64> {
        let chain = self.boundaries().await?;
        if let Some(number) = chain.clamp(target) {
            debug!(target: "resolver", timestamp = target, number, "Timestamp outside the chain, using boundary");
            return Ok(number);
        }

        let mut window = SearchWindow::new(self.config.boundary, target, &chain);
        if let Some(number) = window.resolved() {
            return Ok(number);
        }
        let ceiling = self.config.probe_ceiling(chain.latest.number);
        let mut history = ProbeHistory::new(target);

        let guess = self.initial_guess(target, &chain, &window)?;
        history.insert(guess);
        // Width of the window when progress was last checked, and the interpolated probes since.
        let mut checkpoint = window.width();
        let mut interpolated = 1;
        let mut current = self.cache.get_or_fetch(guess.into()).await?;

        loop {
            window.observe(&current);
            if let Some(neighbor) = self.neighbor(&current, &window) {
                let block = self.cache.get_or_fetch(neighbor.into()).await?;
                window.observe(&block);
            }

            if let Some(number) = window.resolved() {
                #[cfg(feature = "metrics")]
                ::metrics::histogram!(crate::metrics::RESOLUTION_PROBES_NAME)
                    .record(history.len() as f64);
                debug!(
                    target: "resolver",
                    timestamp = target,
                    number,
                    probes = history.len(),
                    requests = self.request_count(),
                    "Resolved timestamp"
                );
                return Ok(number);
            }

            if history.len() >= ceiling {
                warn!(target: "resolver", timestamp = target, probes = history.len(), "Probe ceiling reached");
                return Err(ResolverError::ResolutionTimeout { target, probes: history.len() });
            }

            if window.width().saturating_mul(2) <= checkpoint {
                checkpoint = window.width();
                interpolated = 0;
            }
            // Two interpolated probes that did not halve the window: bisect instead.
            let midpoint = window.midpoint().filter(|_| interpolated >= 2);
            let skip = match midpoint {
                Some(midpoint) => {
                    checkpoint = window.width();
                    interpolated = 0;
                    midpoint as i64 - current.number as i64
                }
                None => {
                    interpolated += 1;
                    self.interpolated_skip(target, &current, &window, &chain)?
                }
            };

            let next = next_probe(current.number, skip, &window, &mut history)
                .ok_or(ResolverError::SearchExhausted { target })?;
            let block = self.cache.get_or_fetch(next.into()).await?;
            let interval = self.interval.refine(&current, &block);
            trace!(
                target: "resolver",
                target_timestamp = target,
                from = current.number,
                skip,
                bisect = midpoint.is_some(),
                probe = block.number,
                timestamp = block.timestamp,
                ?interval,
                "Probed block"
            );
            current = block;
        }
    }

    /// The current interval estimate.
    ///
    /// Always present once [`ChainBoundaries::clamp`] has left a target inside the chain: a chain
    /// without an average interval has its timestamps covered by the boundaries alone.
    fn interval(&self, chain: &ChainBoundaries) -> ResolverResult<f64> {
        self.interval
            .get()
            .ok_or(ResolverError::InsufficientChainData { latest: chain.latest.number })
    }

    /// Interpolates the first probe from the chain's average interval.
    fn initial_guess(
        &self,
        target: u64,
        chain: &ChainBoundaries,
        window: &SearchWindow,
    ) -> ResolverResult<u64> {
        let range = window.candidates().ok_or(ResolverError::SearchExhausted { target })?;
        let interval = self.interval(chain)?;
        let guess = ((target - chain.first.timestamp) as f64 / interval).ceil() as u64;
        Ok(guess.clamp(*range.start(), *range.end()))
    }

    /// The adjacent block that decides whether `block` is optimal, if it could be.
    ///
    /// A block preceding the target is the answer for [`BlockBoundary::AtOrBefore`] only if its
    /// successor does not precede it; any other block is the answer for
    /// [`BlockBoundary::AtOrAfter`] only if its predecessor does.
    fn neighbor(&self, block: &Block, window: &SearchWindow) -> Option<u64> {
        let precedes = window.precedes(block);
        match self.config.boundary {
            BlockBoundary::AtOrBefore => precedes.then(|| block.number + 1),
            BlockBoundary::AtOrAfter => {
                (!precedes && block.number > FIRST_BLOCK).then(|| block.number - 1)
            }
        }
    }

    /// The signed number of blocks between `block` and `target` at the average interval.
    ///
    /// Never zero: a block that sits on the target but is not optimal still has to move towards
    /// the side of the window that can hold the answer.
    fn interpolated_skip(
        &self,
        target: u64,
        block: &Block,
        window: &SearchWindow,
        chain: &ChainBoundaries,
    ) -> ResolverResult<i64> {
        let interval = self.interval(chain)?;
        let difference = target as f64 - block.timestamp as f64;
        Ok(match (difference / interval).ceil() as i64 {
            0 if window.precedes(block) => 1,
            0 => -1,
            skip => skip,
        })
    }
}
