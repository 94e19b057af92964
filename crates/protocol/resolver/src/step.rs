//! Chooses the next block to probe.

use crate::{Block, BlockBoundary, ChainBoundaries, FIRST_BLOCK, ProbeHistory};
use std::ops::RangeInclusive;

/// The bracket of block numbers that may still hold the optimal block for a target timestamp.
///
/// Every fetched block lands on one side of the target: it either precedes the answer or does
/// not. `lower` is the highest block seen on the preceding side and `upper` the lowest block seen
/// on the other, so only blocks strictly between the two are worth probing. With non-decreasing
/// timestamps no probed block can ever fall inside that open interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    boundary: BlockBoundary,
    target: u64,
    lower: u64,
    upper: u64,
}

impl SearchWindow {
    /// Opens a window spanning the whole chain.
    pub fn new(boundary: BlockBoundary, target: u64, chain: &ChainBoundaries) -> Self {
        let mut window = Self { boundary, target, lower: 0, upper: chain.latest.number };
        window.observe(&chain.first);
        window.observe(&chain.latest);
        window
    }

    /// Returns whether `block` lies on the preceding side of the target.
    ///
    /// For [`BlockBoundary::AtOrBefore`] the answer itself precedes the target; for
    /// [`BlockBoundary::AtOrAfter`] only the blocks before the answer do.
    pub const fn precedes(&self, block: &Block) -> bool {
        match self.boundary {
            BlockBoundary::AtOrBefore => block.timestamp <= self.target,
            BlockBoundary::AtOrAfter => block.timestamp < self.target,
        }
    }

    /// Narrows the window with a fetched block.
    pub fn observe(&mut self, block: &Block) {
        if self.precedes(block) {
            self.lower = self.lower.max(block.number);
        } else {
            self.upper = self.upper.min(block.number);
        }
    }

    /// Returns the optimal block once the two sides of the window touch.
    pub const fn resolved(&self) -> Option<u64> {
        if self.upper > self.lower.saturating_add(1) {
            return None;
        }
        match self.boundary {
            BlockBoundary::AtOrBefore => Some(self.lower),
            BlockBoundary::AtOrAfter => Some(self.upper),
        }
    }

    /// The block numbers that remain candidates, if any.
    pub fn candidates(&self) -> Option<RangeInclusive<u64>> {
        let low = self.lower.saturating_add(1).max(FIRST_BLOCK);
        let high = self.upper.checked_sub(1)?;
        (low <= high).then_some(low..=high)
    }

    /// The number of blocks between the two sides of the window.
    pub const fn width(&self) -> u64 {
        self.upper.saturating_sub(self.lower)
    }

    /// The candidate halfway between the two sides.
    pub fn midpoint(&self) -> Option<u64> {
        self.candidates().map(|range| range.start() + (range.end() - range.start()) / 2)
    }
}

/// Computes the next block to probe from `current`, jumping by `skip` blocks.
///
/// The jump is clamped into the [`SearchWindow`] (which never extends past the chain head or
/// below [`FIRST_BLOCK`]). If the resulting block has already been probed for this target the
/// jump grows away from zero by a doubling stride and is retried; once the window edge in the
/// direction of travel is exhausted, the unprobed candidate closest to that edge is taken
/// instead. The chosen block is recorded in `history`.
///
/// Returns `None` when every candidate in the window has been probed.
pub fn next_probe(
    current: u64,
    skip: i64,
    window: &SearchWindow,
    history: &mut ProbeHistory,
) -> Option<u64> {
    let range = window.candidates()?;
    let (low, high) = (*range.start(), *range.end());

    let mut skip = if skip == 0 { 1 } else { skip };
    let mut stride: i64 = 1;
    loop {
        let candidate = current.saturating_add_signed(skip).clamp(low, high);
        if history.insert(candidate) {
            return Some(candidate);
        }
        let edge = if skip > 0 { high } else { low };
        if candidate == edge {
            break;
        }
        skip = if skip > 0 { skip.saturating_add(stride) } else { skip.saturating_sub(stride) };
        stride = stride.saturating_mul(2);
    }

    let fallback = if skip > 0 {
        range.rev().find(|block| !history.contains(*block))
    } else {
        range.into_iter().find(|block| !history.contains(*block))
    };
    fallback.inspect(|block| {
        history.insert(*block);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Block `k` is mined at `1000 + 10k`, head at 100.
    fn linear_chain() -> ChainBoundaries {
        ChainBoundaries { first: Block::new(1, 1_010), latest: Block::new(100, 2_000) }
    }

    #[test]
    fn test_window_starts_at_boundaries() {
        let window = SearchWindow::new(BlockBoundary::AtOrBefore, 1_325, &linear_chain());
        assert_eq!(window.candidates(), Some(2..=99));
        assert_eq!(window.width(), 99);
        assert_eq!(window.resolved(), None);

        // A target equal to the first timestamp is answered by the first block itself.
        let window = SearchWindow::new(BlockBoundary::AtOrAfter, 1_010, &linear_chain());
        assert_eq!(window.resolved(), Some(1));
    }

    #[test]
    fn test_window_resolves_at_or_before() {
        let mut window = SearchWindow::new(BlockBoundary::AtOrBefore, 1_325, &linear_chain());
        window.observe(&Block::new(32, 1_320));
        assert_eq!(window.resolved(), None);
        window.observe(&Block::new(33, 1_330));
        assert_eq!(window.resolved(), Some(32));
        assert_eq!(window.candidates(), None);
    }

    #[test]
    fn test_window_resolves_at_or_after() {
        let mut window = SearchWindow::new(BlockBoundary::AtOrAfter, 1_325, &linear_chain());
        window.observe(&Block::new(33, 1_330));
        window.observe(&Block::new(32, 1_320));
        assert_eq!(window.resolved(), Some(33));
    }

    #[test]
    fn test_window_midpoint() {
        let mut window = SearchWindow::new(BlockBoundary::AtOrBefore, 1_325, &linear_chain());
        window.observe(&Block::new(20, 1_200));
        window.observe(&Block::new(40, 1_400));
        assert_eq!(window.midpoint(), Some(30));
    }

    #[test]
    fn test_next_probe_applies_skip() {
        let window = SearchWindow::new(BlockBoundary::AtOrBefore, 1_325, &linear_chain());
        let mut history = ProbeHistory::new(1_325);
        assert_eq!(next_probe(30, 2, &window, &mut history), Some(32));
        assert_eq!(next_probe(40, -8, &window, &mut history), Some(31));
        assert!(history.contains(32) && history.contains(31));
    }

    #[test]
    fn test_next_probe_clamps_to_window() {
        let window = SearchWindow::new(BlockBoundary::AtOrBefore, 1_325, &linear_chain());
        let mut history = ProbeHistory::new(1_325);
        assert_eq!(next_probe(90, 500, &window, &mut history), Some(99));
        assert_eq!(next_probe(10, -500, &window, &mut history), Some(2));
    }

    #[test]
    fn test_next_probe_avoids_reprobing() {
        let window = SearchWindow::new(BlockBoundary::AtOrBefore, 1_325, &linear_chain());
        let mut history = ProbeHistory::new(1_325);
        history.insert(32);
        history.insert(33);
        // 30 + 2 and 30 + 3 are taken, the stride then doubles to reach 30 + 5.
        assert_eq!(next_probe(30, 2, &window, &mut history), Some(35));

        history.insert(28);
        assert_eq!(next_probe(30, -2, &window, &mut history), Some(27));
    }

    #[test]
    fn test_next_probe_falls_back_when_edge_exhausted() {
        let window = SearchWindow::new(BlockBoundary::AtOrBefore, 1_325, &linear_chain());
        let mut history = ProbeHistory::new(1_325);
        for block in 95..=99 {
            history.insert(block);
        }
        assert_eq!(next_probe(97, 1, &window, &mut history), Some(94));
    }

    #[test]
    fn test_next_probe_exhausted_window() {
        let mut window = SearchWindow::new(BlockBoundary::AtOrBefore, 1_325, &linear_chain());
        window.observe(&Block::new(31, 1_310));
        window.observe(&Block::new(33, 1_330));
        let mut history = ProbeHistory::new(1_325);
        history.insert(32);
        assert_eq!(next_probe(31, 1, &window, &mut history), None);

        window.observe(&Block::new(32, 1_320));
        assert_eq!(next_probe(31, 1, &window, &mut history), None);
    }
}
