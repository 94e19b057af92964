//! The running estimate of seconds per block.

use crate::Block;
use std::sync::atomic::{AtomicU64, Ordering};

/// A lock-free, always-positive estimate of the average block interval in seconds.
///
/// The estimate is stored as the bit pattern of an [`f64`]; an all-zero pattern means no estimate
/// has been recorded yet, which is never a valid interval.
#[derive(Debug, Default)]
pub struct AverageInterval(AtomicU64);

impl AverageInterval {
    /// Returns the current estimate, if any.
    pub fn get(&self) -> Option<f64> {
        let bits = self.0.load(Ordering::Acquire);
        (bits != 0).then(|| f64::from_bits(bits))
    }

    /// Records `seconds` as the new estimate.
    ///
    /// Returns `false` and keeps the previous estimate if `seconds` is not a finite, positive
    /// number.
    pub fn set(&self, seconds: f64) -> bool {
        if !seconds.is_finite() || seconds <= 0.0 {
            return false;
        }
        self.0.store(seconds.to_bits(), Ordering::Release);
        true
    }

    /// Re-derives the estimate from two observed blocks.
    ///
    /// Blocks at the same height or with the same timestamp carry no information about the
    /// interval and leave the estimate untouched.
    pub fn refine(&self, a: &Block, b: &Block) -> Option<f64> {
        let blocks = a.number.abs_diff(b.number);
        let seconds = a.timestamp.abs_diff(b.timestamp);
        if blocks == 0 || seconds == 0 {
            return None;
        }
        let interval = seconds as f64 / blocks as f64;
        self.set(interval).then_some(interval)
    }
}
