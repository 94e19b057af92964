//! Tracks which blocks have been probed while resolving one timestamp.

use std::collections::BTreeSet;

/// The set of block numbers already probed for a single target timestamp.
///
/// A history lives exactly as long as the resolution call that owns it, so entries for a
/// timestamp are dropped as soon as that timestamp has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistory {
    target: u64,
    probed: BTreeSet<u64>,
}

impl ProbeHistory {
    /// Creates an empty history for `target`.
    pub const fn new(target: u64) -> Self {
        Self { target, probed: BTreeSet::new() }
    }

    /// The timestamp this history belongs to.
    pub const fn target(&self) -> u64 {
        self.target
    }

    /// Records `block` as probed. Returns `false` if it already was.
    pub fn insert(&mut self, block: u64) -> bool {
        self.probed.insert(block)
    }

    /// Returns whether `block` has been probed.
    pub fn contains(&self, block: u64) -> bool {
        self.probed.contains(&block)
    }

    /// The number of distinct blocks probed so far.
    pub fn len(&self) -> usize {
        self.probed.len()
    }

    /// Returns `true` if nothing has been probed yet.
    pub fn is_empty(&self) -> bool {
        self.probed.is_empty()
    }
}
