//! Block types consumed by the resolver.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The number of the first block considered by the resolver.
///
/// Genesis is skipped because its timestamp is frequently set by hand and does not reflect
/// when the chain actually started producing blocks.
pub const FIRST_BLOCK: u64 = 1;

/// A block height paired with the UNIX timestamp (in seconds) it was mined at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Block {
    /// The block number.
    pub number: u64,
    /// The block timestamp, in seconds since the UNIX epoch.
    pub timestamp: u64,
}

impl Block {
    /// Creates a new [`Block`].
    pub const fn new(number: u64, timestamp: u64) -> Self {
        Self { number, timestamp }
    }
}

/// Identifies a block to fetch.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockId {
    /// A block at a specific height.
    #[display("{_0}")]
    Number(u64),
    /// The current chain head.
    #[display("latest")]
    Latest,
}

impl BlockId {
    /// The identifier of [`FIRST_BLOCK`].
    pub const FIRST: Self = Self::Number(FIRST_BLOCK);

    /// Returns the block number, if this identifier names one.
    pub const fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Latest => None,
        }
    }
}

impl From<u64> for BlockId {
    fn from(number: u64) -> Self {
        Self::Number(number)
    }
}
