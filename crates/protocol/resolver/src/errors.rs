//! Error types for the resolver.

use crate::BlockId;
use thiserror::Error;

/// An error returned by a [`crate::BlockFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The upstream node could not serve the request.
    #[error("upstream error: {0}")]
    Upstream(String),
    /// The upstream node answered, but the block could not be parsed.
    #[error("malformed block: {0}")]
    Malformed(String),
}

/// Errors that can occur while resolving a timestamp to a block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    /// Fetching a block failed.
    #[error("failed to fetch block {id}: {reason}")]
    Upstream {
        /// The block that was requested.
        id: BlockId,
        /// The reason reported by the fetcher.
        reason: String,
    },

    /// A fetched block could not be parsed.
    #[error("malformed response for block {id}: {reason}")]
    MalformedResponse {
        /// The block that was requested.
        id: BlockId,
        /// What was wrong with the response.
        reason: String,
    },

    /// The chain is too short to estimate an average block interval.
    #[error("insufficient chain data: latest block is {latest}")]
    InsufficientChainData {
        /// The number of the chain head.
        latest: u64,
    },

    /// The probe ceiling was reached before an optimal block was found.
    #[error("resolution of timestamp {target} did not converge within {probes} probes")]
    ResolutionTimeout {
        /// The timestamp being resolved.
        target: u64,
        /// The number of probes issued.
        probes: usize,
    },

    /// Every candidate block has been probed without finding an optimal one.
    ///
    /// Only reachable when block timestamps are not monotonic.
    #[error("no unprobed block remains for timestamp {target}")]
    SearchExhausted {
        /// The timestamp being resolved.
        target: u64,
    },
}

impl ResolverError {
    /// Attributes a [`FetchError`] to the block it was raised for.
    pub fn from_fetch(id: BlockId, err: FetchError) -> Self {
        match err {
            FetchError::Upstream(reason) => Self::Upstream { id, reason },
            FetchError::Malformed(reason) => Self::MalformedResponse { id, reason },
        }
    }
}

/// A [`Result`] alias for the resolver.
pub type ResolverResult<T> = Result<T, ResolverError>;
