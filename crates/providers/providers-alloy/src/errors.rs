//! Error types for the token readers.

use alloy_primitives::{Address, utils::UnitsError};
use alloy_transport::TransportError;
use tokscan_resolver::ResolverError;

/// An error reading token state.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The `eth_call` itself failed.
    #[error("{method} on {contract} failed: {source}")]
    Transport {
        /// The called contract.
        contract: Address,
        /// The Solidity signature of the called function.
        method: &'static str,
        /// The transport error.
        #[source]
        source: TransportError,
    },
    /// The contract returned data that does not match the function's ABI.
    #[error("{method} on {contract} returned undecodable data: {source}")]
    Decode {
        /// The called contract.
        contract: Address,
        /// The Solidity signature of the called function.
        method: &'static str,
        /// The ABI decoding error.
        #[source]
        source: alloy_sol_types::Error,
    },
    /// Resolving a timestamp to a block failed.
    #[error(transparent)]
    Resolver(#[from] ResolverError),
    /// A token amount could not be scaled by its decimals.
    #[error(transparent)]
    Units(#[from] UnitsError),
}
