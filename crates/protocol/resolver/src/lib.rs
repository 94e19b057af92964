#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod block;
pub use block::{Block, BlockId, FIRST_BLOCK};

mod boundaries;
pub use boundaries::ChainBoundaries;

mod cache;
pub use cache::BlockCache;

mod config;
pub use config::{BlockBoundary, DEFAULT_FETCH_TIMEOUT, ParseBoundaryError, ResolverConfig};

mod errors;
pub use errors::{FetchError, ResolverError, ResolverResult};

mod history;
pub use history::ProbeHistory;

mod interval;
pub use interval::AverageInterval;

mod metrics;
pub use metrics::describe_resolver_metrics;

mod resolver;
pub use resolver::BlockResolver;

mod step;
pub use step::{SearchWindow, next_probe};

mod traits;
pub use traits::BlockFetcher;
#[cfg(any(test, feature = "test-utils"))]
pub use traits::MockBlockFetcher;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
