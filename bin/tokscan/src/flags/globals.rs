//! Global arguments for the CLI.

use clap::Parser;
use std::time::Duration;
use tokscan_cli::LogArgs;
use tokscan_resolver::{BlockBoundary, ResolverConfig};
use url::Url;

/// Global arguments for the CLI.
#[derive(Parser, Clone, Debug)]
pub struct GlobalArgs {
    /// Logging arguments.
    #[command(flatten)]
    pub log_args: LogArgs,
    /// URL of the JSON-RPC endpoint of an EVM execution client.
    #[arg(long = "rpc-url", visible_alias = "rpc", env = "TOKSCAN_RPC_URL")]
    pub rpc_url: Url,
    /// Timeout for a single block fetch, in seconds.
    #[arg(long = "fetch-timeout", default_value_t = 30, env = "TOKSCAN_FETCH_TIMEOUT")]
    pub fetch_timeout: u64,
    /// Maximum number of probes for one timestamp. Derived from the chain length when unset.
    #[arg(long = "max-probes", env = "TOKSCAN_MAX_PROBES")]
    pub max_probes: Option<usize>,
    /// Which block a timestamp between two blocks resolves to: `before` or `after`.
    #[arg(long, default_value_t = BlockBoundary::AtOrBefore, env = "TOKSCAN_BOUNDARY")]
    pub boundary: BlockBoundary,
}

impl GlobalArgs {
    /// Returns the [`ResolverConfig`] described by the flags.
    pub fn resolver_config(&self) -> ResolverConfig {
        let config = ResolverConfig::default()
            .with_boundary(self.boundary)
            .with_fetch_timeout(Duration::from_secs(self.fetch_timeout));
        match self.max_probes {
            Some(max_probes) => config.with_max_probes(max_probes),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokscan_resolver::DEFAULT_FETCH_TIMEOUT;

    #[test]
    fn test_defaults() {
        let args = GlobalArgs::try_parse_from(["tokscan", "--rpc-url", "http://localhost:8545"])
            .unwrap();
        assert_eq!(args.rpc_url.as_str(), "http://localhost:8545/");
        assert_eq!(args.resolver_config(), ResolverConfig::default());
        assert_eq!(args.resolver_config().fetch_timeout, DEFAULT_FETCH_TIMEOUT);
    }

    #[test]
    fn test_resolver_overrides() {
        let args = GlobalArgs::try_parse_from([
            "tokscan",
            "--rpc",
            "https://eth.llamarpc.com",
            "--fetch-timeout",
            "5",
            "--max-probes",
            "64",
            "--boundary",
            "after",
        ])
        .unwrap();
        let config = args.resolver_config();
        assert_eq!(config.boundary, BlockBoundary::AtOrAfter);
        assert_eq!(config.max_probes, Some(64));
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_boundary() {
        let err = GlobalArgs::try_parse_from([
            "tokscan",
            "--rpc-url",
            "http://localhost:8545",
            "--boundary",
            "sideways",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
