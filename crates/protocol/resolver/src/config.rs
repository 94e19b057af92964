//! Configuration for the [`crate::BlockResolver`].

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

/// The default timeout applied to each block fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Headroom added on top of the logarithmic probe ceiling.
const PROBE_CEILING_MARGIN: usize = 16;

/// Which side of the target timestamp the resolved block sits on.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockBoundary {
    /// The last block mined at or before the timestamp.
    #[default]
    #[display("before")]
    AtOrBefore,
    /// The first block mined at or after the timestamp.
    #[display("after")]
    AtOrAfter,
}

/// An error parsing a [`BlockBoundary`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid block boundary `{0}`, expected `before` or `after`")]
pub struct ParseBoundaryError(String);

impl FromStr for BlockBoundary {
    type Err = ParseBoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" | "at_or_before" => Ok(Self::AtOrBefore),
            "after" | "at_or_after" => Ok(Self::AtOrAfter),
            _ => Err(ParseBoundaryError(s.to_string())),
        }
    }
}

/// Tunables for a [`crate::BlockResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Which block is returned for a timestamp that falls between two blocks.
    pub boundary: BlockBoundary,
    /// The maximum number of probes for a single resolution.
    ///
    /// When unset, the ceiling is derived from the chain length.
    pub max_probes: Option<usize>,
    /// The timeout applied to each block fetch.
    pub fetch_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { boundary: BlockBoundary::default(), max_probes: None, fetch_timeout: DEFAULT_FETCH_TIMEOUT }
    }
}

impl ResolverConfig {
    /// Sets the [`BlockBoundary`].
    pub const fn with_boundary(mut self, boundary: BlockBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Sets an explicit probe ceiling.
    pub const fn with_max_probes(mut self, max_probes: usize) -> Self {
        self.max_probes = Some(max_probes);
        self
    }

    /// Sets the per-fetch timeout.
    pub const fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Returns the probe ceiling for a chain whose head is `latest`.
    ///
    /// Every three probes at least halve the search window, so `3 * ceil(log2(latest + 1))`
    /// probes always suffice on a chain with non-decreasing timestamps.
    pub fn probe_ceiling(&self, latest: u64) -> usize {
        self.max_probes.unwrap_or_else(|| {
            let bits = (u64::BITS - latest.saturating_add(1).leading_zeros()) as usize;
            3 * bits + PROBE_CEILING_MARGIN
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("before", BlockBoundary::AtOrBefore)]
    #[case("AFTER", BlockBoundary::AtOrAfter)]
    #[case("at_or_before", BlockBoundary::AtOrBefore)]
    #[case("at_or_after", BlockBoundary::AtOrAfter)]
    fn test_parse_boundary(#[case] input: &str, #[case] expected: BlockBoundary) {
        assert_eq!(input.parse::<BlockBoundary>().unwrap(), expected);
    }

    #[test]
    fn test_parse_boundary_invalid() {
        let err = "sideways".parse::<BlockBoundary>().unwrap_err();
        assert!(err.to_string().contains("sideways"));
    }

    #[rstest]
    #[case(0, 19)]
    #[case(1, 22)]
    #[case(100, 37)]
    #[case(20_000_000, 91)]
    fn test_default_probe_ceiling(#[case] latest: u64, #[case] expected: usize) {
        assert_eq!(ResolverConfig::default().probe_ceiling(latest), expected);
    }

    #[test]
    fn test_explicit_probe_ceiling() {
        let config = ResolverConfig::default().with_max_probes(4);
        assert_eq!(config.probe_ceiling(20_000_000), 4);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: ResolverConfig =
            serde_json::from_str(r#"{ "boundary": "at_or_after", "max_probes": 12 }"#).unwrap();
        assert_eq!(config.boundary, BlockBoundary::AtOrAfter);
        assert_eq!(config.max_probes, Some(12));
        assert_eq!(config.fetch_timeout, DEFAULT_FETCH_TIMEOUT);
    }
}
