//! Metrics emitted by the resolver when the `metrics` feature is enabled.

#[cfg(feature = "metrics")]
pub(crate) const BLOCK_FETCHES_NAME: &str = "tokscan_resolver_block_fetches";

#[cfg(feature = "metrics")]
pub(crate) const RESOLUTION_PROBES_NAME: &str = "tokscan_resolver_resolution_probes";

/// Describes all metrics a resolver may produce.
///
/// Call once at startup if metric descriptions are desired for observers like Prometheus. A
/// no-op without the `metrics` feature.
pub fn describe_resolver_metrics() {
    #[cfg(feature = "metrics")]
    {
        ::metrics::describe_counter!(
            BLOCK_FETCHES_NAME,
            ::metrics::Unit::Count,
            "Blocks fetched from the upstream node, excluding cache hits."
        );
        ::metrics::describe_histogram!(
            RESOLUTION_PROBES_NAME,
            ::metrics::Unit::Count,
            "Probes needed to resolve a timestamp that fell inside the chain."
        );
    }
}
