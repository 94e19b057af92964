//! Logging arguments shared by every binary.

use crate::{CliResult, init_tracing_subscriber};
use clap::{ArgAction, Args};
use tracing_subscriber::EnvFilter;

/// Logging arguments.
#[derive(Args, Default, Clone, Debug)]
pub struct LogArgs {
    /// Verbosity level (0-4). Each `-v` raises the level from ERROR towards TRACE.
    #[arg(short = 'v', long = "verbosity", global = true, action = ArgAction::Count)]
    pub v: u8,
    /// Log filter directives in `RUST_LOG` syntax, e.g. `resolver=trace`.
    #[arg(long = "log.filter", global = true, env = "TOKSCAN_LOG")]
    pub filter: Option<String>,
}

impl LogArgs {
    /// Installs the global tracing subscriber for these arguments.
    pub fn init_tracing(&self) -> CliResult<()> {
        let filter = self.filter.as_deref().map(EnvFilter::try_new).transpose()?;
        init_tracing_subscriber(self.v, filter)
    }
}
