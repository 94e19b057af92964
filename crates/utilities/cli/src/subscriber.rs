//! Tracing subscriber setup.

use crate::CliResult;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps a `-v` count to the most verbose [`Level`] that is emitted.
pub const fn verbosity_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs a global fmt subscriber writing to stderr.
///
/// Without an explicit `env_filter` the `RUST_LOG` environment variable is honoured. The
/// verbosity level is added as the default directive.
pub fn init_tracing_subscriber(verbosity: u8, env_filter: Option<EnvFilter>) -> CliResult<()> {
    let level = verbosity_level(verbosity);
    let filter = env_filter.unwrap_or_else(EnvFilter::from_default_env).add_directive(level.into());
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
