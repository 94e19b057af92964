#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod backtrace;

mod error;
pub use error::{CliError, CliResult};

pub mod log;
pub use log::LogArgs;

mod styles;
pub use styles::cli_styles;

mod subscriber;
pub use subscriber::{init_tracing_subscriber, verbosity_level};
