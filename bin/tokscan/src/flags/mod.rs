//! CLI flags shared across subcommands.

mod globals;
pub use globals::GlobalArgs;

mod block;
pub use block::BlockArgs;
