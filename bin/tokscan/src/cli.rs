//! Contains the tokscan CLI.

use crate::{commands::Commands, flags::GlobalArgs};
use alloy_network::Ethereum;
use alloy_provider::RootProvider;
use alloy_rpc_client::RpcClient;
use anyhow::Result;
use clap::Parser;
use std::future::Future;
use tokscan_cli::cli_styles;
use tokscan_providers_alloy::{AlloyBlockFetcher, TokenClient};
use tokscan_resolver::BlockResolver;
use tracing::{debug, warn};

/// Query token state on any EVM chain as of any point in time.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, styles = cli_styles(), long_about = None)]
pub struct Cli {
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub global: GlobalArgs,
    /// The subcommand to run.
    #[command(subcommand)]
    pub subcommand: Commands,
}

impl Cli {
    /// Runs the CLI.
    pub fn run(self) -> Result<()> {
        self.global.log_args.init_tracing()?;
        Self::run_until_ctrl_c(self.exec())
    }

    /// Connects to the node and runs the subcommand, printing its output.
    pub async fn exec(self) -> Result<()> {
        let config = self.global.resolver_config();
        debug!(target: "tokscan", rpc_url = %self.global.rpc_url, ?config, "Connecting");

        // The fetcher and the provider share one HTTP client.
        let client = RpcClient::new_http(self.global.rpc_url);
        let provider = RootProvider::<Ethereum>::new(client.clone());
        let resolver = BlockResolver::with_config(AlloyBlockFetcher::new(client), config);

        let output = self.subcommand.execute(&TokenClient::new(provider, resolver)).await?;
        println!("{output}");
        Ok(())
    }

    /// Runs `fut` on a fresh multi-threaded runtime until it completes or ctrl-c is received.
    pub fn run_until_ctrl_c<F>(fut: F) -> Result<()>
    where
        F: Future<Output = Result<()>>,
    {
        let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
        rt.block_on(async move {
            tokio::select! {
                res = fut => res,
                _ = tokio::signal::ctrl_c() => {
                    warn!(target: "tokscan", "Received ctrl-c, shutting down");
                    Ok(())
                }
            }
        })
    }
}
