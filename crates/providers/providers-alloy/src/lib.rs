#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod abi;

mod call;

mod client;
pub use client::{HistoricalBalance, TokenClient};

mod erc20;
pub use erc20::{Erc20Metadata, Erc20Reader};

mod erc721;
pub use erc721::Erc721Reader;

mod erc1155;
pub use erc1155::Erc1155Reader;

mod errors;
pub use errors::TokenError;

mod fetcher;
pub use fetcher::AlloyBlockFetcher;

mod units;
pub use units::format_token_amount;

#[cfg(test)]
mod test_utils;
