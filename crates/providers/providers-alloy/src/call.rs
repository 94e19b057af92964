//! `eth_call` plumbing shared by the token readers.

use crate::TokenError;
use alloy_eips::BlockId;
use alloy_primitives::{Address, Bytes};
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;
use alloy_sol_types::SolCall;
use tracing::trace;

/// Executes `call` against `contract` and returns the raw return data.
///
/// Without a `block` the node's latest state is read.
pub(crate) async fn call_raw<P, C>(
    provider: &P,
    contract: Address,
    call: &C,
    block: Option<BlockId>,
) -> Result<Bytes, TokenError>
where
    P: Provider,
    C: SolCall,
{
    let tx = TransactionRequest::default().to(contract).input(Bytes::from(call.abi_encode()).into());
    let mut request = provider.call(tx);
    if let Some(block) = block {
        request = request.block(block);
    }

    let data = request.await.map_err(|source| TokenError::Transport {
        contract,
        method: C::SIGNATURE,
        source,
    })?;
    trace!(target: "tokens", %contract, method = C::SIGNATURE, ?block, len = data.len(), "eth_call");
    Ok(data)
}

/// Executes `call` against `contract` and decodes its return value.
pub(crate) async fn call_decoded<P, C>(
    provider: &P,
    contract: Address,
    call: &C,
    block: Option<BlockId>,
) -> Result<C::Return, TokenError>
where
    P: Provider,
    C: SolCall,
{
    let data = call_raw(provider, contract, call, block).await?;
    C::abi_decode_returns(&data).map_err(|source| decode_error::<C>(contract, source))
}

pub(crate) fn decode_error<C: SolCall>(
    contract: Address,
    source: alloy_sol_types::Error,
) -> TokenError {
    TokenError::Decode { contract, method: C::SIGNATURE, source }
}
