//! Mocked providers for the reader tests.

use alloy_provider::RootProvider;
use alloy_rpc_client::RpcClient;
use alloy_transport::mock::{Asserter, MockTransport};

/// Returns a provider answering from the returned [`Asserter`]'s queue.
pub(crate) fn mock_provider() -> (Asserter, RootProvider) {
    let asserter = Asserter::new();
    let transport = MockTransport::new(asserter.clone());
    (asserter, RootProvider::new(RpcClient::new(transport, false)))
}
