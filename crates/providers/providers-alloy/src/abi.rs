//! ABI fragments of the token standards and helpers for their quirks.

use alloy_primitives::U256;
use alloy_sol_types::{SolCall, sol};

sol! {
    /// The read-only surface of ERC-20.
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
    }

    /// The read-only surface of ERC-721 with the metadata extension.
    interface IERC721 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function balanceOf(address owner) external view returns (uint256);
        function ownerOf(uint256 tokenId) external view returns (address);
        function tokenURI(uint256 tokenId) external view returns (string);
    }

    /// The read-only surface of ERC-1155 with the metadata URI extension.
    interface IERC1155 {
        function balanceOf(address account, uint256 id) external view returns (uint256);
        function balanceOfBatch(address[] accounts, uint256[] ids) external view returns (uint256[]);
        function uri(uint256 id) external view returns (string);
    }
}

/// Decodes a `string` return value, accepting the `bytes32` encoding of pre-standard tokens.
///
/// A `bytes32` value is read as ASCII up to the first NUL byte.
pub fn decode_string_or_bytes32<C>(data: &[u8]) -> Result<String, alloy_sol_types::Error>
where
    C: SolCall<Return = String>,
{
    C::abi_decode_returns(data).or_else(|err| {
        if data.len() != 32 {
            return Err(err);
        }
        let end = data.iter().position(|byte| *byte == 0).unwrap_or(data.len());
        Ok(String::from_utf8_lossy(&data[..end]).into_owned())
    })
}

/// Expands the `{id}` placeholder of an ERC-1155 metadata URI.
///
/// Clients substitute the id as 64 lowercase hex digits without a `0x` prefix.
pub fn substitute_token_id(uri: &str, id: U256) -> String {
    uri.replace("{id}", &alloy_primitives::hex::encode(id.to_be_bytes::<32>()))
}
