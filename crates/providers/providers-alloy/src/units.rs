//! Human readable token amounts.

use crate::TokenError;
use alloy_primitives::{U256, utils::format_units};

/// Scales a base unit `amount` down by `decimals`, trimming insignificant zeros.
///
/// `1_500_000` with 6 decimals formats as `1.5`.
pub fn format_token_amount(amount: U256, decimals: u8) -> Result<String, TokenError> {
    let formatted = format_units(amount, decimals)?;
    if !formatted.contains('.') {
        return Ok(formatted);
    }
    Ok(formatted.trim_end_matches('0').trim_end_matches('.').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(U256::from(1_500_000u64), 6, "1.5")]
    #[case(U256::from(10u64).pow(U256::from(18)), 18, "1")]
    #[case(U256::from(1u64), 18, "0.000000000000000001")]
    #[case(U256::ZERO, 18, "0")]
    #[case(U256::from(1_200u64), 0, "1200")]
    fn test_format_token_amount(#[case] amount: U256, #[case] decimals: u8, #[case] expected: &str) {
        assert_eq!(format_token_amount(amount, decimals).unwrap(), expected);
    }

    #[test]
    fn test_format_too_many_decimals() {
        assert!(matches!(format_token_amount(U256::from(1u64), 78), Err(TokenError::Units(_))));
    }
}
