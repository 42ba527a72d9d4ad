//! JSON-RPC hex quantities (`"0x1a"`).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity is missing the 0x prefix: {0:?}")]
    MissingPrefix(String),

    #[error("invalid quantity {0:?}")]
    Invalid(String),
}

/// Parse a hex quantity such as `"0x1"` into a `u64`.
pub fn parse_quantity(s: &str) -> Result<u64, QuantityError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| QuantityError::MissingPrefix(s.to_string()))?;
    if digits.is_empty() {
        return Err(QuantityError::Invalid(s.to_string()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| QuantityError::Invalid(s.to_string()))
}

/// Render a `u64` as a minimal hex quantity.
pub fn to_quantity(value: u64) -> String {
    format!("{value:#x}")
}
