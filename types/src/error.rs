//! Validation errors for user- and provider-supplied values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("invalid transaction hash: {0:?}")]
    InvalidTxHash(String),
}
