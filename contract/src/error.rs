//! Contract-level error types.

use ballot_types::TxHash;
use ballot_wallet_core::ProviderError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("return data too short: need {needed} bytes, got {len}")]
    OutOfBounds { needed: usize, len: usize },

    #[error("uint256 value does not fit in 64 bits")]
    Overflow,

    #[error("string is not valid UTF-8")]
    InvalidUtf8,
}

/// Failure of a single remote contract call.
#[derive(Debug, Clone, Error)]
pub enum ContractError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("malformed return data: {0}")]
    Abi(#[from] AbiError),
}

impl ContractError {
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Provider(e) if e.is_user_rejection())
    }
}

/// Failure while reading a contract's topic and candidates.
///
/// Names the step that failed; the remaining reads were not attempted.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read the vote topic")]
    Topic(#[source] ContractError),

    #[error("failed to read the candidate count")]
    Count(#[source] ContractError),

    #[error("failed to read candidate {index}")]
    Candidate {
        index: u64,
        #[source]
        source: ContractError,
    },
}

impl ReadError {
    /// The underlying call failure.
    pub fn cause(&self) -> &ContractError {
        match self {
            Self::Topic(e) | Self::Count(e) => e,
            Self::Candidate { source, .. } => source,
        }
    }
}

#[derive(Debug, Error)]
pub enum VoteError {
    #[error("vote was rejected in the wallet")]
    Rejected,

    #[error("failed to submit the vote")]
    Submit(#[source] ContractError),

    #[error("vote transaction {tx_hash} reverted in block {block_number}")]
    Reverted { tx_hash: TxHash, block_number: u64 },

    #[error("failed waiting for confirmation of {tx_hash}")]
    Confirmation {
        tx_hash: TxHash,
        #[source]
        source: ContractError,
    },
}
