use ballot_contract::{ReadError, VoteError};
use ballot_store::StoreError;
use ballot_types::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no wallet connected")]
    NotConnected,

    #[error("failed to persist the contract address: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Vote(#[from] VoteError),

    #[error("load superseded by a newer request")]
    Superseded,
}
