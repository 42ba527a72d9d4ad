//! Vote submission and confirmation.

use ballot_wallet_core::TransactionReceipt;

use crate::contract::{PendingTransaction, VotingContract};
use crate::error::VoteError;

/// Send a vote for `candidate_id` and wait until it is mined.
///
/// A reverted transaction is an error. Nothing is retried.
pub async fn cast_vote<C: VotingContract>(
    contract: &C,
    candidate_id: u64,
) -> Result<TransactionReceipt, VoteError> {
    let pending = contract.vote(candidate_id).await.map_err(|e| {
        if e.is_user_rejection() {
            VoteError::Rejected
        } else {
            VoteError::Submit(e)
        }
    })?;

    let tx_hash = pending.tx_hash();
    tracing::debug!(contract = %contract.address(), candidate_id, tx = %tx_hash, "awaiting confirmation");

    let receipt = pending
        .wait()
        .await
        .map_err(|source| VoteError::Confirmation { tx_hash, source })?;

    if !receipt.success {
        return Err(VoteError::Reverted {
            tx_hash,
            block_number: receipt.block_number,
        });
    }

    tracing::info!(
        contract = %contract.address(),
        candidate_id,
        tx = %tx_hash,
        block = receipt.block_number,
        "vote confirmed"
    );
    Ok(receipt)
}
