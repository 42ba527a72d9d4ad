//! The remote voting contract interface.

use ballot_types::{Address, Candidate, TxHash};
use ballot_wallet_core::TransactionReceipt;

use crate::error::ContractError;

/// One deployed voting contract.
///
/// Mirrors the contract's ABI: three read-only entry points and `vote`.
#[allow(async_fn_in_trait)]
pub trait VotingContract {
    type Pending: PendingTransaction;

    /// Address the contract is deployed at.
    fn address(&self) -> &Address;

    async fn vote_topic(&self) -> Result<String, ContractError>;

    async fn candidates_count(&self) -> Result<u64, ContractError>;

    /// The candidate stored at on-chain `index`.
    async fn candidate(&self, index: u64) -> Result<Candidate, ContractError>;

    /// Send a vote for `candidate_id`. Returns once the transaction is submitted.
    async fn vote(&self, candidate_id: u64) -> Result<Self::Pending, ContractError>;
}

/// A submitted transaction that can be awaited until it is mined.
#[allow(async_fn_in_trait)]
pub trait PendingTransaction {
    fn tx_hash(&self) -> TxHash;

    /// Wait until the transaction is included in a block.
    async fn wait(self) -> Result<TransactionReceipt, ContractError>;
}

/// Binds contract addresses to a signing capability.
pub trait ContractConnector {
    type Contract: VotingContract;

    fn at(&self, address: &Address) -> Self::Contract;
}
