//! Client side of the on-chain voting contract.
//!
//! - [`abi`]: encoding calls and decoding return data for the fixed voting ABI
//! - [`VotingContract`]: the remote interface (three reads, one vote)
//! - [`rpc`]: the interface bound to a wallet [`Signer`](ballot_wallet_core::Signer)
//! - [`ContractReader`]: topic + candidate list retrieval
//! - [`cast_vote`]: vote submission and confirmation

pub mod abi;
pub mod contract;
pub mod error;
pub mod reader;
pub mod rpc;
pub mod vote;

pub use contract::{ContractConnector, PendingTransaction, VotingContract};
pub use error::{AbiError, ContractError, ReadError, VoteError};
pub use reader::{candidate_stream, ContractReader};
pub use rpc::{RpcPendingVote, RpcVotingContract, SignerConnector};
pub use vote::cast_vote;
