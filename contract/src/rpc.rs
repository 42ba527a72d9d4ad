//! Voting contract bound to a wallet signer over JSON-RPC.

use std::time::Duration;

use ballot_types::{Address, Candidate, TxHash};
use ballot_wallet_core::{Signer, TransactionReceipt};

use crate::abi;
use crate::contract::{ContractConnector, PendingTransaction, VotingContract};
use crate::error::ContractError;

/// How often a pending vote's receipt is polled by default.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Hands out [`RpcVotingContract`]s that call and sign through one wallet signer.
#[derive(Clone)]
pub struct SignerConnector {
    signer: Signer,
    poll_interval: Duration,
}

impl SignerConnector {
    pub fn new(signer: Signer) -> Self {
        Self {
            signer,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }
}

impl ContractConnector for SignerConnector {
    type Contract = RpcVotingContract;

    fn at(&self, address: &Address) -> RpcVotingContract {
        RpcVotingContract {
            address: address.clone(),
            signer: self.signer.clone(),
            poll_interval: self.poll_interval,
        }
    }
}

pub struct RpcVotingContract {
    address: Address,
    signer: Signer,
    poll_interval: Duration,
}

impl RpcVotingContract {
    async fn call(&self, signature: &str, args: &[u64]) -> Result<Vec<u8>, ContractError> {
        tracing::debug!(contract = %self.address, function = signature, ?args, "contract call");
        let data = abi::encode_call(signature, args);
        Ok(self.signer.call(&self.address, &data).await?)
    }
}

impl VotingContract for RpcVotingContract {
    type Pending = RpcPendingVote;

    fn address(&self) -> &Address {
        &self.address
    }

    async fn vote_topic(&self) -> Result<String, ContractError> {
        let data = self.call(abi::VOTE_TOPIC, &[]).await?;
        Ok(abi::decode_string(&data, 0)?)
    }

    async fn candidates_count(&self) -> Result<u64, ContractError> {
        let data = self.call(abi::CANDIDATES_COUNT, &[]).await?;
        Ok(abi::decode_uint(&data, 0)?)
    }

    async fn candidate(&self, index: u64) -> Result<Candidate, ContractError> {
        let data = self.call(abi::CANDIDATES, &[index]).await?;
        Ok(abi::decode_candidate(&data)?)
    }

    async fn vote(&self, candidate_id: u64) -> Result<RpcPendingVote, ContractError> {
        let data = abi::encode_call(abi::VOTE, &[candidate_id]);
        let tx_hash = self.signer.send_transaction(&self.address, &data).await?;
        Ok(RpcPendingVote {
            signer: self.signer.clone(),
            tx_hash,
            poll_interval: self.poll_interval,
        })
    }
}

/// A submitted vote transaction, confirmed by polling for its receipt.
pub struct RpcPendingVote {
    signer: Signer,
    tx_hash: TxHash,
    poll_interval: Duration,
}

impl PendingTransaction for RpcPendingVote {
    fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    async fn wait(self) -> Result<TransactionReceipt, ContractError> {
        loop {
            if let Some(receipt) = self.signer.transaction_receipt(&self.tx_hash).await? {
                return Ok(receipt);
            }
            tracing::trace!(tx = %self.tx_hash, "receipt not available yet");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
