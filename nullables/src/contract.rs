//! Nullable voting contract: scripted replies, recorded calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ballot_contract::{
    AbiError, ContractConnector, ContractError, PendingTransaction, VotingContract,
};
use ballot_types::{Address, Candidate, TxHash};
use ballot_wallet_core::{ProviderError, TransactionReceipt};

/// Block number assigned to the first confirmed null transaction.
const FIRST_BLOCK: u64 = 100;

/// Where a scripted contract should fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailAt {
    Topic,
    Count,
    Candidate(u64),
    /// The vote is refused by the node.
    Vote,
    /// The user declines the vote in the wallet.
    VoteRejected,
    /// The vote is submitted but waiting for its receipt fails.
    Confirmation,
}

/// The state of one deployed null contract.
#[derive(Clone, Debug, Default)]
pub struct ContractScript {
    pub topic: String,
    pub candidates: Vec<Candidate>,
    pub fail_at: Option<FailAt>,
    /// Votes are mined but reverted.
    pub revert_votes: bool,
}

/// A remote call as seen by the null contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteCall {
    VoteTopic(String),
    CandidatesCount(String),
    Candidate(String, u64),
    Vote(String, u64),
    Confirm(TxHash),
}

#[derive(Default)]
struct State {
    contracts: HashMap<String, ContractScript>,
    calls: Vec<RemoteCall>,
    sent: u64,
    confirmed: u64,
}

/// A [`ContractConnector`] over in-memory contracts.
///
/// Clones share the same contracts and call log.
#[derive(Clone, Default)]
pub struct NullConnector {
    state: Arc<Mutex<State>>,
    yield_on_call: bool,
}

impl NullConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy a contract at `address` with the given topic and candidates.
    pub fn with_contract(self, address: &str, topic: &str, candidates: Vec<Candidate>) -> Self {
        self.state.lock().unwrap().contracts.insert(
            address.to_ascii_lowercase(),
            ContractScript {
                topic: topic.to_string(),
                candidates,
                ..ContractScript::default()
            },
        );
        self
    }

    /// Yield to the scheduler before every call, so concurrent operations interleave.
    pub fn yielding(mut self) -> Self {
        self.yield_on_call = true;
        self
    }

    /// Make the contract at `address` fail at the given step (or stop failing).
    pub fn fail_at(&self, address: &str, fail_at: Option<FailAt>) {
        self.update(address, |script| script.fail_at = fail_at);
    }

    /// Make votes on the contract at `address` revert.
    pub fn revert_votes(&self, address: &str) {
        self.update(address, |script| script.revert_votes = true);
    }

    /// Current state of the contract at `address`.
    pub fn script(&self, address: &str) -> Option<ContractScript> {
        self.state
            .lock()
            .unwrap()
            .contracts
            .get(&address.to_ascii_lowercase())
            .cloned()
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    fn update(&self, address: &str, f: impl FnOnce(&mut ContractScript)) {
        let mut state = self.state.lock().unwrap();
        if let Some(script) = state.contracts.get_mut(&address.to_ascii_lowercase()) {
            f(script);
        }
    }
}

impl ContractConnector for NullConnector {
    type Contract = NullContract;

    fn at(&self, address: &Address) -> NullContract {
        NullContract {
            address: address.clone(),
            state: self.state.clone(),
            yield_on_call: self.yield_on_call,
        }
    }
}

/// A contract handle produced by [`NullConnector`].
pub struct NullContract {
    address: Address,
    state: Arc<Mutex<State>>,
    yield_on_call: bool,
}

fn reverted() -> ContractError {
    ContractError::Provider(ProviderError::Rpc {
        code: -32000,
        message: "execution reverted".into(),
    })
}

/// What `eth_call` against an address without code decodes to.
fn no_code() -> ContractError {
    ContractError::Abi(AbiError::OutOfBounds { needed: 32, len: 0 })
}

impl NullContract {
    fn key(&self) -> String {
        self.address.as_str().to_ascii_lowercase()
    }

    /// Record `call`, then read the contract script.
    async fn enter(&self, call: RemoteCall) -> Result<ContractScript, ContractError> {
        if self.yield_on_call {
            tokio::task::yield_now().await;
        }
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.contracts.get(&self.key()).cloned().ok_or_else(no_code)
    }
}

impl VotingContract for NullContract {
    type Pending = NullPendingVote;

    fn address(&self) -> &Address {
        &self.address
    }

    async fn vote_topic(&self) -> Result<String, ContractError> {
        let script = self.enter(RemoteCall::VoteTopic(self.key())).await?;
        if script.fail_at == Some(FailAt::Topic) {
            return Err(reverted());
        }
        Ok(script.topic)
    }

    async fn candidates_count(&self) -> Result<u64, ContractError> {
        let script = self.enter(RemoteCall::CandidatesCount(self.key())).await?;
        if script.fail_at == Some(FailAt::Count) {
            return Err(reverted());
        }
        Ok(script.candidates.len() as u64)
    }

    async fn candidate(&self, index: u64) -> Result<Candidate, ContractError> {
        let script = self.enter(RemoteCall::Candidate(self.key(), index)).await?;
        if script.fail_at == Some(FailAt::Candidate(index)) {
            return Err(reverted());
        }
        usize::try_from(index)
            .ok()
            .and_then(|i| script.candidates.get(i).cloned())
            .ok_or_else(reverted)
    }

    async fn vote(&self, candidate_id: u64) -> Result<NullPendingVote, ContractError> {
        let script = self.enter(RemoteCall::Vote(self.key(), candidate_id)).await?;
        match script.fail_at {
            Some(FailAt::Vote) => return Err(reverted()),
            Some(FailAt::VoteRejected) => {
                return Err(ContractError::Provider(ProviderError::Rpc {
                    code: 4001,
                    message: "User rejected the request.".into(),
                }))
            }
            _ => {}
        }

        let mut state = self.state.lock().unwrap();
        state.sent += 1;
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&state.sent.to_be_bytes());
        Ok(NullPendingVote {
            key: self.key(),
            candidate_id,
            tx_hash: TxHash::new(bytes),
            state: self.state.clone(),
            yield_on_call: self.yield_on_call,
        })
    }
}

/// A vote sent to a [`NullContract`]. Confirming it counts the vote.
pub struct NullPendingVote {
    key: String,
    candidate_id: u64,
    tx_hash: TxHash,
    state: Arc<Mutex<State>>,
    yield_on_call: bool,
}

impl PendingTransaction for NullPendingVote {
    fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    async fn wait(self) -> Result<TransactionReceipt, ContractError> {
        if self.yield_on_call {
            tokio::task::yield_now().await;
        }
        let mut state = self.state.lock().unwrap();
        state.calls.push(RemoteCall::Confirm(self.tx_hash));

        let script = state.contracts.get_mut(&self.key).ok_or_else(no_code)?;
        if script.fail_at == Some(FailAt::Confirmation) {
            return Err(ContractError::Provider(ProviderError::Transport(
                "connection reset while polling receipt".into(),
            )));
        }

        let success = !script.revert_votes;
        if success {
            if let Some(candidate) = script
                .candidates
                .iter_mut()
                .find(|c| c.id == self.candidate_id)
            {
                candidate.count += 1;
            }
        }

        let block_number = FIRST_BLOCK + state.confirmed;
        state.confirmed += 1;
        Ok(TransactionReceipt {
            tx_hash: self.tx_hash,
            block_number,
            success,
        })
    }
}
