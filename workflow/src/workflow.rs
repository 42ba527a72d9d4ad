//! The voting workflow: one contract address, one session, one signer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use ballot_contract::{cast_vote, ContractConnector, ContractReader};
use ballot_store::KeyValueStore;
use ballot_types::{Address, AddressMatch, TxHash, ValidationError, VotingSession};
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::state::WorkflowState;

/// Storage key holding the last contract address the user loaded.
pub const CONTRACT_KEY: &str = "contract";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// How raw address input is matched.
    pub address_match: AddressMatch,
    /// Re-read the contract after a confirmed vote instead of leaving it to the user.
    pub auto_reload_after_vote: bool,
}

/// A confirmed vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// The re-read session, when auto-reload is on and the reload succeeded.
    pub session: Option<VotingSession>,
}

struct Inner {
    pending: String,
    committed: Option<Address>,
    session: VotingSession,
    state: WorkflowState,
    last_error: Option<String>,
}

impl Inner {
    /// The phase the stored data supports, used after an operation ends.
    fn settled_state(&self) -> WorkflowState {
        if self.session.is_loaded() {
            WorkflowState::Loaded
        } else if self.pending.is_empty() {
            WorkflowState::Empty
        } else {
            WorkflowState::AddressEntered
        }
    }

    fn fail(&mut self, error: &WorkflowError) {
        self.state = self.settled_state();
        self.last_error = Some(error.to_string());
    }

    /// Record `error`, leaving a phase owned by an in-flight operation alone.
    fn fail_unless_busy(&mut self, error: &WorkflowError) {
        if !self.state.is_busy() {
            self.state = self.settled_state();
        }
        self.last_error = Some(error.to_string());
    }
}

/// Drives address entry, contract loading and voting for one user session.
///
/// The signer is borrowed from the session provider; the workflow never
/// creates or tears it down. State lives behind a mutex that is never held
/// across an await, so operations may be started through a shared reference.
pub struct VotingWorkflow<'s, K, C> {
    store: K,
    signer: Option<&'s C>,
    config: WorkflowConfig,
    inner: Mutex<Inner>,
    load_generation: AtomicU64,
}

impl<'s, K: KeyValueStore, C: ContractConnector> VotingWorkflow<'s, K, C> {
    /// Create the workflow, restoring the cached contract address if any.
    ///
    /// Nothing is read from the contract until [`commit_and_load`](Self::commit_and_load).
    pub fn new(store: K, signer: Option<&'s C>, config: WorkflowConfig) -> Self {
        let cached = match store.get(CONTRACT_KEY) {
            Ok(cached) => cached,
            Err(e) => {
                tracing::warn!("failed to read cached contract address: {e}");
                None
            }
        };

        let mut inner = Inner {
            pending: String::new(),
            committed: None,
            session: VotingSession::default(),
            state: WorkflowState::Empty,
            last_error: None,
        };
        if let Some(raw) = cached {
            tracing::debug!(address = %raw, "restored cached contract address");
            inner.committed = Address::parse(&raw, config.address_match).ok();
            inner.pending = raw;
            inner.state = inner.settled_state();
        }

        Self {
            store,
            signer,
            config,
            inner: Mutex::new(inner),
            load_generation: AtomicU64::new(0),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach or detach the signing capability (wallet connect / disconnect).
    pub fn set_signer(&mut self, signer: Option<&'s C>) {
        self.signer = signer;
    }

    pub fn is_connected(&self) -> bool {
        self.signer.is_some()
    }

    /// Record raw address input. Not validated until it is committed.
    pub fn set_contract_address(&self, raw: impl Into<String>) {
        let mut inner = self.inner();
        inner.pending = raw.into();
        if !inner.state.is_busy() {
            inner.state = inner.settled_state();
        }
    }

    pub fn pending_address(&self) -> String {
        self.inner().pending.clone()
    }

    /// The address of the last accepted load.
    pub fn committed_address(&self) -> Option<Address> {
        self.inner().committed.clone()
    }

    /// Snapshot of the current voting session.
    pub fn session(&self) -> VotingSession {
        self.inner().session.clone()
    }

    pub fn state(&self) -> WorkflowState {
        self.inner().state
    }

    /// The most recent failure, cleared by the next successful operation.
    pub fn last_error(&self) -> Option<String> {
        self.inner().last_error.clone()
    }

    /// Validate and persist the pending address, then read its contract.
    ///
    /// On success the session is replaced wholesale. On failure it is left as
    /// it was. If another load starts before this one finishes, this one's
    /// result is dropped and [`WorkflowError::Superseded`] is returned.
    pub async fn commit_and_load(&self) -> Result<VotingSession, WorkflowError> {
        let (address, raw) = {
            let mut inner = self.inner();
            match Address::parse(&inner.pending, self.config.address_match) {
                Ok(address) => (address, inner.pending.clone()),
                Err(e) => {
                    let error = WorkflowError::Validation(e);
                    inner.fail(&error);
                    return Err(error);
                }
            }
        };

        if let Err(e) = self.store.set(CONTRACT_KEY, &raw) {
            let error = WorkflowError::Store(e);
            self.inner().fail(&error);
            return Err(error);
        }

        self.load(address).await
    }

    /// Read the contract at `address` into the session, superseding any load
    /// already in flight.
    ///
    /// `address` becomes the committed address while the read runs. If the
    /// read fails the previous committed address is put back.
    async fn load(&self, address: Address) -> Result<VotingSession, WorkflowError> {
        let generation = self.load_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let previous = {
            let mut inner = self.inner();
            inner.state = WorkflowState::Loading;
            inner.committed.replace(address.clone())
        };
        tracing::info!(contract = %address, generation, "loading voting contract");

        let Some(signer) = self.signer else {
            let error = WorkflowError::NotConnected;
            let mut inner = self.inner();
            inner.committed = previous;
            inner.fail(&error);
            return Err(error);
        };

        let result = ContractReader::new(signer).load_voting(&address).await;

        let mut inner = self.inner();
        if self.load_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(contract = %address, generation, "discarding superseded load");
            return Err(WorkflowError::Superseded);
        }

        match result {
            Ok(session) => {
                tracing::info!(
                    contract = %address,
                    topic = %session.topic,
                    candidates = session.candidates.len(),
                    "voting contract loaded"
                );
                inner.session = session.clone();
                inner.state = WorkflowState::Loaded;
                inner.last_error = None;
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(contract = %address, "failed to load voting contract: {e}");
                let error = WorkflowError::Read(e);
                inner.committed = previous;
                inner.fail(&error);
                Err(error)
            }
        }
    }

    /// Vote for `candidate_id` on the committed contract and wait for confirmation.
    ///
    /// With auto-reload off the local session is not refreshed; the caller
    /// should prompt the user to load again. A vote started while a load is
    /// in flight leaves the phase to that load.
    pub async fn submit_vote(&self, candidate_id: u64) -> Result<VoteReceipt, WorkflowError> {
        let address = {
            let mut inner = self.inner();
            match inner.committed.clone() {
                Some(address) => address,
                None => {
                    let error =
                        WorkflowError::Validation(ValidationError::InvalidAddress(inner.pending.clone()));
                    inner.fail_unless_busy(&error);
                    return Err(error);
                }
            }
        };

        let Some(signer) = self.signer else {
            let error = WorkflowError::NotConnected;
            self.inner().fail_unless_busy(&error);
            return Err(error);
        };

        let owns_state = {
            let mut inner = self.inner();
            let idle = !inner.state.is_busy();
            if idle {
                inner.state = WorkflowState::Voting;
            }
            idle
        };
        tracing::info!(contract = %address, candidate_id, "submitting vote");

        let contract = signer.at(&address);
        let receipt = match cast_vote(&contract, candidate_id).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(contract = %address, candidate_id, "vote failed: {e}");
                let error = WorkflowError::Vote(e);
                let mut inner = self.inner();
                if owns_state {
                    inner.fail(&error);
                } else {
                    inner.fail_unless_busy(&error);
                }
                return Err(error);
            }
        };

        {
            let mut inner = self.inner();
            if owns_state {
                inner.state = inner.settled_state();
            }
            inner.last_error = None;
        }

        let session = if self.config.auto_reload_after_vote {
            match self.load(address.clone()).await {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(contract = %address, "reload after vote failed: {e}");
                    None
                }
            }
        } else {
            None
        };

        Ok(VoteReceipt {
            tx_hash: receipt.tx_hash,
            block_number: receipt.block_number,
            session,
        })
    }
}
