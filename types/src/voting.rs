//! Candidate and voting-session shapes read back from a voting contract.

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// One selectable voting option, exactly as the contract reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: u64,
    pub name: String,
    pub count: u64,
}

/// The locally held view of one voting contract.
///
/// Replaced wholesale after every successful read; never patched in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingSession {
    pub contract_address: Option<Address>,
    pub topic: String,
    pub candidates: Vec<Candidate>,
}

impl VotingSession {
    /// Whether a topic has been read from a contract.
    pub fn is_loaded(&self) -> bool {
        !self.topic.is_empty()
    }

    /// Look up a candidate by its contract-assigned id.
    pub fn candidate(&self, id: u64) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Sum of all candidates' vote counts.
    pub fn total_votes(&self) -> u64 {
        self.candidates.iter().map(|c| c.count).sum()
    }
}
