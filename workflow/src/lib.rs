//! The contract-interaction workflow of the ballot client.
//!
//! address validation → contract read → state reconciliation →
//! vote submission → confirmation.

pub mod error;
pub mod state;
pub mod workflow;

pub use error::WorkflowError;
pub use state::WorkflowState;
pub use workflow::{VoteReceipt, VotingWorkflow, WorkflowConfig, CONTRACT_KEY};
