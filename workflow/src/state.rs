//! Workflow phases.

use serde::Serialize;
use std::fmt;

/// Where a [`VotingWorkflow`](crate::VotingWorkflow) is in its lifecycle.
///
/// ```text
/// Empty → AddressEntered → Loading → Loaded → Voting → Loaded
/// ```
///
/// A failed load or vote falls back to the last settled phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Empty,
    AddressEntered,
    Loading,
    Loaded,
    Voting,
}

impl WorkflowState {
    /// Whether a remote operation is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Loading | Self::Voting)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::AddressEntered => "address entered",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Voting => "voting",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
