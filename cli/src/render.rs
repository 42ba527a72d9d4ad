//! Plain-text rendering of workflow results.

use std::io::{self, Write};

use ballot_workflow::VoteReceipt;
use ballot_types::VotingSession;

pub const LOAD_PROMPT: &str = "Input the contract address to load the voting topic.";

/// The topic and one `name — Count: n` line per candidate, or the load prompt.
pub fn session(out: &mut impl Write, session: &VotingSession) -> io::Result<()> {
    if !session.is_loaded() {
        return writeln!(out, "{LOAD_PROMPT}");
    }
    writeln!(out, "{}", session.topic)?;
    for candidate in &session.candidates {
        writeln!(out, "  [{}] {} — Count: {}", candidate.id, candidate.name, candidate.count)?;
    }
    Ok(())
}

pub fn vote(out: &mut impl Write, receipt: &VoteReceipt) -> io::Result<()> {
    writeln!(out, "Vote confirmed in block {}.", receipt.block_number)?;
    writeln!(out, "Transaction: {}", receipt.tx_hash)?;
    match &receipt.session {
        Some(refreshed) => session(out, refreshed),
        None => writeln!(out, "Run `ballot load` to refresh."),
    }
}
