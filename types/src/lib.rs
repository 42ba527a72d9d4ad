//! Fundamental types for the ballot client.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! contract/account addresses, chain identifiers, transaction hashes, and the
//! candidate and voting-session shapes read back from a voting contract.

pub mod address;
pub mod error;
pub mod hash;
pub mod network;
pub mod voting;

pub use address::{is_valid_address, is_valid_address_lenient, Address, AddressMatch};
pub use error::ValidationError;
pub use hash::TxHash;
pub use network::ChainId;
pub use voting::{Candidate, VotingSession};
