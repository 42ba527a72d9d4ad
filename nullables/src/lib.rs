//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern: every external
//! dependency (durable storage, the voting contract, the wallet provider)
//! sits behind a trait or a network boundary. This crate provides
//! test-friendly stand-ins that:
//! - Return scripted values
//! - Record every call for assertions
//! - Never touch the filesystem or a real chain
//!
//! Usage: swap real implementations for nullables in tests.

pub mod contract;
pub mod provider;
pub mod store;

pub use contract::{ContractScript, FailAt, NullConnector, NullContract, RemoteCall};
pub use provider::{unreachable_url, FakeProvider, RpcReply};
pub use store::NullKvStore;
