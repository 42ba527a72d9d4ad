//! Abstract durable storage for the ballot client.
//!
//! Backends (LMDB, in-memory for testing) implement [`KeyValueStore`]. The
//! rest of the workspace depends only on the trait.

pub mod error;
pub mod kv;

pub use error::StoreError;
pub use kv::KeyValueStore;
