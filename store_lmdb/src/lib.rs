//! LMDB storage backend for the ballot client.
//!
//! Implements [`ballot_store::KeyValueStore`] using the `heed` LMDB bindings.
//! All client-side values live in one named database inside a single
//! environment under the configured data directory.

pub mod environment;
pub mod error;
pub mod kv;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use kv::LmdbKvStore;
