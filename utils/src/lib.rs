//! Shared utilities for the ballot client.

pub mod logging;
pub mod quantity;

pub use logging::{init_logging, LogFormat};
pub use quantity::{parse_quantity, to_quantity, QuantityError};
