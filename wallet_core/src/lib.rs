//! Wallet session provider for the ballot client.
//!
//! Talks to a wallet over its JSON-RPC endpoint (EIP-1193 method set):
//! - Connection handshake (`eth_requestAccounts`, `eth_chainId`)
//! - The authenticated session the rest of the client reads from
//! - A signing capability for contract calls and transactions; the wallet
//!   holds the keys and signs on the user's behalf

pub mod error;
pub mod rpc;
pub mod session;
pub mod signer;

pub use error::{ConnectError, ProviderError};
pub use rpc::RpcClient;
pub use session::{AuthSession, SessionProvider, WalletProvider};
pub use signer::{Signer, TransactionReceipt};
