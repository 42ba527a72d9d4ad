//! Authenticated wallet session and the provider that manages it.

use ballot_types::{Address, AddressMatch, ChainId};
use ballot_utils::parse_quantity;

use crate::error::{ConnectError, ProviderError};
use crate::rpc::RpcClient;
use crate::signer::Signer;

/// The wallet session as last reported by the provider.
///
/// Only a [`SessionProvider`] creates or clears sessions; everything else
/// reads them.
#[derive(Clone, Default)]
pub struct AuthSession {
    address: Option<Address>,
    chain_id: Option<ChainId>,
    signer: Option<Signer>,
}

impl AuthSession {
    /// A session for `address` on `chain_id`, able to sign through `signer`.
    pub fn authenticated(address: Address, chain_id: ChainId, signer: Signer) -> Self {
        Self {
            address: Some(address),
            chain_id: Some(chain_id),
            signer: Some(signer),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.signer.is_some()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }

    pub fn signer(&self) -> Option<&Signer> {
        self.signer.as_ref()
    }

    /// Label for the connect/disconnect toggle.
    pub fn describe(&self) -> String {
        match (&self.address, self.chain_id) {
            (Some(address), Some(chain)) if self.is_authenticated() => {
                format!("Disconnect ({} on chain {chain})", address.abbreviated())
            }
            _ => "Connect wallet".to_string(),
        }
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("is_authenticated", &self.is_authenticated())
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

/// Source of authenticated sessions.
#[allow(async_fn_in_trait)]
pub trait SessionProvider {
    /// Ask the wallet for access and record the resulting session.
    async fn connect(&mut self) -> Result<AuthSession, ConnectError>;

    /// Forget the current session.
    fn disconnect(&mut self);

    /// The current session; unauthenticated until [`connect`](Self::connect) succeeds.
    fn session(&self) -> &AuthSession;
}

/// Session provider backed by a wallet's JSON-RPC endpoint.
pub struct WalletProvider {
    client: RpcClient,
    session: AuthSession,
}

impl WalletProvider {
    pub fn new(url: impl Into<String>) -> Result<Self, ProviderError> {
        Ok(Self {
            client: RpcClient::new(url)?,
            session: AuthSession::default(),
        })
    }

    pub fn url(&self) -> &str {
        self.client.url()
    }
}

impl SessionProvider for WalletProvider {
    async fn connect(&mut self) -> Result<AuthSession, ConnectError> {
        let accounts: Vec<String> = self
            .client
            .request("eth_requestAccounts", serde_json::json!([]))
            .await?;
        let account = accounts.into_iter().next().ok_or(ConnectError::NoAccounts)?;
        let address = Address::parse(&account, AddressMatch::Strict)
            .map_err(|e| ProviderError::InvalidResponse(format!("account: {e}")))?;

        let chain: String = self
            .client
            .request("eth_chainId", serde_json::json!([]))
            .await?;
        let chain_id = parse_quantity(&chain)
            .map(ChainId::new)
            .map_err(|e| ProviderError::InvalidResponse(format!("chain id: {e}")))?;

        let signer = Signer::new(self.client.clone(), address.clone());
        self.session = AuthSession::authenticated(address, chain_id, signer);
        tracing::info!(
            account = ?self.session.address(),
            chain = %chain_id,
            "wallet connected"
        );
        Ok(self.session.clone())
    }

    fn disconnect(&mut self) {
        if self.session.is_authenticated() {
            tracing::info!("wallet disconnected");
        }
        self.session = AuthSession::default();
    }

    fn session(&self) -> &AuthSession {
        &self.session
    }
}
