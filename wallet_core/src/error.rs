use thiserror::Error;

/// EIP-1193 code for a request the user declined in the wallet.
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("wallet provider unavailable: {0}")]
    Unavailable(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Whether the user declined the request in their wallet.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Rpc { code, .. } if *code == USER_REJECTED_CODE)
    }
}

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("no wallet available: {0}")]
    Unavailable(String),

    #[error("connection request rejected by the user")]
    Rejected,

    #[error("wallet returned no accounts")]
    NoAccounts,

    #[error(transparent)]
    Provider(ProviderError),
}

impl From<ProviderError> for ConnectError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Unavailable(reason) => ConnectError::Unavailable(reason),
            e if e.is_user_rejection() => ConnectError::Rejected,
            other => ConnectError::Provider(other),
        }
    }
}
