use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("stored value for {key:?} is not valid UTF-8")]
    Encoding { key: String },
}
