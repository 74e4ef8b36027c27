pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{0} is not fitted, call fit before transform")]
    NotFitted(&'static str),

    #[error("matrix shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_cbor::Error),
}
