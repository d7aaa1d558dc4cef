use thiserror::Error;

pub type SealResult<T> = Result<T, SealError>;

/// Structural problems found while slicing a blob, before any cryptography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FramingError {
    #[error("data does not contain a version")]
    MissingVersion,

    #[error("data contains an invalid version: {0}")]
    InvalidVersion(u64),

    #[error("data does not contain a salt")]
    MissingSalt,

    #[error("data does not contain a nonce")]
    MissingNonce,
}

#[derive(Debug, Error)]
pub enum SealError {
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// Wrong password, mismatched salt/nonce, or tampered ciphertext.
    /// The cause is deliberately not distinguished.
    #[error("authentication failed: wrong password or corrupted data")]
    Authentication,

    #[error("encryption failed: payload exceeds cipher limits")]
    PayloadTooLarge,

    #[error("compression error: {0}")]
    Compression(#[source] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("random source unavailable: {0}")]
    RandomSource(#[from] rand::Error),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),
}

impl SealError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, SealError::Authentication)
    }

    /// The framing failure, if this error came from the framer.
    pub fn framing(&self) -> Option<FramingError> {
        match self {
            SealError::Framing(e) => Some(*e),
            _ => None,
        }
    }
}
