use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are split into `Malformed`, `Expired` and
/// `BadSignature` so callers can log the cause; callers facing clients should
/// treat all three the same.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}

impl TokenError {
    /// Short, stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Malformed(_) => "malformed",
            TokenError::Expired => "expired",
            TokenError::BadSignature => "bad_signature",
            TokenError::SigningFailed(_) => "signing_failed",
        }
    }
}
