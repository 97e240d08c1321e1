use thiserror::Error;

/// Error type for token issuance and verification.
///
/// Verification failures stay distinguishable here for logging and tests;
/// the HTTP layer collapses them into a single rejection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token algorithm {found} is not accepted, expected {expected}")]
    AlgorithmMismatch { expected: String, found: String },

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,
}
