use thiserror::Error;

/// Error for user store lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserStoreError {
    #[error("User not found with email: {0}")]
    NotFound(String),

    #[error("Email already registered: {0}")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Error for the login use case.
///
/// Deliberately coarse: an unknown email and a failed lookup are both
/// `BadRequest`, and nothing distinguishes a wrong password from an
/// unusable stored hash.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("bad request")]
    BadRequest,

    #[error("permission denied")]
    PermissionDenied,

    #[error("internal server error: {0}")]
    Internal(String),
}

/// Error for the registration use case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Password must be between {min} and {max} characters")]
    InvalidPassword { min: usize, max: usize },

    #[error("Email already registered: {0}")]
    EmailAlreadyExists(String),

    #[error("internal server error: {0}")]
    Internal(String),
}
