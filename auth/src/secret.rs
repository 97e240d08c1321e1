use std::env;
use std::fmt;

use thiserror::Error;

/// Environment variable holding the token signing key.
pub const TOKEN_KEY_VAR: &str = "BOOKMARKS_TOKEN_KEY";

/// Error type for signing secret loading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Environment variable {0} is not set")]
    Missing(String),

    #[error("Signing secret must not be empty")]
    Empty,
}

/// Symmetric key used to sign and verify tokens.
///
/// Built once at startup and shared read-only (usually behind an `Arc`)
/// by the token issuer and verifier. The key bytes never appear in
/// `Debug` output.
pub struct Secret(Vec<u8>);

impl Secret {
    /// Wrap raw key bytes.
    ///
    /// # Errors
    /// * `Empty` - No key material was provided
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Load the key from `BOOKMARKS_TOKEN_KEY`.
    ///
    /// # Errors
    /// * `Missing` - Variable is not set
    /// * `Empty` - Variable is set to an empty string
    pub fn from_env() -> Result<Self, SecretError> {
        Self::from_env_var(TOKEN_KEY_VAR)
    }

    /// Load the key from an arbitrary environment variable.
    pub fn from_env_var(name: &str) -> Result<Self, SecretError> {
        let value = env::var_os(name).ok_or_else(|| SecretError::Missing(name.to_string()))?;
        Self::new(value.into_encoded_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**redacted**)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(Secret::new(Vec::new()).unwrap_err(), SecretError::Empty);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::new("super-secret-signing-key").unwrap();
        let printed = format!("{:?}", secret);
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn test_from_env_var_missing() {
        let result = Secret::from_env_var("BOOKMARKS_TEST_KEY_THAT_IS_NEVER_SET");
        assert_eq!(
            result.unwrap_err(),
            SecretError::Missing("BOOKMARKS_TEST_KEY_THAT_IS_NEVER_SET".to_string())
        );
    }

    #[test]
    fn test_from_env_var_present() {
        env::set_var("BOOKMARKS_TEST_KEY_PRESENT", "key-from-environment");
        let secret = Secret::from_env_var("BOOKMARKS_TEST_KEY_PRESENT").unwrap();
        assert_eq!(secret.as_bytes(), b"key-from-environment");
    }
}
