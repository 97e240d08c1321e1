//! Authentication primitives for the bookmark service.
//!
//! - Signing secret loading (`BOOKMARKS_TOKEN_KEY`)
//! - Password hashing (Argon2id)
//! - Bearer token issuance and verification (HS256 only)
//! - Authentication coordination
//!
//! The service defines its own ports (user lookup, HTTP) and adapts these
//! implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Secret, TokenIssuer, TokenVerifier};
//!
//! let secret = Arc::new(Secret::new("secret_key_at_least_32_bytes_long!").unwrap());
//! let issuer = TokenIssuer::new(Arc::clone(&secret));
//! let verifier = TokenVerifier::new(secret);
//!
//! let token = issuer.issue("user123").unwrap();
//! let claims = verifier.verify(token.as_str()).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod secret;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::Token;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::Secret;
pub use secret::SecretError;
