use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::claims::Token;
use super::errors::JwtError;
use super::SIGNING_ALGORITHM;
use crate::secret::Secret;

/// Default `iss` claim.
pub const DEFAULT_ISSUER: &str = "bookmarks.local";

/// Default token lifetime in hours.
pub const DEFAULT_TTL_HOURS: i64 = 3;

/// Builds and signs bearer tokens.
pub struct TokenIssuer {
    secret: Arc<Secret>,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer signing with HS256 under the shared secret.
    pub fn new(secret: Arc<Secret>) -> Self {
        Self {
            secret,
            issuer: DEFAULT_ISSUER.to_string(),
            ttl: Duration::hours(DEFAULT_TTL_HOURS),
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `identity_id`, expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, identity_id: &str) -> Result<Token, JwtError> {
        self.issue_at(identity_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, identity_id: &str, now: DateTime<Utc>) -> Result<Token, JwtError> {
        let claims = Claims::for_identity(&self.issuer, identity_id, now, self.ttl);
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<Token, JwtError> {
        let header = Header::new(SIGNING_ALGORITHM);
        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());

        encode(&header, claims, &encoding_key)
            .map(|value| Token { value })
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }
}
