use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by every bearer token.
///
/// Subject and audience are both the identity id. Timestamps are Unix
/// seconds; `exp` is fixed at `iat + ttl` when the claims are built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (identity identifier)
    pub sub: String,

    /// Audience (identity identifier)
    pub aud: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID, a random nonce so that no two tokens are equal
    pub jti: String,
}

impl Claims {
    /// Build claims for an identity, valid for `ttl` from `now`.
    pub fn for_identity(
        issuer: &str,
        identity_id: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let identity_id = identity_id.to_string();

        Self {
            iss: issuer.to_string(),
            sub: identity_id.clone(),
            aud: identity_id,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// A token is expired once `now` reaches `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}

/// Signed compact token handed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub value: String,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}
