use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::JwtError;
use super::SIGNING_ALGORITHM;
use crate::secret::Secret;

/// The part of the JOSE header read before anything else.
///
/// `alg` is kept as a raw string so that values `jsonwebtoken` has no
/// variant for (`none`, typos) are reported as an algorithm mismatch
/// rather than a parse failure.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

/// Validates bearer tokens issued by [`super::TokenIssuer`].
///
/// Checks, in order: structure, algorithm, signature, expiry.
pub struct TokenVerifier {
    secret: Arc<Secret>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: Arc<Secret>) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // Expiry is checked against the caller's clock in `verify_at`, with no leeway.
        validation.validate_exp = false;
        // Audience is per identity, there is no fixed value to match.
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self { secret, validation }
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `Malformed` - Token is not a well-formed compact JWS
    /// * `AlgorithmMismatch` - Header names an algorithm other than HS256
    /// * `SignatureInvalid` - Signature does not match the secret
    /// * `Expired` - `exp` is not in the future
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let header = parse_header(token)?;

        let expected = format!("{:?}", SIGNING_ALGORITHM);
        if header.alg != expected {
            return Err(JwtError::AlgorithmMismatch {
                expected,
                found: header.alg,
            });
        }

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let token_data = decode::<Claims>(token, &decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::SignatureInvalid,
                ErrorKind::InvalidAlgorithm => JwtError::AlgorithmMismatch {
                    expected: format!("{:?}", SIGNING_ALGORITHM),
                    found: header.alg.clone(),
                },
                _ => JwtError::Malformed(e.to_string()),
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}

fn parse_header(token: &str) -> Result<RawHeader, JwtError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(JwtError::Malformed(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| JwtError::Malformed(format!("header is not base64url: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| JwtError::Malformed(format!("header is not valid JSON: {}", e)))
}
