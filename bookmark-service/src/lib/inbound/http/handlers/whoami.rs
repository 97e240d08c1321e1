use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;

/// Echo the identity the request was authenticated as.
pub async fn whoami(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> ApiSuccess<WhoAmIResponseData> {
    ApiSuccess::new(StatusCode::OK, (&identity).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhoAmIResponseData {
    pub subject: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&AuthenticatedIdentity> for WhoAmIResponseData {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            subject: identity.subject.clone(),
            expires_at: DateTime::from_timestamp(identity.claims.exp, 0),
        }
    }
}
