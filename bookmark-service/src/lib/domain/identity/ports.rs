use async_trait::async_trait;

use crate::domain::identity::errors::LoginError;
use crate::domain::identity::errors::RegistrationError;
use crate::domain::identity::errors::UserStoreError;
use crate::domain::identity::models::Credential;
use crate::domain::identity::models::RegisterIdentityCommand;
use crate::domain::identity::models::StoredIdentity;

/// Port for the login use case.
#[async_trait]
pub trait LoginServicePort: Send + Sync + 'static {
    /// Exchange an email/password pair for a bearer token.
    ///
    /// # Arguments
    /// * `credential` - Email and plaintext password
    ///
    /// # Returns
    /// Signed token for the matching identity
    ///
    /// # Errors
    /// * `BadRequest` - No identity with this email, or the lookup failed
    /// * `PermissionDenied` - Password does not match
    /// * `Internal` - Token could not be issued
    async fn login(&self, credential: Credential) -> Result<auth::Token, LoginError>;
}

/// Port for the sign-up use case.
#[async_trait]
pub trait RegistrationServicePort: Send + Sync + 'static {
    /// Create an identity whose password is stored hashed.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// The stored identity, with its generated id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Another identity uses this email
    /// * `Internal` - Hashing or persistence failed
    async fn register(
        &self,
        command: RegisterIdentityCommand,
    ) -> Result<StoredIdentity, RegistrationError>;
}

/// Read access to stored identities.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Retrieve identity by email address.
    ///
    /// # Errors
    /// * `NotFound` - No identity with this email
    /// * `Database` - Lookup failed
    async fn find_by_email(&self, email: &str) -> Result<StoredIdentity, UserStoreError>;
}

/// Write access to stored identities, kept apart from [`UserStore`] so the
/// login path only ever sees the read side.
#[async_trait]
pub trait IdentityRegistry: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Database` - Insert failed
    async fn create(&self, identity: StoredIdentity) -> Result<StoredIdentity, UserStoreError>;
}
