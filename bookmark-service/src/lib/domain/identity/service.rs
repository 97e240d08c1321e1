use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Token;
use uuid::Uuid;

use crate::domain::identity::errors::LoginError;
use crate::domain::identity::errors::RegistrationError;
use crate::domain::identity::errors::UserStoreError;
use crate::domain::identity::models::Credential;
use crate::domain::identity::models::RegisterIdentityCommand;
use crate::domain::identity::models::StoredIdentity;
use crate::domain::identity::ports::IdentityRegistry;
use crate::domain::identity::ports::LoginServicePort;
use crate::domain::identity::ports::RegistrationServicePort;
use crate::domain::identity::ports::UserStore;

/// Login use case: email lookup, password check, token issuance.
///
/// Never writes to the user store.
pub struct CredentialAuthenticator<US>
where
    US: UserStore,
{
    user_store: Arc<US>,
    authenticator: Arc<Authenticator>,
}

impl<US> CredentialAuthenticator<US>
where
    US: UserStore,
{
    /// Create a new login service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_store` - Identity lookup implementation
    /// * `authenticator` - Password verification and token issuance
    pub fn new(user_store: Arc<US>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            user_store,
            authenticator,
        }
    }
}

#[async_trait]
impl<US> LoginServicePort for CredentialAuthenticator<US>
where
    US: UserStore,
{
    async fn login(&self, credential: Credential) -> Result<Token, LoginError> {
        let identity = self
            .user_store
            .find_by_email(&credential.email)
            .await
            .map_err(|e| {
                match &e {
                    UserStoreError::NotFound(_) => {
                        tracing::info!("Login attempted for unknown email")
                    }
                    UserStoreError::EmailAlreadyExists(_) | UserStoreError::Database(_) => {
                        tracing::error!(error = %e, "Identity lookup failed during login")
                    }
                }
                LoginError::BadRequest
            })?;

        // Argon2 verification is CPU bound; keep it off the async workers.
        let authenticator = Arc::clone(&self.authenticator);
        let identity_id = identity.id.clone();
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&credential.password, &identity.password_hash, &identity.id)
        })
        .await
        .map_err(|e| LoginError::Internal(format!("Password verification task failed: {}", e)))?;

        result.map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::info!(identity_id = %identity_id, "Login rejected: password mismatch");
                LoginError::PermissionDenied
            }
            AuthenticationError::PasswordError(err) => {
                tracing::warn!(
                    identity_id = %identity_id,
                    error = %err,
                    "Login rejected: stored password hash unusable"
                );
                LoginError::PermissionDenied
            }
            AuthenticationError::JwtError(err) => {
                tracing::error!(identity_id = %identity_id, error = %err, "Token issuance failed");
                LoginError::Internal(format!("Token generation failed: {}", err))
            }
        })
    }
}

/// Sign-up use case: hash the password, assign an id, persist.
pub struct IdentityRegistrar<IR>
where
    IR: IdentityRegistry,
{
    registry: Arc<IR>,
    authenticator: Arc<Authenticator>,
}

impl<IR> IdentityRegistrar<IR>
where
    IR: IdentityRegistry,
{
    pub fn new(registry: Arc<IR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            registry,
            authenticator,
        }
    }
}

#[async_trait]
impl<IR> RegistrationServicePort for IdentityRegistrar<IR>
where
    IR: IdentityRegistry,
{
    async fn register(
        &self,
        command: RegisterIdentityCommand,
    ) -> Result<StoredIdentity, RegistrationError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password().to_string();
        // Hashing is CPU bound, same as verification in `login`.
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| {
                    RegistrationError::Internal(format!("Password hashing task failed: {}", e))
                })?
                .map_err(|e| {
                    tracing::error!(error = %e, "Password hashing failed during registration");
                    RegistrationError::Internal(format!("Password hashing failed: {}", e))
                })?;

        let identity = StoredIdentity {
            id: Uuid::new_v4().to_string(),
            email: command.email().to_string(),
            password_hash,
        };

        let created = self.registry.create(identity).await.map_err(|e| match e {
            UserStoreError::EmailAlreadyExists(email) => {
                tracing::info!("Registration rejected: email already registered");
                RegistrationError::EmailAlreadyExists(email)
            }
            other => {
                tracing::error!(error = %other, "Identity creation failed");
                RegistrationError::Internal(other.to_string())
            }
        })?;

        tracing::info!(identity_id = %created.id, "Identity registered");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordHasher;
    use auth::Secret;
    use auth::TokenVerifier;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestUserStore {}

        #[async_trait]
        impl UserStore for TestUserStore {
            async fn find_by_email(&self, email: &str) -> Result<StoredIdentity, UserStoreError>;
        }
    }

    mock! {
        pub TestIdentityRegistry {}

        #[async_trait]
        impl IdentityRegistry for TestIdentityRegistry {
            async fn create(&self, identity: StoredIdentity) -> Result<StoredIdentity, UserStoreError>;
        }
    }

    const EMAIL: &str = "drstrange@marvel.com";
    const PASSWORD: &str = "82392342342";

    fn secret() -> Arc<Secret> {
        Arc::new(Secret::new("test-secret-key-for-jwt-signing-at-least-32-bytes").unwrap())
    }

    fn authenticator(secret: Arc<Secret>) -> Arc<Authenticator> {
        Arc::new(
            Authenticator::new(secret)
                .with_password_hasher(PasswordHasher::with_cost(1024, 1, 1).unwrap()),
        )
    }

    fn stored_identity(authenticator: &Authenticator) -> StoredIdentity {
        StoredIdentity {
            id: "u-1".to_string(),
            email: EMAIL.to_string(),
            password_hash: authenticator.hash_password(PASSWORD).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let secret = secret();
        let authenticator = authenticator(Arc::clone(&secret));
        let identity = stored_identity(&authenticator);

        let mut user_store = MockTestUserStore::new();
        user_store
            .expect_find_by_email()
            .with(eq(EMAIL))
            .times(1)
            .returning(move |_| Ok(identity.clone()));

        let service = CredentialAuthenticator::new(Arc::new(user_store), authenticator);

        let token = service
            .login(Credential::new(EMAIL, PASSWORD))
            .await
            .expect("Login should succeed");

        let claims = TokenVerifier::new(secret)
            .verify(token.as_str())
            .expect("Issued token should verify");
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.aud, "u-1");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut user_store = MockTestUserStore::new();
        user_store
            .expect_find_by_email()
            .times(1)
            .returning(|email| Err(UserStoreError::NotFound(email.to_string())));

        let service = CredentialAuthenticator::new(Arc::new(user_store), authenticator(secret()));

        let result = service
            .login(Credential::new("mickocollins@marvel.com", PASSWORD))
            .await;
        assert_eq!(result, Err(LoginError::BadRequest));
    }

    #[tokio::test]
    async fn test_login_lookup_failure_is_bad_request() {
        let mut user_store = MockTestUserStore::new();
        user_store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserStoreError::Database("connection refused".to_string())));

        let service = CredentialAuthenticator::new(Arc::new(user_store), authenticator(secret()));

        let result = service.login(Credential::new(EMAIL, PASSWORD)).await;
        assert_eq!(result, Err(LoginError::BadRequest));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let authenticator = authenticator(secret());
        let identity = stored_identity(&authenticator);

        let mut user_store = MockTestUserStore::new();
        user_store
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(identity.clone()));

        let service = CredentialAuthenticator::new(Arc::new(user_store), authenticator);

        let result = service
            .login(Credential::new(EMAIL, "abcdefghijklmno"))
            .await;
        assert_eq!(result, Err(LoginError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_login_corrupt_stored_hash() {
        let mut user_store = MockTestUserStore::new();
        user_store.expect_find_by_email().times(1).returning(|_| {
            Ok(StoredIdentity {
                id: "u-1".to_string(),
                email: EMAIL.to_string(),
                password_hash: "plaintext-by-mistake".to_string(),
            })
        });

        let service = CredentialAuthenticator::new(Arc::new(user_store), authenticator(secret()));

        let result = service.login(Credential::new(EMAIL, PASSWORD)).await;
        assert_eq!(result, Err(LoginError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_register_success() {
        let authenticator = authenticator(secret());

        let mut registry = MockTestIdentityRegistry::new();
        registry
            .expect_create()
            .withf(|identity| identity.email == EMAIL && identity.password_hash != PASSWORD)
            .times(1)
            .returning(Ok);

        let service = IdentityRegistrar::new(Arc::new(registry), Arc::clone(&authenticator));

        let identity = service
            .register(RegisterIdentityCommand::new(EMAIL, PASSWORD).unwrap())
            .await
            .expect("Registration should succeed");

        assert_eq!(identity.email, EMAIL);
        assert!(Uuid::parse_str(&identity.id).is_ok());
        authenticator
            .authenticate(PASSWORD, &identity.password_hash, &identity.id)
            .expect("Stored hash should verify the registered password");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut registry = MockTestIdentityRegistry::new();
        registry
            .expect_create()
            .times(1)
            .returning(|identity| Err(UserStoreError::EmailAlreadyExists(identity.email)));

        let service = IdentityRegistrar::new(Arc::new(registry), authenticator(secret()));

        let result = service
            .register(RegisterIdentityCommand::new(EMAIL, PASSWORD).unwrap())
            .await;
        assert_eq!(
            result,
            Err(RegistrationError::EmailAlreadyExists(EMAIL.to_string()))
        );
    }

    #[tokio::test]
    async fn test_register_store_failure() {
        let mut registry = MockTestIdentityRegistry::new();
        registry
            .expect_create()
            .times(1)
            .returning(|_| Err(UserStoreError::Database("connection refused".to_string())));

        let service = IdentityRegistrar::new(Arc::new(registry), authenticator(secret()));

        let result = service
            .register(RegisterIdentityCommand::new(EMAIL, PASSWORD).unwrap())
            .await;
        assert!(matches!(result, Err(RegistrationError::Internal(_))));
    }
}
