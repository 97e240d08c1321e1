use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::Secret;
use auth::TokenIssuer;
use auth::TokenVerifier;
use bookmark_service::domain::identity::models::StoredIdentity;
use bookmark_service::domain::identity::service::CredentialAuthenticator;
use bookmark_service::domain::identity::service::IdentityRegistrar;
use bookmark_service::inbound::http::router::create_router;
use bookmark_service::outbound::repositories::InMemoryUserStore;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over an in-memory user store
pub struct TestApp {
    pub address: String,
    pub user_store: Arc<InMemoryUserStore>,
    pub authenticator: Arc<Authenticator>,
    pub token_issuer: TokenIssuer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_ttl(chrono::Duration::hours(3)).await
    }

    pub async fn spawn_with_ttl(ttl: chrono::Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let secret = Arc::new(Secret::new(TEST_SECRET).expect("Test secret is not empty"));

        let authenticator = Arc::new(
            Authenticator::new(Arc::clone(&secret))
                .with_password_hasher(
                    PasswordHasher::with_cost(1024, 1, 1).expect("Valid argon2 params"),
                )
                .with_token_issuer(TokenIssuer::new(Arc::clone(&secret)).with_ttl(ttl)),
        );
        let token_verifier = Arc::new(TokenVerifier::new(Arc::clone(&secret)));

        let user_store = Arc::new(InMemoryUserStore::new());
        let login_service = Arc::new(CredentialAuthenticator::new(
            Arc::clone(&user_store),
            Arc::clone(&authenticator),
        ));

        let registration_service = Arc::new(IdentityRegistrar::new(
            Arc::clone(&user_store),
            Arc::clone(&authenticator),
        ));

        let router = create_router(login_service, registration_service, token_verifier);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            user_store,
            authenticator,
            token_issuer: TokenIssuer::new(secret),
            api_client: reqwest::Client::new(),
        }
    }

    /// Store an identity whose password hash matches `password`, bypassing sign-up
    pub fn seed_identity(&self, id: &str, email: &str, password: &str) {
        let password_hash = self
            .authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        self.user_store.insert(StoredIdentity {
            id: id.to_string(),
            email: email.to_string(),
            password_hash,
        });
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Log in and return the issued token value
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["value"]
            .as_str()
            .expect("Token value missing")
            .to_string()
    }
}
