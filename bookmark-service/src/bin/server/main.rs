use std::sync::Arc;

use auth::Authenticator;
use auth::Secret;
use auth::TokenIssuer;
use auth::TokenVerifier;
use bookmark_service::config::Config;
use bookmark_service::domain::identity::service::CredentialAuthenticator;
use bookmark_service::domain::identity::service::IdentityRegistrar;
use bookmark_service::inbound::http::router::create_router;
use bookmark_service::outbound::repositories::PostgresUserStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookmark_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "bookmark-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    // No secret, no service: this must fail before anything is bound.
    let secret = Arc::new(Secret::from_env().map_err(|e| {
        tracing::error!(error = %e, "Token signing secret unavailable");
        e
    })?);

    let config = Config::load()?;
    let token_ttl = config.jwt.ttl()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_issuer = %config.jwt.issuer,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy(&config.database.url)?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    let token_issuer = TokenIssuer::new(Arc::clone(&secret))
        .with_issuer(config.jwt.issuer.clone())
        .with_ttl(token_ttl);
    let token_verifier = Arc::new(TokenVerifier::new(Arc::clone(&secret)));
    let authenticator =
        Arc::new(Authenticator::new(Arc::clone(&secret)).with_token_issuer(token_issuer));

    let user_store = Arc::new(PostgresUserStore::new(pg_pool));
    let login_service = Arc::new(CredentialAuthenticator::new(
        Arc::clone(&user_store),
        Arc::clone(&authenticator),
    ));
    let registration_service = Arc::new(IdentityRegistrar::new(user_store, authenticator));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(login_service, registration_service, token_verifier);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
