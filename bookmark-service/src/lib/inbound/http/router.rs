use std::sync::Arc;
use std::time::Duration;

use auth::TokenVerifier;
use axum::body::Body;
use axum::handler::HandlerWithoutStateExt;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get_service;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::login::login;
use super::handlers::whoami::whoami;
use super::middleware::with_authentication;
use super::middleware::ChainBuilder;
use crate::domain::identity::ports::LoginServicePort;
use crate::domain::identity::ports::RegistrationServicePort;

#[derive(Clone)]
pub struct AppState {
    pub login_service: Arc<dyn LoginServicePort>,
    pub registration_service: Arc<dyn RegistrationServicePort>,
}

pub fn create_router(
    login_service: Arc<dyn LoginServicePort>,
    registration_service: Arc<dyn RegistrationServicePort>,
    token_verifier: Arc<TokenVerifier>,
) -> Router {
    let state = AppState {
        login_service,
        registration_service,
    };

    let public_routes = Router::new()
        .route("/api/users", post(create_user))
        .route("/api/auth/login", post(login));

    let protected = ChainBuilder::new().with(with_authentication(token_verifier));

    let protected_routes =
        Router::new().route("/api/me", get_service(protected.build(whoami.into_service())));

    // Headers are left out of the span: they carry the bearer token.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
