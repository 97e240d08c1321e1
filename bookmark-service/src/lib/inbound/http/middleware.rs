use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;

use auth::Claims;
use auth::TokenVerifier;
use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use tower::service_fn;
use tower::util::BoxCloneService;
use tower::Service;
use tower::ServiceExt;

/// A request handler: the terminal route service, or a stage wrapping one.
pub type Handler = BoxCloneService<Request, Response, Infallible>;

/// One stage of a chain. Wraps `next` and returns the new handler.
pub type Middleware = Arc<dyn Fn(Handler) -> Handler + Send + Sync>;

/// Identity of an authenticated request, stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub subject: String,
    pub claims: Claims,
}

/// Ordered list of middleware composed into a single handler.
///
/// The first stage added is the outermost: it sees the request first and
/// the response last.
#[derive(Clone, Default)]
pub struct ChainBuilder {
    stages: Vec<Middleware>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one wrapping stage.
    pub fn with(mut self, middleware: Middleware) -> Self {
        self.stages.push(middleware);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Wrap `handler` in every stage and return the resulting handler.
    pub fn build<S>(&self, handler: S) -> Handler
    where
        S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
        S::Future: Send + 'static,
    {
        self.stages
            .iter()
            .rev()
            .fold(BoxCloneService::new(handler), |next, stage| stage(next))
    }
}

/// Lift an async function of `(request, next)` into a [`Middleware`].
pub fn middleware_fn<F, Fut>(f: F) -> Middleware
where
    F: Fn(Request, Handler) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |next: Handler| {
        let f = f.clone();
        BoxCloneService::new(service_fn(move |req: Request| {
            let response = f(req, next.clone());
            async move { Ok::<_, Infallible>(response.await) }
        }))
    })
}

/// Stage that only lets through requests carrying a valid token.
///
/// A missing or empty `authorization` header is answered with
/// `400 bad request`; any verification failure with `403 forbidden`.
/// Which check failed is logged, never returned.
pub fn with_authentication(verifier: Arc<TokenVerifier>) -> Middleware {
    middleware_fn(move |req, next| authenticate(Arc::clone(&verifier), req, next))
}

async fn authenticate(verifier: Arc<TokenVerifier>, mut req: Request, next: Handler) -> Response {
    let claims = match extract_token_from_header(&req) {
        TokenHeader::Missing => {
            tracing::debug!("Request rejected: missing authorization header");
            return reject(StatusCode::BAD_REQUEST, "bad request");
        }
        TokenHeader::Unreadable => {
            tracing::warn!("Request rejected: authorization header is not visible ASCII");
            return reject(StatusCode::FORBIDDEN, "forbidden");
        }
        TokenHeader::Present(token) => verifier.verify(token),
    };

    let claims = match claims {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(error = %e, "Request rejected: token verification failed");
            return reject(StatusCode::FORBIDDEN, "forbidden");
        }
    };

    tracing::debug!(subject = %claims.sub, "Request authenticated");
    req.extensions_mut().insert(AuthenticatedIdentity {
        subject: claims.sub.clone(),
        claims,
    });

    match next.oneshot(req).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

enum TokenHeader<'a> {
    Missing,
    Unreadable,
    Present(&'a str),
}

fn extract_token_from_header(req: &Request) -> TokenHeader<'_> {
    let Some(value) = req.headers().get(AUTHORIZATION) else {
        return TokenHeader::Missing;
    };

    match value.to_str().map(str::trim) {
        Ok("") => TokenHeader::Missing,
        Ok(token) => TokenHeader::Present(token),
        Err(_) => TokenHeader::Unreadable,
    }
}

fn reject(status: StatusCode, body: &'static str) -> Response {
    (status, body).into_response()
}
