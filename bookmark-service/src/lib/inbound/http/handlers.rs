use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::identity::errors::LoginError;
use crate::domain::identity::errors::RegistrationError;

pub mod create_user;
pub mod login;
pub mod whoami;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Error responses. Bodies are fixed strings so that nothing about the
/// underlying failure reaches the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    PermissionDenied,
    Conflict,
    UnprocessableEntity,
    InternalServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "bad request"),
            ApiError::PermissionDenied => (StatusCode::FORBIDDEN, "permission denied"),
            ApiError::Conflict => (StatusCode::CONFLICT, "conflict"),
            ApiError::UnprocessableEntity => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable entity")
            }
            ApiError::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, message).into_response()
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::BadRequest => ApiError::BadRequest,
            LoginError::PermissionDenied => ApiError::PermissionDenied,
            LoginError::Internal(_) => ApiError::InternalServerError,
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::InvalidEmail(_) | RegistrationError::InvalidPassword { .. } => {
                ApiError::UnprocessableEntity
            }
            RegistrationError::EmailAlreadyExists(_) => ApiError::Conflict,
            RegistrationError::Internal(_) => ApiError::InternalServerError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}
