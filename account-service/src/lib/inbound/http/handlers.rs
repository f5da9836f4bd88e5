use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::UserError;

pub mod login;
pub mod profile;
pub mod register;

/// Successful response: a status code plus a flat JSON body.
///
/// The SPA client consumes the body fields directly, so there is no
/// envelope around the payload.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<auth::TokenError> for ApiError {
    fn from(e: auth::TokenError) -> Self {
        Self::InternalServerError(format!("Token generation failed: {}", e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                // Unexpected failures are logged with detail but surfaced
                // without it.
                tracing::error!(detail = %detail, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::MissingFields
            | UserError::InvalidEmail(_)
            | UserError::WeakPassword
            | UserError::InvalidUsername(_)
            | UserError::DuplicateEmail
            | UserError::DuplicateUsername => ApiError::BadRequest(err.to_string()),
            UserError::InvalidCredentials | UserError::Unauthenticated => {
                ApiError::Unauthorized(err.to_string())
            }
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::InvalidUserId(_) | UserError::Storage(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

/// Error body shape expected by the client: a single `message` field it can
/// surface near the relevant form field or as a banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
}
