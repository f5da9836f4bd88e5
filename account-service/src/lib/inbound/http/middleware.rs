use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;
use crate::user::ports::UserStore;
use crate::user::service::UserService;

/// Authenticated principal attached to request extensions by the gate.
///
/// Deliberately excludes the password hash: handlers downstream only ever
/// see public fields.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
}

/// Transport-independent authorization check.
///
/// Verifies the bearer token, resolves its subject against the store, and
/// returns the principal. Every failure collapses to `Unauthenticated`; the
/// underlying reason is logged but not disclosed, so clients cannot probe
/// token state or user existence through this path.
pub async fn authorize<S: UserStore>(
    token: &str,
    authenticator: &Authenticator,
    user_service: &UserService<S>,
) -> Result<CurrentUser, UserError> {
    let claims = authenticator.verify_token(token).map_err(|e| {
        tracing::warn!(reason = %e, "Token verification failed");
        UserError::Unauthenticated
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(reason = %e, "Token subject is not a valid user id");
        UserError::Unauthenticated
    })?;

    // The subject may have been deleted since the token was issued; a valid
    // signature alone does not grant access.
    let user = user_service.get_user(&user_id).await.map_err(|e| {
        match e {
            UserError::NotFound(_) => {
                tracing::warn!(user_id = %user_id, "Token subject no longer exists")
            }
            ref other => tracing::error!(error = %other, "User lookup failed during authorization"),
        }
        UserError::Unauthenticated
    })?;

    Ok(CurrentUser {
        id: user.id,
        username: user.username,
        email: user.email,
    })
}

/// Middleware that authorizes bearer tokens and attaches the principal to
/// request extensions.
pub async fn authenticate<S: UserStore>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token =
        extract_bearer_token(&req).map_err(|e| ApiError::from(e).into_response())?;

    let current_user = authorize(token, &state.authenticator, &state.user_service)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, UserError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or(UserError::Unauthenticated)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| UserError::Unauthenticated)?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or(UserError::Unauthenticated)
}
