use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;
use crate::user::ports::UserStore;

pub async fn login<S: UserStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let (email, password) = body.into_credentials()?;

    // "No such email" and "wrong password" must be indistinguishable to the
    // client, so the not-found case is folded into InvalidCredentials here.
    let user = state
        .user_service
        .get_user_by_email(&email)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => ApiError::from(UserError::InvalidCredentials),
            _ => ApiError::from(e),
        })?;

    let result = state
        .authenticator
        .authenticate(&password, &user.password_hash, user.id)
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                ApiError::from(UserError::InvalidCredentials)
            }
            auth::AuthenticationError::Token(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData::new(&user, result.access_token),
    ))
}

/// HTTP request body for login (raw JSON).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequest {
    /// Require both credentials present and non-empty.
    ///
    /// No format validation here: a malformed email simply fails the lookup
    /// and comes back as InvalidCredentials like any other miss.
    fn into_credentials(self) -> Result<(String, String), UserError> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok((email, password))
            }
            _ => Err(UserError::MissingFields),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub token: String,
}

impl LoginResponseData {
    fn new(user: &User, token: String) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_credentials_required() {
        let body = LoginRequest {
            email: Some("alice@example.com".to_string()),
            password: None,
        };
        assert!(matches!(
            body.into_credentials(),
            Err(UserError::MissingFields)
        ));

        let body = LoginRequest {
            email: Some(String::new()),
            password: Some("secret1".to_string()),
        };
        assert!(matches!(
            body.into_credentials(),
            Err(UserError::MissingFields)
        ));
    }

    #[test]
    fn test_credentials_pass_through_unvalidated() {
        let body = LoginRequest {
            email: Some("Whatever Goes".to_string()),
            password: Some("x".to_string()),
        };
        let (email, password) = body.into_credentials().unwrap();
        assert_eq!(email, "Whatever Goes");
        assert_eq!(password, "x");
    }
}
