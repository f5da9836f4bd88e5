use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::models::MIN_PASSWORD_LENGTH;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;
use crate::user::ports::UserStore;

pub async fn register<S: UserStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command()?;

    let user = state.user_service.register(command).await?;

    let token = state.authenticator.issue_token(user.id)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        RegisterResponseData::new(&user, token),
    ))
}

/// HTTP request body for registration (raw JSON).
///
/// Fields are optional at the serde level so that an absent field surfaces
/// as `MissingFields` rather than a deserialization error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl RegisterRequest {
    /// Validate the raw request into a domain command.
    ///
    /// Checks fail fast in a fixed order: presence, email syntax, password
    /// strength, username format. The first failing check decides the
    /// error.
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        let (Some(username), Some(email), Some(password)) =
            (self.username, self.email, self.password)
        else {
            return Err(UserError::MissingFields);
        };

        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(UserError::MissingFields);
        }

        let email = EmailAddress::new(email)?;

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserError::WeakPassword);
        }

        let username = Username::new(username)?;

        Ok(RegisterUserCommand::new(username, email, password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub token: String,
}

impl RegisterResponseData {
    fn new(user: &User, token: String) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            token,
        }
    }
}
