use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;

/// Return the authenticated principal's public fields.
///
/// The gate already loaded the user within this request, so no further
/// store access is needed here.
pub async fn profile(
    Extension(current_user): Extension<CurrentUser>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProfileResponseData::from(&current_user),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&CurrentUser> for ProfileResponseData {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}
