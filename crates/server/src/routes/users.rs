use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use serde::Serialize;
use tracing::debug;

use service::storage::decode_json;
use service::users::domain::User;

use super::AppState;
use crate::errors::ApiError;

#[derive(Serialize, Debug)]
pub struct AuthenticateResponse {
    pub status: &'static str,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Serialize, Debug)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Decode a user-shaped body. `Content-Type` is not checked; `null` decodes as an empty user
/// and a repeated key keeps its last value.
fn decode_user(body: Result<Bytes, BytesRejection>) -> Result<User, ApiError> {
    let bytes = body.map_err(|e| ApiError::UnreadableBody(e.body_text()))?;
    let user: Option<User> = decode_json(&bytes).map_err(ApiError::MalformedJson)?;
    Ok(user.unwrap_or_default())
}

/// `POST /authenticate`: report whether a user with this email exists, and return it if so.
pub async fn authenticate(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AuthenticateResponse>, ApiError> {
    let payload = decode_user(body)?;
    let user = state.users.find_by_email(&payload.email).await;
    debug!(email = %payload.email, exists = user.is_some(), "authenticate lookup");
    Ok(Json(AuthenticateResponse { status: "success", exists: user.is_some(), user }))
}

/// `PUT /update`: patch name/surname/role of an existing user.
pub async fn update_user(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let payload = decode_user(body)?;
    if !state.users.update_by_email(&payload.email, &payload.patch()).await? {
        return Err(ApiError::UserNotFound);
    }
    debug!(email = %payload.email, "user updated");
    Ok(Json(StatusResponse { status: "success" }))
}
