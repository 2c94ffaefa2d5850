//! `POST /login`.

use axum::{extract::State, Json};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::super::extract::{ForwardedFor, JsonBody};
use super::super::state::AppState;
use crate::error_handling::AppError;
use crate::notify::LoginEvent;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Checks the credentials, issues a token and fires one login alert.
///
/// The alert runs on a detached task; the response never waits for it.
pub async fn login(
    State(state): State<AppState>,
    ForwardedFor(forwarded_for): ForwardedFor,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = request.username.as_deref().unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let valid = state
        .users
        .verify(username, password)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !valid {
        warn!("Failed login for '{username}' from {forwarded_for:?}");
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let token = state
        .tokens
        .issue(username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    info!("User '{username}' logged in");
    state
        .notifier
        .spawn(LoginEvent::now(username, forwarded_for));

    Ok(Json(LoginResponse { token }))
}
