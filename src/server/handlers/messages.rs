//! `/messages` routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::super::extract::{AuthUser, JsonBody};
use super::super::state::AppState;
use crate::error_handling::AppError;
use crate::messages::{Message, SortOrder};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct DeleteMessageResponse {
    pub deleted: usize,
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Message {id} not found"))
}

pub async fn list_messages(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Message>>, AppError> {
    let order = match query.sort.as_deref() {
        None => SortOrder::default(),
        Some(sort) => sort.parse::<SortOrder>().map_err(AppError::BadRequest)?,
    };
    Ok(Json(state.messages.list(order).await?))
}

/// Content is stored trimmed; a reply to a missing parent is a 404.
pub async fn create_message(
    State(state): State<AppState>,
    _user: AuthUser,
    JsonBody(request): JsonBody<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let content = request
        .content
        .as_deref()
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::BadRequest("Content is required".to_string()))?;

    let message = state.messages.create(content, request.parent_id).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn like_message(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Message>, AppError> {
    state
        .messages
        .like(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Deletes the message and its direct replies.
pub async fn delete_message(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteMessageResponse>, AppError> {
    let deleted = state
        .messages
        .delete(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DeleteMessageResponse { deleted }))
}
