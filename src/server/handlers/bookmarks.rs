//! `/bookmarks` routes.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::super::extract::{AuthUser, JsonBody};
use super::super::state::AppState;
use crate::bookmarks::normalize;
use crate::error_handling::AppError;

#[derive(Debug, Deserialize)]
pub struct BookmarkRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl BookmarkRequest {
    fn url(&self) -> Result<&str, AppError> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::BadRequest("URL is required".to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct AddBookmarkResponse {
    pub url: String,
    pub inserted: bool,
}

#[derive(Debug, Serialize)]
pub struct RemoveBookmarkResponse {
    pub url: String,
    pub removed: bool,
}

pub async fn list_bookmarks(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.bookmarks.list().await?))
}

/// Answers 201 whether or not the URL was already stored.
pub async fn add_bookmark(
    State(state): State<AppState>,
    _user: AuthUser,
    JsonBody(request): JsonBody<BookmarkRequest>,
) -> Result<(StatusCode, Json<AddBookmarkResponse>), AppError> {
    let raw = request.url()?;
    let inserted = state.bookmarks.add(raw).await?;
    Ok((
        StatusCode::CREATED,
        Json(AddBookmarkResponse {
            url: normalize(raw),
            inserted,
        }),
    ))
}

pub async fn remove_bookmark(
    State(state): State<AppState>,
    _user: AuthUser,
    JsonBody(request): JsonBody<BookmarkRequest>,
) -> Result<Json<RemoveBookmarkResponse>, AppError> {
    let raw = request.url()?;
    if !state.bookmarks.remove(raw).await? {
        return Err(AppError::NotFound("Bookmark not found".to_string()));
    }
    Ok(Json(RemoveBookmarkResponse {
        url: normalize(raw),
        removed: true,
    }))
}
