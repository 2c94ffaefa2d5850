//! Request extractors.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use log::debug;
use serde::de::DeserializeOwned;

use super::state::AppState;
use crate::auth::Claims;
use crate::error_handling::AppError;

/// Header carrying the client address chain when behind a proxy.
const FORWARDED_FOR: &str = "x-forwarded-for";

/// Claims of a valid bearer token.
///
/// Rejects with 401 when the `Authorization: Bearer` header is missing and
/// with 403 when the token does not verify.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

        let claims = state.tokens.verify(token).map_err(|e| {
            debug!("Rejected bearer token: {e}");
            AppError::Forbidden("Invalid or expired token".to_string())
        })?;

        Ok(AuthUser(claims))
    }
}

/// The raw client address chain.
///
/// `X-Forwarded-For` when present, otherwise the peer address of the
/// connection, otherwise empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedFor(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ForwardedFor {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(chain) = parts
            .headers
            .get(FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty())
        {
            return Ok(ForwardedFor(chain.to_string()));
        }

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_default();
        Ok(ForwardedFor(peer))
    }
}

/// A JSON request body whose rejections are answered as [`AppError::BadRequest`].
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
