//! Bearer token extraction.
//!
//! This service does not mint or verify tokens; it forwards the caller's
//! bearer token to the storage API, which owns authentication. Endpoints
//! that never touch storage take no token at all.

use axum::http::{header, HeaderMap};

use crate::errors::AppError;

/// Pulls the bearer token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}
