//! Pass-through endpoints over the storage API's resume collection.
//!
//! These feed the editor's open/delete dialogs. No session is involved:
//! the bearer token is forwarded as-is and records come back unmodified.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::auth::bearer_token;
use crate::errors::AppError;
use crate::models::envelope::ResumeRecord;
use crate::state::AppState;

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    let token = bearer_token(&headers)?;
    Ok(Json(state.persistence.list_resumes(token).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ResumeRecord>, AppError> {
    let token = bearer_token(&headers)?;
    Ok(Json(state.persistence.get_resume(token, id).await?))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = bearer_token(&headers)?;
    state.persistence.delete_resume(token, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
