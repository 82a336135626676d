//! Pass-through endpoints over the storage API's cover-letter collection.
//!
//! Cover letters have no render pipeline or session state on this service;
//! the editor posts the flat form payload and it travels upstream in the
//! standard `{ template_id, data }` envelope.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;

use crate::auth::bearer_token;
use crate::errors::AppError;
use crate::models::cover_letter::CoverLetter;
use crate::models::envelope::{CoverLetterEnvelope, CoverLetterRecord};
use crate::state::AppState;

/// The single cover-letter layout's backend id.
const COVER_LETTER_TEMPLATE_ID: i64 = 1;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SaveCoverLetterRequest {
    #[serde(flatten)]
    pub letter: CoverLetter,
    pub template_id: i64,
}

impl Default for SaveCoverLetterRequest {
    fn default() -> Self {
        Self {
            letter: CoverLetter::default(),
            template_id: COVER_LETTER_TEMPLATE_ID,
        }
    }
}

impl SaveCoverLetterRequest {
    fn into_envelope(self) -> CoverLetterEnvelope {
        CoverLetterEnvelope {
            template_id: self.template_id,
            data: self.letter,
        }
    }
}

/// GET /api/v1/cover-letters
pub async fn handle_list_cover_letters(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<CoverLetterRecord>>, AppError> {
    let token = bearer_token(&headers)?;
    Ok(Json(state.persistence.list_cover_letters(token).await?))
}

/// POST /api/v1/cover-letters
pub async fn handle_create_cover_letter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SaveCoverLetterRequest>,
) -> Result<(StatusCode, Json<CoverLetterRecord>), AppError> {
    let token = bearer_token(&headers)?;
    let record = state
        .persistence
        .create_cover_letter(token, &req.into_envelope())
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/cover-letters/:id
pub async fn handle_get_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<CoverLetterRecord>, AppError> {
    let token = bearer_token(&headers)?;
    Ok(Json(state.persistence.get_cover_letter(token, id).await?))
}

/// PUT /api/v1/cover-letters/:id
pub async fn handle_update_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<SaveCoverLetterRequest>,
) -> Result<Json<CoverLetterRecord>, AppError> {
    let token = bearer_token(&headers)?;
    let record = state
        .persistence
        .update_cover_letter(token, id, &req.into_envelope())
        .await?;
    Ok(Json(record))
}

/// DELETE /api/v1/cover-letters/:id
pub async fn handle_delete_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = bearer_token(&headers)?;
    state.persistence.delete_cover_letter(token, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header, HeaderValue};

    use super::*;
    use crate::persistence::mock::MemoryPersistence;
    use crate::session::store::SessionStore;

    fn make_state() -> AppState {
        AppState {
            sessions: SessionStore::new(),
            persistence: Arc::new(MemoryPersistence::new()),
        }
    }

    fn auth_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer test-token"),
        );
        headers
    }

    #[test]
    fn test_request_flattens_letter_fields() {
        let req: SaveCoverLetterRequest = serde_json::from_str(
            r#"{"full_name":"Jane Doe","company_name":"Acme","content":"Dear team,"}"#,
        )
        .unwrap();
        assert_eq!(req.letter.full_name, "Jane Doe");
        assert_eq!(req.template_id, COVER_LETTER_TEMPLATE_ID);
    }

    #[tokio::test]
    async fn test_create_then_update_round_trips() {
        let state = make_state();
        let req: SaveCoverLetterRequest =
            serde_json::from_str(r#"{"full_name":"Jane Doe","company_name":"Acme"}"#).unwrap();

        let (status, Json(created)) =
            handle_create_cover_letter(State(state.clone()), auth_headers(), Json(req))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.data.company_name, "Acme");

        let update: SaveCoverLetterRequest =
            serde_json::from_str(r#"{"full_name":"Jane Doe","company_name":"Initech"}"#).unwrap();
        let Json(updated) = handle_update_cover_letter(
            State(state.clone()),
            Path(created.id),
            auth_headers(),
            Json(update),
        )
        .await
        .unwrap();
        assert_eq!(updated.data.company_name, "Initech");

        let Json(listed) = handle_list_cover_letters(State(state), auth_headers())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_letter_is_not_found() {
        let state = make_state();
        let result = handle_get_cover_letter(State(state), Path(7), auth_headers()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
