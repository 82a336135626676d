use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Html,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::bearer_token;
use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, SectionId};
use crate::render::{render, to_html};
use crate::session::binder::{BinderOp, EditSession};
use crate::session::validate::validate_document;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSessionRequest {
    pub template: Option<String>,
    pub font_family: Option<String>,
    /// When set, the session is seeded from this saved resume instead of
    /// starting blank. Requires a bearer token.
    pub resume_id: Option<i64>,
}

/// Full session state as the editor sees it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub document: ResumeDocument,
    pub template: String,
    pub font_family: String,
    pub section_order: Vec<SectionId>,
    pub collapsed: Vec<SectionId>,
    pub resume_id: Option<i64>,
}

impl SessionResponse {
    fn from_session(session: &EditSession) -> Self {
        Self {
            id: session.id,
            document: session.document.clone(),
            template: session.template.clone(),
            font_family: session.font_family.clone(),
            section_order: session.section_order.clone(),
            collapsed: session.collapsed.iter().copied().collect(),
            resume_id: session.resume_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PreviewQuery {
    pub sample: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub resume_id: i64,
    pub updated_at: DateTime<Utc>,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = match req.resume_id {
        Some(resume_id) => {
            let token = bearer_token(&headers)?;
            let record = state.persistence.get_resume(token, resume_id).await?;
            EditSession::from_record(&record)
        }
        None => EditSession::new(req.template.as_deref(), req.font_family),
    };
    let response = SessionResponse::from_session(&session);
    state.sessions.insert(session).await;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("session {id}")))?;
    Ok(Json(SessionResponse::from_session(&session)))
}

/// POST /api/v1/sessions/:id/ops
pub async fn handle_apply_op(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(op): Json<BinderOp>,
) -> Result<Json<SessionResponse>, AppError> {
    state
        .sessions
        .update(id, |session| {
            session.apply(op);
            Json(SessionResponse::from_session(session))
        })
        .await
        .ok_or_else(|| AppError::NotFound(format!("session {id}")))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("session {id}")))?;
    let theme = session.theme();
    let tree = render(
        &session.document,
        theme,
        &session.render_options(query.sample),
    );
    Ok(Html(to_html(&tree, theme)))
}

/// POST /api/v1/sessions/:id/save
///
/// The envelope is snapshotted and a sequence number allocated under the
/// store lock, then the upstream call runs without it. The session stays
/// editable while the save is in flight, and a response that loses the race
/// to a newer save is dropped.
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<SaveResponse>, AppError> {
    let token = bearer_token(&headers)?;

    let (envelope, seq, resume_id) = state
        .sessions
        .update(id, |session| {
            (session.envelope(), session.begin_save(), session.resume_id)
        })
        .await
        .ok_or_else(|| AppError::NotFound(format!("session {id}")))?;

    let errors = validate_document(&envelope.data.document);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let record = match resume_id {
        Some(existing) => {
            state
                .persistence
                .update_resume(token, existing, &envelope)
                .await?
        }
        None => state.persistence.create_resume(token, &envelope).await?,
    };

    state
        .sessions
        .update(id, |session| session.complete_save(seq, record.id))
        .await;

    Ok(Json(SaveResponse {
        resume_id: record.id,
        updated_at: record.updated_at,
    }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("session {id}")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header, HeaderValue};

    use super::*;
    use crate::persistence::mock::MemoryPersistence;
    use crate::session::store::SessionStore;

    fn make_state() -> (AppState, Arc<MemoryPersistence>) {
        let persistence = Arc::new(MemoryPersistence::new());
        let state = AppState {
            sessions: SessionStore::new(),
            persistence: persistence.clone(),
        };
        (state, persistence)
    }

    fn auth_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer test-token"),
        );
        headers
    }

    async fn create_named_session(state: &AppState) -> Uuid {
        let (_, Json(created)) = handle_create_session(
            State(state.clone()),
            HeaderMap::new(),
            Json(CreateSessionRequest::default()),
        )
        .await
        .unwrap();
        for (field, value) in [("firstName", "Jane"), ("lastName", "Doe")] {
            let op: BinderOp = serde_json::from_str(&format!(
                r#"{{"op":"update_personal","field":"{field}","value":"{value}"}}"#
            ))
            .unwrap();
            handle_apply_op(State(state.clone()), Path(created.id), Json(op))
                .await
                .unwrap();
        }
        created.id
    }

    #[tokio::test]
    async fn test_create_session_defaults_to_classic() {
        let (state, _) = make_state();
        let (status, Json(created)) = handle_create_session(
            State(state.clone()),
            HeaderMap::new(),
            Json(CreateSessionRequest::default()),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.template, "classic");
        assert!(created.collapsed.is_empty());
        assert!(state.sessions.get(created.id).await.is_some());
    }

    #[tokio::test]
    async fn test_op_then_preview_reflects_edit() {
        let (state, _) = make_state();
        let id = create_named_session(&state).await;

        let Html(html) = handle_preview(
            State(state.clone()),
            Path(id),
            Query(PreviewQuery::default()),
        )
        .await
        .unwrap();
        assert!(html.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_preview_missing_session_is_not_found() {
        let (state, _) = make_state();
        let result = handle_preview(
            State(state),
            Path(Uuid::new_v4()),
            Query(PreviewQuery::default()),
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_save_blocked_by_validation() {
        let (state, persistence) = make_state();
        let (_, Json(created)) = handle_create_session(
            State(state.clone()),
            HeaderMap::new(),
            Json(CreateSessionRequest::default()),
        )
        .await
        .unwrap();

        let result = handle_save(State(state), Path(created.id), auth_headers()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(persistence.resumes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_requires_bearer_token() {
        let (state, _) = make_state();
        let id = create_named_session(&state).await;
        let result = handle_save(State(state), Path(id), HeaderMap::new()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_first_save_creates_then_updates_same_record() {
        let (state, persistence) = make_state();
        let id = create_named_session(&state).await;

        let Json(first) = handle_save(State(state.clone()), Path(id), auth_headers())
            .await
            .unwrap();
        let Json(second) = handle_save(State(state.clone()), Path(id), auth_headers())
            .await
            .unwrap();

        assert_eq!(first.resume_id, second.resume_id);
        assert_eq!(persistence.resumes.lock().unwrap().len(), 1);
        assert_eq!(
            state.sessions.get(id).await.unwrap().resume_id,
            Some(first.resume_id)
        );
    }

    #[tokio::test]
    async fn test_failed_save_leaves_session_editable() {
        let (state, persistence) = make_state();
        let id = create_named_session(&state).await;

        persistence
            .fail
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let result = handle_save(State(state.clone()), Path(id), auth_headers()).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));

        let session = state.sessions.get(id).await.unwrap();
        assert_eq!(session.resume_id, None);
        assert_eq!(session.document.personal.first_name, "Jane");
    }

    #[tokio::test]
    async fn test_session_seeded_from_saved_resume() {
        let (state, _) = make_state();
        let id = create_named_session(&state).await;
        let Json(saved) = handle_save(State(state.clone()), Path(id), auth_headers())
            .await
            .unwrap();

        let (_, Json(reloaded)) = handle_create_session(
            State(state.clone()),
            auth_headers(),
            Json(CreateSessionRequest {
                resume_id: Some(saved.resume_id),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        assert_ne!(reloaded.id, id);
        assert_eq!(reloaded.document.personal.first_name, "Jane");
        assert_eq!(reloaded.resume_id, Some(saved.resume_id));
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (state, _) = make_state();
        let id = create_named_session(&state).await;

        let status = handle_delete_session(State(state.clone()), Path(id))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let result = handle_delete_session(State(state), Path(id)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
