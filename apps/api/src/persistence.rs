//! Persistence client — the single point of entry for all calls to the
//! external storage API.
//!
//! ARCHITECTURAL RULE: no other module may talk to the storage service
//! directly. Handlers go through `Arc<dyn PersistenceApi>` on `AppState`,
//! which lets tests swap in `MemoryPersistence` without touching handler code.
//!
//! The storage API wraps every response in `{success, data, message}`. This
//! module unwraps that envelope and maps failures onto `AppError::Upstream`,
//! so callers only ever see domain records.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::envelope::{CoverLetterEnvelope, CoverLetterRecord, ResumeRecord, SaveEnvelope};

/// Response wrapper used by every storage API endpoint.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// Storage backend seam. Carried in `AppState` as `Arc<dyn PersistenceApi>`.
#[async_trait]
pub trait PersistenceApi: Send + Sync {
    async fn create_resume(
        &self,
        token: &str,
        envelope: &SaveEnvelope,
    ) -> Result<ResumeRecord, AppError>;

    async fn update_resume(
        &self,
        token: &str,
        id: i64,
        envelope: &SaveEnvelope,
    ) -> Result<ResumeRecord, AppError>;

    async fn get_resume(&self, token: &str, id: i64) -> Result<ResumeRecord, AppError>;

    async fn list_resumes(&self, token: &str) -> Result<Vec<ResumeRecord>, AppError>;

    async fn delete_resume(&self, token: &str, id: i64) -> Result<(), AppError>;

    async fn create_cover_letter(
        &self,
        token: &str,
        envelope: &CoverLetterEnvelope,
    ) -> Result<CoverLetterRecord, AppError>;

    async fn update_cover_letter(
        &self,
        token: &str,
        id: i64,
        envelope: &CoverLetterEnvelope,
    ) -> Result<CoverLetterRecord, AppError>;

    async fn get_cover_letter(&self, token: &str, id: i64) -> Result<CoverLetterRecord, AppError>;

    async fn list_cover_letters(&self, token: &str) -> Result<Vec<CoverLetterRecord>, AppError>;

    async fn delete_cover_letter(&self, token: &str, id: i64) -> Result<(), AppError>;
}

/// HTTP implementation backed by the storage service.
#[derive(Clone)]
pub struct HttpPersistence {
    client: Client,
    base_url: String,
}

impl HttpPersistence {
    pub fn new(base_url: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: Option<&B>,
    ) -> Result<ApiEnvelope<T>, AppError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Persistence call: {} {}", method, url);

        let mut req = self.client.request(method, &url).bearer_auth(token);
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("{path} not found upstream")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "{url} returned {status}: {body}"
            )));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("{url} returned invalid JSON: {e}")))?;

        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "storage API reported failure".to_string());
            return Err(AppError::Upstream(message));
        }

        Ok(envelope)
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: Option<&B>,
    ) -> Result<T, AppError> {
        let envelope = self.call(method, path, token, body).await?;
        envelope
            .data
            .ok_or_else(|| AppError::Upstream(format!("{path} returned success without data")))
    }

    /// For endpoints whose `data` field is absent or irrelevant (deletes).
    async fn request_unit(
        &self,
        method: Method,
        path: &str,
        token: &str,
    ) -> Result<(), AppError> {
        self.call::<(), serde_json::Value>(method, path, token, None)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PersistenceApi for HttpPersistence {
    async fn create_resume(
        &self,
        token: &str,
        envelope: &SaveEnvelope,
    ) -> Result<ResumeRecord, AppError> {
        self.request(Method::POST, "/api/resumes", token, Some(envelope))
            .await
    }

    async fn update_resume(
        &self,
        token: &str,
        id: i64,
        envelope: &SaveEnvelope,
    ) -> Result<ResumeRecord, AppError> {
        self.request(Method::PUT, &format!("/api/resumes/{id}"), token, Some(envelope))
            .await
    }

    async fn get_resume(&self, token: &str, id: i64) -> Result<ResumeRecord, AppError> {
        self.request::<(), _>(Method::GET, &format!("/api/resumes/{id}"), token, None)
            .await
    }

    async fn list_resumes(&self, token: &str) -> Result<Vec<ResumeRecord>, AppError> {
        self.request::<(), _>(Method::GET, "/api/resumes", token, None)
            .await
    }

    async fn delete_resume(&self, token: &str, id: i64) -> Result<(), AppError> {
        self.request_unit(Method::DELETE, &format!("/api/resumes/{id}"), token)
            .await
    }

    async fn create_cover_letter(
        &self,
        token: &str,
        envelope: &CoverLetterEnvelope,
    ) -> Result<CoverLetterRecord, AppError> {
        self.request(Method::POST, "/api/cover-letters", token, Some(envelope))
            .await
    }

    async fn update_cover_letter(
        &self,
        token: &str,
        id: i64,
        envelope: &CoverLetterEnvelope,
    ) -> Result<CoverLetterRecord, AppError> {
        self.request(
            Method::PUT,
            &format!("/api/cover-letters/{id}"),
            token,
            Some(envelope),
        )
        .await
    }

    async fn get_cover_letter(&self, token: &str, id: i64) -> Result<CoverLetterRecord, AppError> {
        self.request::<(), _>(Method::GET, &format!("/api/cover-letters/{id}"), token, None)
            .await
    }

    async fn list_cover_letters(&self, token: &str) -> Result<Vec<CoverLetterRecord>, AppError> {
        self.request::<(), _>(Method::GET, "/api/cover-letters", token, None)
            .await
    }

    async fn delete_cover_letter(&self, token: &str, id: i64) -> Result<(), AppError> {
        self.request_unit(Method::DELETE, &format!("/api/cover-letters/{id}"), token)
            .await
    }
}
