//! HTTP client for the directory backend endpoints.
//!
//! Wraps `GET /professors`, `GET /professors/{id}`,
//! `POST /professors/{id}/email` and `GET /health` using [`reqwest`].

use std::time::Duration;

use outreach_core::email::{UpdateEmailRequest, UpdateEmailResponse};
use outreach_core::model::{HealthStatus, ProfessorDetail, ProfessorSummary};
use outreach_core::types::ProfessorId;

/// Status the backend uses for a rejected (malformed) email address.
pub const VALIDATION_STATUS: u16 = 422;

/// HTTP client for one directory backend.
#[derive(Debug, Clone)]
pub struct DirectoryApi {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl ApiError {
    /// `true` when the backend rejected the submitted value as malformed.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == VALIDATION_STATUS)
    }

    /// `true` when the requested professor does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

impl DirectoryApi {
    /// Create a client for the backend at `api_url`, e.g. `http://host:8000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(api_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch the whole directory (`GET /professors`).
    pub async fn list_professors(&self) -> Result<Vec<ProfessorSummary>, ApiError> {
        let response = self
            .client
            .get(format!("{}/professors", self.api_url))
            .send()
            .await?;

        let professors: Vec<ProfessorSummary> = Self::parse_response(response).await?;
        tracing::debug!(count = professors.len(), "Fetched directory");
        Ok(professors)
    }

    /// Fetch one professor's detail (`GET /professors/{id}`).
    pub async fn get_professor(&self, id: ProfessorId) -> Result<ProfessorDetail, ApiError> {
        let response = self
            .client
            .get(format!("{}/professors/{}", self.api_url, id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Store a corrected email (`POST /professors/{id}/email`).
    ///
    /// Returns the canonical value the backend stored.
    pub async fn update_email(
        &self,
        id: ProfessorId,
        request: &UpdateEmailRequest,
    ) -> Result<String, ApiError> {
        let response = self
            .client
            .post(format!("{}/professors/{}/email", self.api_url, id))
            .json(request)
            .send()
            .await?;

        let body: UpdateEmailResponse = Self::parse_response(response).await?;
        Ok(body.email)
    }

    /// Check backend liveness (`GET /health`).
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = self
            .client
            .get(format!("{}/health", self.api_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or an
    /// [`ApiError::Status`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), body = %body, "Backend request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
