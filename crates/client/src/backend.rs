//! Backend abstraction consumed by the session controller.

use async_trait::async_trait;
use outreach_core::email::UpdateEmailRequest;
use outreach_core::model::{HealthStatus, ProfessorDetail, ProfessorSummary};
use outreach_core::types::ProfessorId;

use crate::api::{ApiError, DirectoryApi};

/// The four backend operations the client relies on.
#[async_trait]
pub trait DirectoryBackend: Send + Sync {
    async fn list_professors(&self) -> Result<Vec<ProfessorSummary>, ApiError>;

    async fn get_professor(&self, id: ProfessorId) -> Result<ProfessorDetail, ApiError>;

    /// Returns the canonical stored address.
    async fn update_email(
        &self,
        id: ProfessorId,
        request: &UpdateEmailRequest,
    ) -> Result<String, ApiError>;

    async fn health(&self) -> Result<HealthStatus, ApiError>;
}

#[async_trait]
impl DirectoryBackend for DirectoryApi {
    async fn list_professors(&self) -> Result<Vec<ProfessorSummary>, ApiError> {
        DirectoryApi::list_professors(self).await
    }

    async fn get_professor(&self, id: ProfessorId) -> Result<ProfessorDetail, ApiError> {
        DirectoryApi::get_professor(self, id).await
    }

    async fn update_email(
        &self,
        id: ProfessorId,
        request: &UpdateEmailRequest,
    ) -> Result<String, ApiError> {
        DirectoryApi::update_email(self, id, request).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        DirectoryApi::health(self).await
    }
}
