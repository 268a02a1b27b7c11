use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use outreach_client::{ApiError, DirectoryBackend};
use outreach_core::email::UpdateEmailRequest;
use outreach_core::model::{HealthStatus, ProfessorDetail, ProfessorSummary};
use outreach_core::types::ProfessorId;
use outreach_session::{SessionController, SessionOptions};

/// In-memory [`DirectoryBackend`] with scripted failures and gates.
///
/// A gated call blocks until the matching `oneshot::Sender` fires (or is
/// dropped), so tests decide the order in which responses arrive.
#[derive(Default)]
pub struct ScriptedBackend {
    professors: Mutex<Vec<ProfessorSummary>>,
    details: Mutex<HashMap<ProfessorId, ProfessorDetail>>,
    list_failure: Mutex<Option<u16>>,
    email_failure: Mutex<Option<u16>>,
    detail_gates: Mutex<HashMap<ProfessorId, oneshot::Receiver<()>>>,
    email_gate: Mutex<Option<oneshot::Receiver<()>>>,
    pub email_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn with_directory(professors: Vec<ProfessorSummary>, details: Vec<ProfessorDetail>) -> Self {
        let backend = Self::default();
        *backend.professors.lock().unwrap() = professors;
        *backend.details.lock().unwrap() = details.into_iter().map(|d| (d.id, d)).collect();
        backend
    }

    pub fn set_directory(&self, professors: Vec<ProfessorSummary>) {
        *self.professors.lock().unwrap() = professors;
    }

    /// Make `GET /professors` answer with `status` until cleared.
    pub fn fail_list(&self, status: Option<u16>) {
        *self.list_failure.lock().unwrap() = status;
    }

    /// Make `POST /professors/{id}/email` answer with `status`.
    pub fn fail_email(&self, status: Option<u16>) {
        *self.email_failure.lock().unwrap() = status;
    }

    /// Hold the next detail fetch for `id` until the sender fires.
    pub fn gate_detail(&self, id: ProfessorId) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.detail_gates.lock().unwrap().insert(id, rx);
        tx
    }

    /// Hold the next email update until the sender fires.
    pub fn gate_email(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.email_gate.lock().unwrap() = Some(rx);
        tx
    }
}

fn status(status: u16) -> ApiError {
    ApiError::Status {
        status,
        body: "scripted failure".to_string(),
    }
}

#[async_trait]
impl DirectoryBackend for ScriptedBackend {
    async fn list_professors(&self) -> Result<Vec<ProfessorSummary>, ApiError> {
        if let Some(code) = *self.list_failure.lock().unwrap() {
            return Err(status(code));
        }
        Ok(self.professors.lock().unwrap().clone())
    }

    async fn get_professor(&self, id: ProfessorId) -> Result<ProfessorDetail, ApiError> {
        let gate = self.detail_gates.lock().unwrap().remove(&id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.details
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| status(404))
    }

    async fn update_email(
        &self,
        id: ProfessorId,
        request: &UpdateEmailRequest,
    ) -> Result<String, ApiError> {
        self.email_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.email_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(code) = *self.email_failure.lock().unwrap() {
            return Err(status(code));
        }

        let canonical = request.email.to_lowercase();
        if let Some(detail) = self.details.lock().unwrap().get_mut(&id) {
            detail.email = Some(canonical.clone());
        }
        Ok(canonical)
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        Ok(HealthStatus {
            ok: true,
            offline: false,
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn summary(id: ProfessorId, name: &str, institution: &str) -> ProfessorSummary {
    ProfessorSummary {
        id,
        name: name.to_string(),
        institution: institution.to_string(),
        email: Some(format!("p{id}@{}.edu", institution.to_lowercase())),
        tags: vec!["neuroscience".to_string()],
        has_recent_publication: id % 2 == 0,
    }
}

pub fn detail(id: ProfessorId, name: &str, institution: &str) -> ProfessorDetail {
    ProfessorDetail {
        id,
        name: name.to_string(),
        institution: institution.to_string(),
        email: Some(format!("p{id}@{}.edu", institution.to_lowercase())),
        biography: Some("Studies how neurons talk to each other.".to_string()),
        profile_url: None,
        h_index: Some(12),
        has_lab: true,
        top_tags: vec!["neuroscience".to_string()],
        has_recent_publication: true,
        publications: Vec::new(),
        collaborators: Vec::new(),
        last_refreshed_at: None,
    }
}

/// Two professors at different institutions, both with details.
pub fn two_professor_backend() -> ScriptedBackend {
    ScriptedBackend::with_directory(
        vec![summary(1, "Ann Lee", "X"), summary(2, "Bo Kim", "Y")],
        vec![detail(1, "Ann Lee", "X"), detail(2, "Bo Kim", "Y")],
    )
}

/// A controller over `backend` whose directory is already loaded.
pub async fn loaded_controller(
    backend: ScriptedBackend,
    options: SessionOptions,
) -> SessionController<ScriptedBackend> {
    let controller = SessionController::new(backend, options).unwrap();
    controller.load().await.unwrap();
    controller
}
