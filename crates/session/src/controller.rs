//! Session controller: owns the state and runs backend round-trips.
//!
//! The state sits behind a `std::sync::Mutex`. Each operation locks it
//! briefly to record intent, releases it for the network call, then locks
//! again to apply the result. The guard is never held across an `.await`,
//! so concurrent operations on one task (or one `current_thread` runtime)
//! interleave freely and staleness is resolved by the session tokens.

use std::sync::{Mutex, MutexGuard, PoisonError};

use outreach_client::DirectoryBackend;
use outreach_core::filter::{FilterState, InstitutionFilter};
use outreach_core::model::HealthStatus;
use outreach_core::types::ProfessorId;

use crate::detail::SelectOutcome;
use crate::error::SessionError;
use crate::state::{SessionOptions, SessionState};
use crate::view::{self, DetailView, EmailFormView, ListView};

pub struct SessionController<B> {
    backend: B,
    state: Mutex<SessionState>,
}

impl<B: DirectoryBackend> SessionController<B> {
    pub fn new(backend: B, options: SessionOptions) -> Result<Self, SessionError> {
        Ok(Self {
            backend,
            state: Mutex::new(SessionState::new(options)?),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&*self.state())
    }

    /// Run a synchronous transition.
    pub fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        f(&mut *self.state())
    }

    /// A copy of the whole state.
    pub fn snapshot(&self) -> SessionState {
        self.state().clone()
    }

    // -----------------------------------------------------------------------
    // Backend round-trips
    // -----------------------------------------------------------------------

    /// Fetch the directory and replace the list.
    ///
    /// Returns the number of professors received. On failure the previous
    /// list stays and the list view shows a banner.
    pub async fn load(&self) -> Result<usize, SessionError> {
        let ticket = self.update(|s| s.begin_load());

        match self.backend.list_professors().await {
            Ok(professors) => {
                let count = professors.len();
                if self.update(|s| s.apply_directory(ticket, professors)) {
                    tracing::info!(count, "Directory loaded");
                } else {
                    tracing::debug!(count, "Discarded stale directory response");
                }
                Ok(count)
            }
            Err(err) => {
                let message = err.to_string();
                if self.update(|s| s.record_load_failure(ticket, message)) {
                    tracing::warn!(error = %err, "Directory load failed");
                }
                Err(SessionError::LoadFailed(err))
            }
        }
    }

    /// Open professor `id` in the detail pane.
    ///
    /// A response that arrives after a newer selection is dropped and
    /// reported as [`SelectOutcome::Superseded`].
    pub async fn select(&self, id: ProfessorId) -> Result<SelectOutcome, SessionError> {
        let token = self.update(|s| s.begin_select(id));
        tracing::debug!(id, seq = token.seq(), "Loading professor");

        let result = self.backend.get_professor(id).await;
        let outcome = self.update(|s| s.complete_select(token, result));

        match &outcome {
            Ok(SelectOutcome::Applied) => tracing::info!(id, "Professor loaded"),
            Ok(SelectOutcome::Superseded) => {
                tracing::debug!(id, seq = token.seq(), "Discarded stale professor response")
            }
            Err(err) => tracing::warn!(id, error = %err, "Professor load failed"),
        }
        outcome
    }

    /// Save `candidate` as the email of professor `id`.
    ///
    /// Returns the canonical address the backend stored. Submission is
    /// re-enabled on every exit path, including when this future is
    /// dropped before the backend answers.
    pub async fn submit_email(&self, id: ProfessorId, candidate: &str) -> Result<String, SessionError> {
        let request = self.update(|s| s.begin_email_submit(candidate))?;
        let guard = SubmitGuard {
            state: &self.state,
            armed: true,
        };

        tracing::info!(id, "Submitting email update");
        let result = self.backend.update_email(id, &request).await;
        let outcome = guard.finish(|s| s.finish_email_submit(id, result));

        match &outcome {
            Ok(email) => tracing::info!(id, email = %email, "Email updated"),
            Err(SessionError::InvalidEmail(_)) => tracing::info!(id, "Backend rejected email"),
            Err(err) => tracing::warn!(id, error = %err, "Email update failed"),
        }
        outcome
    }

    /// Check backend liveness. Does not touch the session state.
    pub async fn check_health(&self) -> Result<HealthStatus, SessionError> {
        let status = self
            .backend
            .health()
            .await
            .map_err(SessionError::HealthCheckFailed)?;

        if status.offline {
            tracing::warn!("Backend is running in offline mode");
        } else {
            tracing::debug!(ok = status.ok, "Backend healthy");
        }
        Ok(status)
    }

    // -----------------------------------------------------------------------
    // Synchronous transitions
    // -----------------------------------------------------------------------

    pub fn apply_filters(&self, filters: FilterState) -> bool {
        self.update(|s| s.apply_filters(filters))
    }

    pub fn set_search(&self, search: impl Into<String>) -> bool {
        self.update(|s| s.set_search(search))
    }

    pub fn set_institution(&self, institution: InstitutionFilter) -> bool {
        self.update(|s| s.set_institution(institution))
    }

    pub fn set_recent_only(&self, recent_only: bool) -> bool {
        self.update(|s| s.set_recent_only(recent_only))
    }

    pub fn set_page(&self, page: usize) {
        self.update(|s| s.set_page(page));
    }

    pub fn next_page(&self) {
        self.update(|s| s.next_page());
    }

    pub fn prev_page(&self) {
        self.update(|s| s.prev_page());
    }

    pub fn set_page_size(&self, page_size: usize) -> Result<(), SessionError> {
        Ok(self.update(|s| s.set_page_size(page_size))?)
    }

    pub fn edit_draft(&self, text: impl Into<String>) {
        self.update(|s| s.edit_draft(text));
    }

    pub fn reset_draft(&self) {
        self.update(|s| s.reset_draft());
    }

    pub fn set_email_input(&self, text: impl Into<String>) {
        self.update(|s| s.set_email_input(text));
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    pub fn list_view(&self) -> ListView {
        self.read(view::list_view)
    }

    pub fn detail_view(&self) -> DetailView {
        self.read(view::detail_view)
    }

    pub fn email_form_view(&self) -> EmailFormView {
        self.read(view::email_form_view)
    }

    pub fn draft_text(&self) -> String {
        self.read(|s| s.draft().text().to_string())
    }

    /// The professor currently open, whatever its load state.
    pub fn selected_id(&self) -> Option<ProfessorId> {
        self.read(|s| s.detail().selected_id())
    }
}

/// Clears the submitting flag if the submission never reached `finish`.
struct SubmitGuard<'a> {
    state: &'a Mutex<SessionState>,
    armed: bool,
}

impl SubmitGuard<'_> {
    fn finish<R>(mut self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        self.armed = false;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *state)
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("Email submission abandoned");
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .release_email_submit();
        }
    }
}
