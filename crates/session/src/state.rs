//! The whole client session as one serializable value.
//!
//! All transitions are synchronous. Asynchronous operations are split
//! into a `begin_*` step that records intent and hands back a ticket,
//! and a `complete_*`/`finish_*` step that applies the backend result.
//! [`SessionController`](crate::SessionController) drives both halves.

use serde::{Deserialize, Serialize};

use outreach_client::ApiError;
use outreach_core::draft::{DirtyPolicy, DraftState};
use outreach_core::email::UpdateEmailRequest;
use outreach_core::error::CoreError;
use outreach_core::filter::{FilterState, InstitutionFilter};
use outreach_core::model::{ProfessorDetail, ProfessorSummary};
use outreach_core::pagination::{PageWindow, DEFAULT_PAGE_SIZE};
use outreach_core::types::ProfessorId;

use crate::detail::{DetailSession, SelectOutcome, SelectionToken};
use crate::email_form::{EmailForm, EmailMessage};
use crate::error::SessionError;
use crate::pager::Pagination;
use crate::store::{DirectoryStore, LoadTicket};

/// Knobs fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub page_size: usize,
    pub draft_policy: DirtyPolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            draft_policy: DirtyPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    store: DirectoryStore,
    pagination: Pagination,
    detail: DetailSession,
    draft: DraftState,
    /// Professor the draft was last generated for.
    #[serde(default)]
    draft_subject: Option<ProfessorId>,
    email_form: EmailForm,
}

impl SessionState {
    pub fn new(options: SessionOptions) -> Result<Self, CoreError> {
        Ok(Self {
            store: DirectoryStore::default(),
            pagination: Pagination::new(options.page_size)?,
            detail: DetailSession::default(),
            draft: DraftState::new(options.draft_policy),
            draft_subject: None,
            email_form: EmailForm::default(),
        })
    }

    // -----------------------------------------------------------------------
    // Directory
    // -----------------------------------------------------------------------

    pub fn begin_load(&mut self) -> LoadTicket {
        self.store.begin_load()
    }

    /// Install a fetched directory. Returns `false` for a stale ticket.
    pub fn apply_directory(&mut self, ticket: LoadTicket, professors: Vec<ProfessorSummary>) -> bool {
        if !self.store.is_current(ticket) {
            return false;
        }
        self.store.replace(professors);
        self.pagination.clamp(self.store.visible_len());
        true
    }

    /// Record a failed fetch. Returns `false` for a stale ticket.
    pub fn record_load_failure(&mut self, ticket: LoadTicket, message: impl Into<String>) -> bool {
        if !self.store.is_current(ticket) {
            return false;
        }
        self.store.record_load_failure(message);
        true
    }

    /// Replace all three predicates. A real change resets to page 1.
    pub fn apply_filters(&mut self, filters: FilterState) -> bool {
        let changed = self.store.apply_filters(filters);
        if changed {
            self.pagination.reset();
        }
        changed
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let filters = FilterState {
            search: search.into(),
            ..self.store.filters().clone()
        };
        self.apply_filters(filters)
    }

    pub fn set_institution(&mut self, institution: InstitutionFilter) -> bool {
        let filters = FilterState {
            institution,
            ..self.store.filters().clone()
        };
        self.apply_filters(filters)
    }

    pub fn set_recent_only(&mut self, recent_only: bool) -> bool {
        let filters = FilterState {
            recent_only,
            ..self.store.filters().clone()
        };
        self.apply_filters(filters)
    }

    // -----------------------------------------------------------------------
    // Pagination
    // -----------------------------------------------------------------------

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page, self.store.visible_len());
    }

    pub fn next_page(&mut self) {
        self.pagination.next(self.store.visible_len());
    }

    pub fn prev_page(&mut self) {
        self.pagination.prev(self.store.visible_len());
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), CoreError> {
        self.pagination
            .set_page_size(page_size, self.store.visible_len())
    }

    /// The current page over the visible indices.
    pub fn page_window(&self) -> PageWindow<'_, usize> {
        self.pagination.window(self.store.visible_indices())
    }

    /// Professors on the current page.
    pub fn page_items(&self) -> Vec<&ProfessorSummary> {
        self.page_window()
            .items
            .iter()
            .map(|&i| &self.store.professors()[i])
            .collect()
    }

    // -----------------------------------------------------------------------
    // Detail
    // -----------------------------------------------------------------------

    /// Select `id` and return the token its fetch must present.
    ///
    /// The draft is left alone until the detail actually arrives.
    pub fn begin_select(&mut self, id: ProfessorId) -> SelectionToken {
        self.detail.begin(id)
    }

    /// Apply a detail fetch result.
    ///
    /// A current success regenerates the draft (unless dirty) and prefills
    /// the email form. A current failure is returned as
    /// [`SessionError::DetailFailed`]; stale results of either kind come
    /// back as `Ok(SelectOutcome::Superseded)`.
    pub fn complete_select(
        &mut self,
        token: SelectionToken,
        result: Result<ProfessorDetail, ApiError>,
    ) -> Result<SelectOutcome, SessionError> {
        match result {
            Ok(detail) => {
                let outcome = self.detail.complete(token, Ok(detail));
                if outcome == SelectOutcome::Applied {
                    if self.draft_subject != Some(token.id()) {
                        self.draft.on_selection_changed();
                        self.draft_subject = Some(token.id());
                    }
                    let detail = self.detail.detail();
                    self.draft.regenerate(detail);
                    self.email_form
                        .load(detail.and_then(|d| d.email.as_deref()));
                }
                Ok(outcome)
            }
            Err(err) => {
                let message = detail_failure_message(token.id(), &err);
                match self.detail.complete(token, Err(message)) {
                    SelectOutcome::Applied => Err(SessionError::DetailFailed {
                        id: token.id(),
                        source: err,
                    }),
                    SelectOutcome::Superseded => Ok(SelectOutcome::Superseded),
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Draft
    // -----------------------------------------------------------------------

    /// User typed into the draft. It will not be regenerated afterwards.
    pub fn edit_draft(&mut self, text: impl Into<String>) {
        self.draft.edit(text);
    }

    /// Throw away edits and regenerate from the current detail.
    pub fn reset_draft(&mut self) {
        self.draft.reset(self.detail.detail());
    }

    // -----------------------------------------------------------------------
    // Email
    // -----------------------------------------------------------------------

    pub fn set_email_input(&mut self, text: impl Into<String>) {
        self.email_form.set_input(text);
    }

    /// Validate `candidate` and mark the form as submitting.
    ///
    /// The typed value is kept in the form whatever happens next.
    pub fn begin_email_submit(&mut self, candidate: &str) -> Result<UpdateEmailRequest, SessionError> {
        if self.email_form.is_submitting() {
            return Err(SessionError::SubmitInFlight);
        }
        self.email_form.set_input(candidate);

        let request = match UpdateEmailRequest::new(candidate) {
            Ok(request) => request,
            Err(err) => {
                self.email_form.set_message(EmailMessage::Empty);
                return Err(err.into());
            }
        };

        self.email_form.set_submitting(true);
        Ok(request)
    }

    /// Apply the backend's answer to an email submission for `id`.
    ///
    /// On success the canonical address is written to the directory entry
    /// and, if that professor is still shown, to the detail, the form and
    /// the draft. Failures leave every stored email unchanged. The form
    /// message is only set while professor `id` is the one selected.
    pub fn finish_email_submit(
        &mut self,
        id: ProfessorId,
        result: Result<String, ApiError>,
    ) -> Result<String, SessionError> {
        self.email_form.set_submitting(false);
        let selected = self.detail.selected_id() == Some(id);

        match result {
            Ok(email) => {
                self.store.patch_email(id, &email);
                if self.detail.patch_email(id, &email) {
                    self.email_form.set_input(email.clone());
                    self.draft.regenerate(self.detail.detail());
                }
                if selected {
                    self.email_form.set_message(EmailMessage::Saved);
                }
                Ok(email)
            }
            Err(err) if err.is_validation() => {
                if selected {
                    self.email_form.set_message(EmailMessage::InvalidAddress);
                }
                Err(SessionError::InvalidEmail(err))
            }
            Err(err) => {
                if selected {
                    self.email_form.set_message(EmailMessage::SaveFailed);
                }
                Err(SessionError::SubmitFailed(err))
            }
        }
    }

    /// Re-enable submission. Safe to call when nothing is in flight.
    pub fn release_email_submit(&mut self) {
        self.email_form.set_submitting(false);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn store(&self) -> &DirectoryStore {
        &self.store
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn detail(&self) -> &DetailSession {
        &self.detail
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    pub fn email_form(&self) -> &EmailForm {
        &self.email_form
    }
}

fn detail_failure_message(id: ProfessorId, err: &ApiError) -> String {
    if err.is_not_found() {
        format!("Professor {id} was not found.")
    } else {
        format!("Could not load professor {id}: {err}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
