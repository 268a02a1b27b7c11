//! Directory store: the fetched professor list and its filtered view.

use serde::{Deserialize, Serialize};

use outreach_core::filter::{observed_institutions, FilterState, InstitutionFilter};
use outreach_core::model::ProfessorSummary;
use outreach_core::types::ProfessorId;

/// Identifies one directory fetch so an older response cannot overwrite
/// a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStore {
    professors: Vec<ProfessorSummary>,
    filters: FilterState,
    /// Indices into `professors` passing `filters`, in directory order.
    visible: Vec<usize>,
    loaded: bool,
    load_error: Option<String>,
    load_seq: u64,
}

impl DirectoryStore {
    // ---- loading ----

    /// Start a directory fetch.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        LoadTicket(self.load_seq)
    }

    /// Whether `ticket` belongs to the most recent fetch.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.load_seq
    }

    /// Replace the whole list with a fresh fetch and recompute the view.
    ///
    /// An institution choice that no longer exists falls back to `All`.
    pub fn replace(&mut self, professors: Vec<ProfessorSummary>) {
        self.professors = professors;
        self.loaded = true;
        self.load_error = None;

        if let InstitutionFilter::Only(name) = &self.filters.institution {
            if !self.professors.iter().any(|p| &p.institution == name) {
                tracing::info!(institution = %name, "Institution no longer listed, showing all");
                self.filters.institution = InstitutionFilter::All;
            }
        }
        self.recompute();
    }

    /// Remember a failed fetch. The current list is left untouched.
    pub fn record_load_failure(&mut self, message: impl Into<String>) {
        self.load_error = Some(message.into());
    }

    // ---- filtering ----

    /// Install new predicates. Returns `false` when they equal the current
    /// ones, in which case nothing is recomputed.
    pub fn apply_filters(&mut self, filters: FilterState) -> bool {
        if filters == self.filters {
            return false;
        }
        self.filters = filters;
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        self.visible = self.filters.visible_indices(&self.professors);
    }

    // ---- patching ----

    /// Set the email of the professor with `id`. Returns `false` if absent.
    pub fn patch_email(&mut self, id: ProfessorId, email: &str) -> bool {
        match self.professors.iter_mut().find(|p| p.id == id) {
            Some(professor) => {
                professor.email = Some(email.to_string());
                true
            }
            None => false,
        }
    }

    // ---- accessors ----

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn professors(&self) -> &[ProfessorSummary] {
        &self.professors
    }

    pub fn get(&self, id: ProfessorId) -> Option<&ProfessorSummary> {
        self.professors.iter().find(|p| p.id == id)
    }

    /// Indices of the visible set into [`professors`](Self::professors).
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible(&self) -> impl Iterator<Item = &ProfessorSummary> + '_ {
        self.visible.iter().map(|&i| &self.professors[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn institutions(&self) -> Vec<String> {
        observed_institutions(&self.professors)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
