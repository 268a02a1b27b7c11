//! Detail session: the single selected professor and its loading state.
//!
//! Every selection issues a fresh [`SelectionToken`]. A fetch result is
//! applied only when its token is still the one in flight, so a slow
//! response for an earlier click can never replace a later one.

use serde::{Deserialize, Serialize};

use outreach_core::model::ProfessorDetail;
use outreach_core::types::ProfessorId;

/// Marker for one detail fetch. Sequence numbers only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionToken {
    seq: u64,
    id: ProfessorId,
}

impl SelectionToken {
    pub fn id(&self) -> ProfessorId {
        self.id
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The result was installed (as `Ready` or `Failed`).
    Applied,
    /// A newer selection exists; the result was dropped.
    Superseded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetailState {
    #[default]
    Idle,
    Loading {
        id: ProfessorId,
    },
    Ready {
        detail: Box<ProfessorDetail>,
    },
    Failed {
        id: ProfessorId,
        message: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSession {
    next_seq: u64,
    in_flight: Option<SelectionToken>,
    state: DetailState,
}

impl DetailSession {
    /// Select `id`: enter `Loading` and invalidate any earlier fetch.
    pub fn begin(&mut self, id: ProfessorId) -> SelectionToken {
        self.next_seq += 1;
        let token = SelectionToken {
            seq: self.next_seq,
            id,
        };
        self.in_flight = Some(token);
        self.state = DetailState::Loading { id };
        token
    }

    /// Whether `token` is the fetch whose result would still be applied.
    pub fn is_current(&self, token: SelectionToken) -> bool {
        self.in_flight == Some(token)
    }

    /// Install the result of the fetch identified by `token`.
    ///
    /// Stale tokens, and tokens whose result was already applied, are
    /// ignored.
    pub fn complete(
        &mut self,
        token: SelectionToken,
        result: Result<ProfessorDetail, String>,
    ) -> SelectOutcome {
        if !self.is_current(token) {
            return SelectOutcome::Superseded;
        }
        self.in_flight = None;

        self.state = match result {
            Ok(mut detail) => {
                detail.bound_publications();
                DetailState::Ready {
                    detail: Box::new(detail),
                }
            }
            Err(message) => DetailState::Failed {
                id: token.id,
                message,
            },
        };
        SelectOutcome::Applied
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// The loaded payload; `None` unless `Ready`.
    pub fn detail(&self) -> Option<&ProfessorDetail> {
        match &self.state {
            DetailState::Ready { detail } => Some(&**detail),
            _ => None,
        }
    }

    /// The professor the user most recently picked, whatever the load state.
    pub fn selected_id(&self) -> Option<ProfessorId> {
        match &self.state {
            DetailState::Idle => None,
            DetailState::Loading { id } | DetailState::Failed { id, .. } => Some(*id),
            DetailState::Ready { detail } => Some(detail.id),
        }
    }

    /// Set the email on the loaded payload if it is professor `id`.
    pub fn patch_email(&mut self, id: ProfessorId, email: &str) -> bool {
        match &mut self.state {
            DetailState::Ready { detail } if detail.id == id => {
                detail.email = Some(email.to_string());
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
