//! View models: pure projections of [`SessionState`] for a front-end.
//!
//! Nothing here touches the network or mutates state. A renderer draws
//! these structs and never reads the session any other way.

use serde::Serialize;

use outreach_core::filter::FilterState;
use outreach_core::model::ProfessorDetail;
use outreach_core::types::ProfessorId;

use crate::detail::DetailState;
use crate::email_form::EmailMessage;
use crate::state::SessionState;

/// Tags shown per list row.
pub const ROW_TAG_LIMIT: usize = 3;

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub id: ProfessorId,
    pub name: String,
    pub institution: String,
    pub tags: Vec<String>,
    pub recent: bool,
    pub email: Option<String>,
    /// Row is the professor currently open in the detail pane.
    pub selected: bool,
}

/// Why the list has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// No directory fetch has succeeded yet.
    NotLoaded,
    /// The directory is loaded but nothing passes the filters.
    NoMatches,
}

impl EmptyState {
    pub fn text(self) -> &'static str {
        match self {
            Self::NotLoaded => "Directory not loaded yet.",
            Self::NoMatches => "No professors match the current filters.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub rows: Vec<ListRow>,
    pub page: usize,
    pub total_pages: usize,
    pub show_pagination: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub page_size: usize,
    pub visible_count: usize,
    pub total_count: usize,
    pub empty: Option<EmptyState>,
    pub banner: Option<String>,
    pub institutions: Vec<String>,
    pub filters: FilterState,
}

pub fn list_view(state: &SessionState) -> ListView {
    let store = state.store();
    let window = state.page_window();
    let selected = state.detail().selected_id();

    let rows: Vec<ListRow> = state
        .page_items()
        .into_iter()
        .map(|p| ListRow {
            id: p.id,
            name: p.name.clone(),
            institution: p.institution.clone(),
            tags: p.tags.iter().take(ROW_TAG_LIMIT).cloned().collect(),
            recent: p.has_recent_publication,
            email: p.email.clone(),
            selected: selected == Some(p.id),
        })
        .collect();

    let empty = if !rows.is_empty() {
        None
    } else if store.is_loaded() {
        Some(EmptyState::NoMatches)
    } else {
        Some(EmptyState::NotLoaded)
    };

    ListView {
        page: window.page,
        total_pages: window.total_pages,
        show_pagination: window.total_pages > 0,
        prev_enabled: window.has_prev(),
        next_enabled: window.has_next(),
        page_size: state.pagination().page_size(),
        visible_count: store.visible_len(),
        total_count: store.professors().len(),
        empty,
        banner: store
            .load_error()
            .map(|err| format!("Could not refresh the directory: {err}")),
        institutions: store.institutions(),
        filters: store.filters().clone(),
        rows,
    }
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetailView {
    Idle,
    Loading { id: ProfessorId },
    Failed { id: ProfessorId, message: String },
    Ready(Box<ProfessorDetail>),
}

pub fn detail_view(state: &SessionState) -> DetailView {
    match state.detail().state() {
        DetailState::Idle => DetailView::Idle,
        DetailState::Loading { id } => DetailView::Loading { id: *id },
        DetailState::Failed { id, message } => DetailView::Failed {
            id: *id,
            message: message.clone(),
        },
        DetailState::Ready { detail } => DetailView::Ready(detail.clone()),
    }
}

// ---------------------------------------------------------------------------
// Email form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailFormView {
    pub value: String,
    /// A professor is loaded and no submission is in flight.
    pub submit_enabled: bool,
    pub message: Option<EmailMessage>,
}

pub fn email_form_view(state: &SessionState) -> EmailFormView {
    let form = state.email_form();
    EmailFormView {
        value: form.input().to_string(),
        submit_enabled: state.detail().detail().is_some() && !form.is_submitting(),
        message: form.message(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
