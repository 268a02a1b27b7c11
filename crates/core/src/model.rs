//! Wire model for the directory backend.
//!
//! Field names match the backend's JSON. Optional collections default to
//! empty so older backends that omit them still deserialize.

use serde::{Deserialize, Serialize};

use crate::types::ProfessorId;

/// Maximum number of publications kept on a loaded detail payload.
pub const PUBLICATION_WINDOW: usize = 20;

/// One row of `GET /professors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorSummary {
    pub id: ProfessorId,
    pub name: String,
    pub institution: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub has_recent_publication: bool,
}

/// Response of `GET /professors/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorDetail {
    pub id: ProfessorId,
    pub name: String,
    pub institution: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub h_index: Option<i32>,
    #[serde(default)]
    pub has_lab: bool,
    #[serde(default)]
    pub top_tags: Vec<String>,
    #[serde(default)]
    pub has_recent_publication: bool,
    /// Most recent first.
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
    /// Already formatted by the backend; displayed verbatim.
    #[serde(default)]
    pub last_refreshed_at: Option<String>,
}

impl ProfessorDetail {
    /// Drop publications beyond [`PUBLICATION_WINDOW`].
    pub fn bound_publications(&mut self) {
        self.publications.truncate(PUBLICATION_WINDOW);
    }

    /// The most recent publication with a non-blank title, if any.
    pub fn latest_publication(&self) -> Option<&Publication> {
        self.publications
            .iter()
            .find(|p| !p.title.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    /// Free-form date string (`2024-05-01`, `2024`, ...). Never parsed.
    #[serde(default)]
    pub published_on: Option<String>,
    #[serde(default)]
    pub co_authors: Vec<String>,
    #[serde(default)]
    pub r#abstract: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub affiliation: Option<String>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    #[serde(default)]
    pub offline: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
