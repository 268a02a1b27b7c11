//! Directory filter predicates.
//!
//! The visible set is the intersection of three independent predicates:
//! a case-insensitive search over name and institution, an institution
//! choice, and a "recent publication only" flag.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::ProfessorSummary;

/// Institution predicate: everything, or exactly one observed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum InstitutionFilter {
    #[default]
    All,
    Only(String),
}

impl InstitutionFilter {
    /// Parse a user choice; `all` (any case) or blank selects everything.
    pub fn parse(choice: &str) -> Self {
        let choice = choice.trim();
        if choice.is_empty() || choice.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(choice.to_string())
        }
    }

    pub fn matches(&self, institution: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(name) => name == institution,
        }
    }
}

/// The full set of active predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub institution: InstitutionFilter,
    pub recent_only: bool,
}

impl FilterState {
    pub fn new(search: impl Into<String>, institution: InstitutionFilter, recent_only: bool) -> Self {
        Self {
            search: search.into(),
            institution,
            recent_only,
        }
    }

    /// Whether a professor passes all three predicates.
    pub fn matches(&self, professor: &ProfessorSummary) -> bool {
        matches_search(&self.search, professor)
            && self.institution.matches(&professor.institution)
            && (!self.recent_only || professor.has_recent_publication)
    }

    /// Indices into `professors` of the visible set, in directory order.
    pub fn visible_indices(&self, professors: &[ProfessorSummary]) -> Vec<usize> {
        professors
            .iter()
            .enumerate()
            .filter(|(_, p)| self.matches(p))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Case-insensitive substring match over name and institution.
///
/// A blank term matches everything.
fn matches_search(term: &str, professor: &ProfessorSummary) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    professor.name.to_lowercase().contains(&needle)
        || professor.institution.to_lowercase().contains(&needle)
}

/// Distinct institution names observed in the directory, sorted.
pub fn observed_institutions(professors: &[ProfessorSummary]) -> Vec<String> {
    professors
        .iter()
        .map(|p| p.institution.as_str())
        .filter(|name| !name.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
