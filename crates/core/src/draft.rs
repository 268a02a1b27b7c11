//! Outreach email drafting.
//!
//! [`compose`] turns a loaded professor detail into a fixed-template
//! email. [`DraftState`] holds the editable buffer and decides when the
//! generated text may replace what is already there.

use serde::{Deserialize, Serialize};

use crate::model::ProfessorDetail;

/// Hard cap on the biography excerpt, in characters.
pub const BIO_EXCERPT_LIMIT: usize = 160;

/// Marker appended to a truncated excerpt.
pub const ELLIPSIS: &str = "...";

/// Maximum number of research interests named in the draft.
pub const MAX_INTERESTS: usize = 3;

/// Trailing name tokens that are credentials, not surnames.
const CREDENTIAL_SUFFIXES: &[&str] = &[
    "md", "phd", "do", "mph", "ms", "msc", "mba", "facs", "jr", "sr", "ii", "iii", "iv",
];

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

/// Build the outreach email for `detail`. `None` yields an empty draft.
///
/// Absent fields drop their sentence entirely, so the result never
/// contains placeholders or dangling punctuation.
pub fn compose(detail: Option<&ProfessorDetail>) -> String {
    let Some(detail) = detail else {
        return String::new();
    };

    let greeting = match last_name(&detail.name) {
        Some(last) => format!("Dear Dr. {last},"),
        None => "Hello,".to_string(),
    };

    let mut intro = Vec::new();
    let institution = detail.institution.trim();
    if institution.is_empty() {
        intro.push("I am reaching out after learning about your work.".to_string());
    } else {
        intro.push(format!(
            "I am reaching out after learning about your work at {institution}."
        ));
    }

    if let Some(interests) = interests_clause(&detail.top_tags) {
        intro.push(format!(
            "I am especially interested in your research on {interests}."
        ));
    }

    if let Some(publication) = detail.latest_publication() {
        let title = publication.title.trim();
        match publication
            .published_on
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
        {
            Some(date) => intro.push(format!(
                "I recently read your publication \"{title}\" ({date}) and would love to hear more about it."
            )),
            None => intro.push(format!(
                "I recently read your publication \"{title}\" and would love to hear more about it."
            )),
        }
    }

    let mut paragraphs = vec![greeting, intro.join(" ")];

    if let Some(excerpt) = detail
        .biography
        .as_deref()
        .and_then(|bio| bio_excerpt(bio, BIO_EXCERPT_LIMIT))
    {
        paragraphs.push(format!("From your profile: \"{excerpt}\""));
    }

    paragraphs.push(
        "Would you be open to a brief conversation about research opportunities in your group?"
            .to_string(),
    );
    paragraphs.push("Thank you for your time,".to_string());

    paragraphs.join("\n\n")
}

/// The surname used in the greeting.
///
/// Text after the first comma (`"Jane Doe, MD"`) and trailing credential
/// tokens are ignored. Returns `None` when no usable token remains.
pub fn last_name(full_name: &str) -> Option<&str> {
    let name = full_name.split(',').next().unwrap_or_default();
    name.split_whitespace()
        .rev()
        .find(|token| !is_credential(token))
}

fn is_credential(token: &str) -> bool {
    let bare = token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    bare.is_empty() || CREDENTIAL_SUFFIXES.contains(&bare.as_str())
}

/// Join up to [`MAX_INTERESTS`] non-blank tags as English prose.
///
/// # Examples
///
/// ```
/// use outreach_core::draft::interests_clause;
/// let tags = vec!["otology".to_string(), "rhinology".to_string()];
/// assert_eq!(interests_clause(&tags).as_deref(), Some("otology and rhinology"));
/// ```
pub fn interests_clause(tags: &[String]) -> Option<String> {
    let tags: Vec<&str> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .take(MAX_INTERESTS)
        .collect();

    match tags.as_slice() {
        [] => None,
        [only] => Some((*only).to_string()),
        [first, second] => Some(format!("{first} and {second}")),
        [init @ .., last] => Some(format!("{}, and {last}", init.join(", "))),
    }
}

/// Trim `bio` and cap it at `limit` characters.
///
/// [`ELLIPSIS`] is appended only when characters were dropped. Blank
/// input yields `None`.
pub fn bio_excerpt(bio: &str, limit: usize) -> Option<String> {
    let bio = bio.trim();
    if bio.is_empty() {
        return None;
    }
    if bio.chars().count() <= limit {
        return Some(bio.to_string());
    }
    let cut: String = bio.chars().take(limit).collect();
    Some(format!("{}{ELLIPSIS}", cut.trim_end()))
}

// ---------------------------------------------------------------------------
// Draft buffer
// ---------------------------------------------------------------------------

/// What happens to the dirty flag when a different professor is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirtyPolicy {
    /// Once edited, the draft is never regenerated for the rest of the session.
    #[default]
    Persist,
    /// Selecting a different professor clears the flag so their draft is generated.
    ResetOnNewSelection,
}

/// Editable draft text plus the dirty flag guarding it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftState {
    text: String,
    dirty: bool,
    policy: DirtyPolicy,
}

impl DraftState {
    pub fn new(policy: DirtyPolicy) -> Self {
        Self {
            text: String::new(),
            dirty: false,
            policy,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn policy(&self) -> DirtyPolicy {
        self.policy
    }

    /// Replace the buffer with user-typed text and mark it dirty.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = true;
    }

    /// Replace the buffer with generated text unless the user has edited it.
    ///
    /// Returns whether the buffer was written.
    pub fn regenerate(&mut self, detail: Option<&ProfessorDetail>) -> bool {
        if self.dirty {
            return false;
        }
        self.text = compose(detail);
        true
    }

    /// Discard user edits and regenerate from `detail`.
    pub fn reset(&mut self, detail: Option<&ProfessorDetail>) {
        self.dirty = false;
        self.regenerate(detail);
    }

    /// Apply the [`DirtyPolicy`] for a selection moving to a different professor.
    pub fn on_selection_changed(&mut self) {
        if self.policy == DirtyPolicy::ResetOnNewSelection {
            self.dirty = false;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
