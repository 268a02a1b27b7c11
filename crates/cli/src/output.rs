//! Plain-text rendering of the session view models.

use outreach_core::filter::{FilterState, InstitutionFilter};
use outreach_core::model::{HealthStatus, ProfessorDetail};
use outreach_session::view::{DetailView, EmailFormView, ListView};

/// Publications listed in the detail pane.
const DETAIL_PUBLICATIONS: usize = 5;

/// Collaborators listed in the detail pane.
const DETAIL_COLLABORATORS: usize = 8;

pub fn render_list(view: &ListView) -> String {
    let mut lines = Vec::new();

    if let Some(banner) = &view.banner {
        lines.push(format!("! {banner}"));
    }

    lines.push(format!(
        "Professors: {} of {} shown | {}",
        view.visible_count,
        view.total_count,
        describe_filters(&view.filters)
    ));

    if let Some(empty) = view.empty {
        lines.push(format!("  {}", empty.text()));
    }

    for row in &view.rows {
        let marker = if row.selected { '>' } else { ' ' };
        let mut line = format!("{marker} [{}] {} ({})", row.id, row.name, row.institution);
        if !row.tags.is_empty() {
            line.push_str(&format!(" - {}", row.tags.join(", ")));
        }
        if row.recent {
            line.push_str(" *recent");
        }
        lines.push(line);
    }

    if view.show_pagination {
        lines.push(format!(
            "Page {}/{} (size {}){}{}",
            view.page,
            view.total_pages,
            view.page_size,
            if view.prev_enabled { " | prev" } else { "" },
            if view.next_enabled { " | next" } else { "" },
        ));
    }

    lines.join("\n")
}

fn describe_filters(filters: &FilterState) -> String {
    let mut parts = Vec::new();
    if !filters.search.trim().is_empty() {
        parts.push(format!("search {:?}", filters.search.trim()));
    }
    if let InstitutionFilter::Only(name) = &filters.institution {
        parts.push(format!("institution {name:?}"));
    }
    if filters.recent_only {
        parts.push("recent only".to_string());
    }
    if parts.is_empty() {
        "no filters".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn render_institutions(institutions: &[String]) -> String {
    if institutions.is_empty() {
        return "No institutions loaded.".to_string();
    }
    format!("Institutions: {}", institutions.join("; "))
}

pub fn render_detail(view: &DetailView) -> String {
    match view {
        DetailView::Idle => "No professor selected. Use `open <id>`.".to_string(),
        DetailView::Loading { id } => format!("Loading professor {id}..."),
        DetailView::Failed { message, .. } => format!("! {message}"),
        DetailView::Ready(detail) => render_professor(detail),
    }
}

fn render_professor(detail: &ProfessorDetail) -> String {
    let mut lines = vec![format!("== {} ({}) ==", detail.name, detail.institution)];

    lines.push(format!(
        "Email: {}",
        detail.email.as_deref().unwrap_or("(none on file)")
    ));
    if let Some(url) = &detail.profile_url {
        lines.push(format!("Profile: {url}"));
    }

    let mut facts = Vec::new();
    if let Some(h_index) = detail.h_index {
        facts.push(format!("h-index {h_index}"));
    }
    if detail.has_lab {
        facts.push("runs a lab".to_string());
    }
    if detail.has_recent_publication {
        facts.push("recent publication".to_string());
    }
    if !facts.is_empty() {
        lines.push(facts.join(" | "));
    }
    if !detail.top_tags.is_empty() {
        lines.push(format!("Topics: {}", detail.top_tags.join(", ")));
    }

    if let Some(bio) = detail.biography.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        lines.push(String::new());
        lines.push(bio.to_string());
    }

    if !detail.publications.is_empty() {
        lines.push(String::new());
        lines.push(format!("Publications ({}):", detail.publications.len()));
        for publication in detail.publications.iter().take(DETAIL_PUBLICATIONS) {
            let mut line = format!("  - {}", publication.title);
            if let Some(date) = &publication.published_on {
                line.push_str(&format!(" ({date})"));
            }
            if !publication.co_authors.is_empty() {
                line.push_str(&format!(" with {}", publication.co_authors.join(", ")));
            }
            lines.push(line);
            if let Some(link) = &publication.link {
                lines.push(format!("    {link}"));
            }
        }
    }

    if !detail.collaborators.is_empty() {
        let names: Vec<String> = detail
            .collaborators
            .iter()
            .take(DETAIL_COLLABORATORS)
            .map(|c| match &c.affiliation {
                Some(affiliation) => format!("{} ({affiliation})", c.name),
                None => c.name.clone(),
            })
            .collect();
        lines.push(format!("Collaborators: {}", names.join("; ")));
    }

    if let Some(refreshed) = &detail.last_refreshed_at {
        lines.push(format!("Last refreshed: {refreshed}"));
    }

    lines.join("\n")
}

pub fn render_email_form(view: &EmailFormView) -> String {
    let mut line = format!(
        "Email field: {}",
        if view.value.is_empty() { "(empty)" } else { &view.value }
    );
    if !view.submit_enabled {
        line.push_str(" [save unavailable]");
    }
    match view.message {
        Some(message) if message.is_error() => format!("{line}\n! {}", message.text()),
        Some(message) => format!("{line}\n{}", message.text()),
        None => line,
    }
}

pub fn render_draft(text: &str) -> String {
    if text.is_empty() {
        return "(draft is empty; open a professor first)".to_string();
    }
    format!("----- draft -----\n{text}\n-----------------")
}

pub fn render_health(status: &HealthStatus) -> String {
    match (status.ok, status.offline) {
        (true, false) => "Backend is up.".to_string(),
        (true, true) => "Backend is up in offline mode; data may be stale.".to_string(),
        (false, _) => "Backend reports it is unhealthy.".to_string(),
    }
}
