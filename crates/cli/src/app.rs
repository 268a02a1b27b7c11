//! Interactive event loop.
//!
//! Commands are handled synchronously against the controller. Backend
//! round-trips run as spawned tasks and report back over an mpsc channel,
//! so the prompt stays responsive while a detail fetch or an email save
//! is in flight.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use outreach_client::DirectoryBackend;
use outreach_core::filter::InstitutionFilter;
use outreach_core::model::HealthStatus;
use outreach_core::types::ProfessorId;
use outreach_session::view::DetailView;
use outreach_session::{SelectOutcome, SessionController, SessionError};

use crate::commands::{self, Command, HELP};
use crate::output;

/// Completion of a spawned backend round-trip.
#[derive(Debug)]
pub enum Event {
    Loaded(Result<usize, SessionError>),
    Selected(ProfessorId, Result<SelectOutcome, SessionError>),
    EmailSaved(ProfessorId, Result<String, SessionError>),
    Health(Result<HealthStatus, SessionError>),
}

pub struct App<B> {
    controller: Arc<SessionController<B>>,
    events: mpsc::UnboundedSender<Event>,
}

impl<B: DirectoryBackend + 'static> App<B> {
    pub fn new(controller: Arc<SessionController<B>>, events: mpsc::UnboundedSender<Event>) -> Self {
        Self { controller, events }
    }

    /// Run one command and return the text to print.
    pub fn handle(&self, command: Command) -> anyhow::Result<String> {
        let controller = &self.controller;

        let output = match command {
            Command::Help => HELP.to_string(),
            Command::List => self.list(),
            Command::Search(text) => {
                controller.set_search(text);
                self.list()
            }
            Command::Institutions => output::render_institutions(&controller.list_view().institutions),
            Command::Institution(choice) => match self.resolve_institution(choice) {
                Some(filter) => {
                    controller.set_institution(filter);
                    self.list()
                }
                None => format!(
                    "! Unknown institution.\n{}",
                    output::render_institutions(&controller.list_view().institutions)
                ),
            },
            Command::RecentOnly(on) => {
                controller.set_recent_only(on);
                self.list()
            }
            Command::Page(page) => {
                controller.set_page(page);
                self.list()
            }
            Command::Next => {
                controller.next_page();
                self.list()
            }
            Command::Prev => {
                controller.prev_page();
                self.list()
            }
            Command::PageSize(size) => match controller.set_page_size(size) {
                Ok(()) => self.list(),
                Err(err) => format!("! {err}"),
            },
            Command::Open(id) => {
                self.spawn_select(id);
                output::render_detail(&DetailView::Loading { id })
            }
            Command::ShowDraft => output::render_draft(&controller.draft_text()),
            Command::EditDraft(text) => {
                controller.edit_draft(text);
                "Draft updated. It will no longer be regenerated automatically.".to_string()
            }
            Command::ResetDraft => {
                controller.reset_draft();
                output::render_draft(&controller.draft_text())
            }
            Command::ShowEmail => output::render_email_form(&controller.email_form_view()),
            Command::SubmitEmail(candidate) => self.submit_email(candidate),
            Command::Refresh => {
                self.spawn_load();
                "Refreshing directory...".to_string()
            }
            Command::Health => {
                self.spawn_health();
                "Checking backend...".to_string()
            }
            Command::State => serde_json::to_string_pretty(&controller.snapshot())?,
            Command::Quit => String::new(),
        };
        Ok(output)
    }

    /// Text to print for a completed round-trip, if any.
    pub fn render_event(&self, event: Event) -> Option<String> {
        match event {
            Event::Loaded(Ok(_)) => Some(self.list()),
            Event::Loaded(Err(err)) => {
                tracing::debug!(error = %err, "Load result rendered with banner");
                Some(self.list())
            }
            Event::Selected(_, Ok(SelectOutcome::Applied)) => Some(format!(
                "{}\n\n{}",
                output::render_detail(&self.controller.detail_view()),
                output::render_draft(&self.controller.draft_text())
            )),
            Event::Selected(_, Ok(SelectOutcome::Superseded)) => None,
            Event::Selected(_, Err(_)) => Some(output::render_detail(&self.controller.detail_view())),
            Event::EmailSaved(_, Err(SessionError::SubmitInFlight)) => {
                Some("! An email update is already in progress.".to_string())
            }
            Event::EmailSaved(..) => Some(output::render_email_form(&self.controller.email_form_view())),
            Event::Health(Ok(status)) => Some(output::render_health(&status)),
            Event::Health(Err(err)) => Some(format!("! {err}")),
        }
    }

    fn list(&self) -> String {
        output::render_list(&self.controller.list_view())
    }

    /// Match a typed institution against the observed ones, ignoring case.
    fn resolve_institution(&self, choice: InstitutionFilter) -> Option<InstitutionFilter> {
        match choice {
            InstitutionFilter::All => Some(InstitutionFilter::All),
            InstitutionFilter::Only(name) => self
                .controller
                .list_view()
                .institutions
                .into_iter()
                .find(|known| known.eq_ignore_ascii_case(&name))
                .map(InstitutionFilter::Only),
        }
    }

    fn submit_email(&self, candidate: String) -> String {
        let id = match self.controller.detail_view() {
            DetailView::Ready(detail) => detail.id,
            _ => return "! Open a professor before editing their email.".to_string(),
        };
        if !self.controller.email_form_view().submit_enabled {
            return "! An email update is already in progress.".to_string();
        }
        self.spawn_submit(id, candidate);
        "Saving email...".to_string()
    }

    pub fn spawn_load(&self) {
        let controller = Arc::clone(&self.controller);
        let events = self.events.clone();
        tokio::spawn(async move {
            let _ = events.send(Event::Loaded(controller.load().await));
        });
    }

    pub fn spawn_health(&self) {
        let controller = Arc::clone(&self.controller);
        let events = self.events.clone();
        tokio::spawn(async move {
            let _ = events.send(Event::Health(controller.check_health().await));
        });
    }

    fn spawn_select(&self, id: ProfessorId) {
        let controller = Arc::clone(&self.controller);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = controller.select(id).await;
            let _ = events.send(Event::Selected(id, result));
        });
    }

    fn spawn_submit(&self, id: ProfessorId, candidate: String) {
        let controller = Arc::clone(&self.controller);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = controller.submit_email(id, &candidate).await;
            let _ = events.send(Event::EmailSaved(id, result));
        });
    }
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run<B: DirectoryBackend + 'static>(controller: Arc<SessionController<B>>) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let app = App::new(controller, tx);

    app.spawn_health();
    app.spawn_load();
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match commands::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => println!("{}", app.handle(command)?),
                    Err(err) => println!("! {err}"),
                }
            }
            Some(event) = rx.recv() => {
                if let Some(text) = app.render_event(event) {
                    println!("{text}");
                }
            }
        }
    }

    tracing::info!("Session ended");
    Ok(())
}
