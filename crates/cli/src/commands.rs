//! Parsing of interactive command lines.

use outreach_core::filter::InstitutionFilter;
use outreach_core::types::ProfessorId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Search(String),
    Institutions,
    Institution(InstitutionFilter),
    RecentOnly(bool),
    Page(usize),
    Next,
    Prev,
    PageSize(usize),
    Open(ProfessorId),
    ShowDraft,
    EditDraft(String),
    ResetDraft,
    ShowEmail,
    SubmitEmail(String),
    Refresh,
    Health,
    State,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Expected a number, got {0:?}")]
    NotANumber(String),
}

pub const HELP: &str = "\
Commands:
  list                     show the current page
  search [text]            filter by name or institution (blank clears)
  institution              list known institutions
  institution <name|all>   filter by institution
  recent on|off            only professors with a recent publication
  page <n> | next | prev   move between pages
  size <n>                 professors per page
  open <id>                load a professor's detail
  draft                    show the outreach draft
  draft set <text>         replace the draft (use \\n for line breaks)
  draft reset              discard edits and regenerate
  email                    show the email form
  email <address>          save a corrected email for the open professor
  refresh                  reload the directory
  health                   check the backend
  state                    dump the session as JSON
  quit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "list" | "ls" => Command::List,
        "search" | "find" => Command::Search(rest.to_string()),
        "institution" | "inst" if rest.is_empty() => Command::Institutions,
        "institution" | "inst" => Command::Institution(InstitutionFilter::parse(rest)),
        "recent" => match rest.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" => Command::RecentOnly(true),
            "off" | "no" | "false" => Command::RecentOnly(false),
            _ => return Err(ParseError::Usage("recent on|off")),
        },
        "page" => Command::Page(number(rest, "page <n>")?),
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "size" => Command::PageSize(number(rest, "size <n>")?),
        "open" | "o" => Command::Open(number(rest, "open <id>")?),
        "draft" => parse_draft(rest)?,
        "email" => {
            if rest.is_empty() {
                Command::ShowEmail
            } else {
                Command::SubmitEmail(rest.to_string())
            }
        }
        "refresh" | "reload" => Command::Refresh,
        "health" => Command::Health,
        "state" => Command::State,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_draft(rest: &str) -> Result<Command, ParseError> {
    if rest.is_empty() {
        return Ok(Command::ShowDraft);
    }
    let (sub, text) = match rest.split_once(char::is_whitespace) {
        Some((sub, text)) => (sub, text.trim_start()),
        None => (rest, ""),
    };
    match sub.to_ascii_lowercase().as_str() {
        "set" => Ok(Command::EditDraft(unescape(text))),
        "reset" => Ok(Command::ResetDraft),
        _ => Err(ParseError::Usage("draft [set <text> | reset]")),
    }
}

fn number<T: std::str::FromStr>(raw: &str, usage: &'static str) -> Result<T, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    raw.parse().map_err(|_| ParseError::NotANumber(raw.to_string()))
}

/// Expand `\n` and `\\` so multi-line drafts fit on one input line.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
