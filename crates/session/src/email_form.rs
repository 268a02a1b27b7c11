//! Email correction form state.

use serde::{Deserialize, Serialize};

/// User-facing outcome of the last submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailMessage {
    Saved,
    Empty,
    InvalidAddress,
    SaveFailed,
}

impl EmailMessage {
    pub fn text(self) -> &'static str {
        match self {
            Self::Saved => "Email saved.",
            Self::Empty => "Enter an email address before saving.",
            Self::InvalidAddress => "That email address is invalid. Check it and try again.",
            Self::SaveFailed => "Failed to save email. Please try again.",
        }
    }

    pub fn is_error(self) -> bool {
        !matches!(self, Self::Saved)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailForm {
    input: String,
    submitting: bool,
    message: Option<EmailMessage>,
}

impl EmailForm {
    /// Prefill from a freshly loaded professor.
    pub fn load(&mut self, email: Option<&str>) {
        self.input = email.unwrap_or_default().to_string();
        self.message = None;
    }

    /// User typed into the field.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.message = None;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn message(&self) -> Option<EmailMessage> {
        self.message
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    pub(crate) fn set_message(&mut self, message: EmailMessage) {
        self.message = Some(message);
    }
}
