//! Email update request and its client-side checks.
//!
//! The client only rejects values that can never be right (blank or
//! absurdly long). Address syntax is the backend's call; it answers
//! `422` for a malformed address.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Upper bound on an address length (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 320;

/// Body of `POST /professors/{id}/email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct UpdateEmailRequest {
    #[validate(length(min = 1, max = 320))]
    pub email: String,
}

/// Response of `POST /professors/{id}/email`: the stored, canonical value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateEmailResponse {
    pub email: String,
}

impl UpdateEmailRequest {
    /// Trim `candidate` and check it is worth sending.
    pub fn new(candidate: &str) -> Result<Self, CoreError> {
        let request = Self {
            email: candidate.trim().to_string(),
        };
        if request.email.is_empty() {
            return Err(CoreError::Validation("email must not be empty".to_string()));
        }
        request
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        Ok(request)
    }
}
