use std::time::Duration;

use outreach_core::draft::DirtyPolicy;
use outreach_core::pagination::DEFAULT_PAGE_SIZE;
use outreach_session::SessionOptions;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Front-end configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Backend base URL (default: `http://localhost:8000`).
    pub api_url: String,
    /// Per-request HTTP timeout in seconds (default: `15`).
    pub http_timeout_secs: u64,
    /// Professors per page (default: `20`).
    pub page_size: usize,
    /// Clear the draft's dirty flag when a different professor is opened.
    pub draft_reset_on_select: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            http_timeout_secs: 15,
            page_size: DEFAULT_PAGE_SIZE,
            draft_reset_on_select: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                  |
    /// |----------------------------------|--------------------------|
    /// | `OUTREACH_API_URL`               | `http://localhost:8000`  |
    /// | `OUTREACH_HTTP_TIMEOUT_SECS`     | `15`                     |
    /// | `OUTREACH_PAGE_SIZE`             | `20`                     |
    /// | `OUTREACH_DRAFT_RESET_ON_SELECT` | `false`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = lookup("OUTREACH_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_url);

        let http_timeout_secs = match lookup("OUTREACH_HTTP_TIMEOUT_SECS") {
            Some(raw) => parse_positive("OUTREACH_HTTP_TIMEOUT_SECS", &raw)?,
            None => defaults.http_timeout_secs,
        };

        let page_size = match lookup("OUTREACH_PAGE_SIZE") {
            Some(raw) => parse_positive("OUTREACH_PAGE_SIZE", &raw)?,
            None => defaults.page_size,
        };

        let draft_reset_on_select = match lookup("OUTREACH_DRAFT_RESET_ON_SELECT") {
            Some(raw) => parse_bool("OUTREACH_DRAFT_RESET_ON_SELECT", &raw)?,
            None => defaults.draft_reset_on_select,
        };

        Ok(Self {
            api_url,
            http_timeout_secs,
            page_size,
            draft_reset_on_select,
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            page_size: self.page_size,
            draft_policy: if self.draft_reset_on_select {
                DirtyPolicy::ResetOnNewSelection
            } else {
                DirtyPolicy::Persist
            },
        }
    }
}

fn parse_positive<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(ConfigError::Invalid {
            var,
            expected: "a positive integer",
            value: raw.to_string(),
        }),
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            expected: "a boolean",
            value: raw.to_string(),
        }),
    }
}
