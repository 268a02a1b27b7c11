//! Client session state machine for the faculty directory.
//!
//! - [`SessionState`] -- one serializable struct holding the directory,
//!   filters, pagination, selected detail, draft and email form.
//! - [`SessionController`] -- owns the state and a [`DirectoryBackend`],
//!   runs the asynchronous operations and applies their results.
//! - [`view`] -- pure projections of the state for a front-end to draw.
//!
//! [`DirectoryBackend`]: outreach_client::DirectoryBackend

pub mod controller;
pub mod detail;
pub mod email_form;
pub mod error;
pub mod pager;
pub mod state;
pub mod store;
pub mod view;

pub use controller::SessionController;
pub use detail::{DetailState, SelectOutcome, SelectionToken};
pub use error::SessionError;
pub use state::{SessionOptions, SessionState};
