//! Terminal front-end for the faculty directory client.
//!
//! - [`config`] -- environment-driven settings.
//! - [`commands`] -- parsing of the interactive command language.
//! - [`output`] -- text rendering of the session view models.
//! - [`app`] -- the event loop tying stdin, the controller and spawned
//!   backend round-trips together.

pub mod app;
pub mod commands;
pub mod config;
pub mod output;
