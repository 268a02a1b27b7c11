//! REST client for the faculty directory backend.
//!
//! [`DirectoryApi`] wraps the backend's HTTP endpoints with [`reqwest`].
//! [`DirectoryBackend`] is the seam the session layer depends on, so it
//! can be driven by a scripted backend in tests.

pub mod api;
pub mod backend;

pub use api::{ApiError, DirectoryApi};
pub use backend::DirectoryBackend;
