//! Domain model and pure logic for the faculty outreach client.
//!
//! Everything here is synchronous and free of I/O so the session layer
//! and its tests can drive it without a network or a terminal.

pub mod draft;
pub mod email;
pub mod error;
pub mod filter;
pub mod model;
pub mod pagination;
pub mod types;
