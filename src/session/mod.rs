//! Validation Session
//!
//! The controller owning one request/response/render cycle, the async driver
//! that races requests against the response timer, and file watch mode.

pub mod controller;
pub mod driver;
pub mod watch;

pub use controller::{Attempt, SessionError, Trigger, ValidationSession};
pub use driver::{run_validation, spawn_validation, SharedSession};
pub use watch::{read_document, watch_file};
