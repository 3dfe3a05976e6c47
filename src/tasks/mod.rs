//! Tasks module — per-user reminders
//!
//! Reminders are created from free-text times ("5pm", "in 2 hours"),
//! surfaced once when due, and kept after completion.

pub mod store;
pub mod types;

pub use store::TaskStore;
pub use types::{Task, TIME_FORMAT_HINT};
