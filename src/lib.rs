//! hexbrain - Local second-brain store
//!
//! The non-UI core of a personal assistant: reminders, quick notes and
//! per-user flags persisted as JSON documents in a local data directory.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Presentation layer / CLI                 │
//! └───────────────┬──────────────┬──────────────┬────────────┘
//!                 │              │              │
//!        ┌────────▼───┐   ┌──────▼─────┐  ┌─────▼──────────┐
//!        │ TaskStore  │   │ NoteStore  │  │PreferenceStore │
//!        └──┬──────┬──┘   └──────┬─────┘  └─────┬──────────┘
//!           │      │             │              │
//!  ┌────────▼──┐ ┌─▼─────────────▼──────────────▼─────────┐
//!  │ timeparse │ │ DocumentCache (mtime-keyed, shared)    │
//!  └───────────┘ └──────────────────┬─────────────────────┘
//!                                   │
//!                      <data_dir>/*.json  (DataPaths)
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: read-through JSON document cache invalidated by mtime
//! - [`paths`]: data directory layout
//! - [`matching`]: fuzzy string similarity
//! - [`timeparse`]: free-text time expressions
//! - [`tasks`], [`notes`], [`prefs`]: per-user stores
//! - [`export`]: per-user backup
//! - [`brain`]: opens a data directory and wires the stores
//! - [`config`]: configuration management

pub mod brain;
pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod matching;
pub mod notes;
pub mod paths;
pub mod prefs;
pub mod tasks;
pub mod timeparse;

pub use brain::Brain;
pub use cache::{DocumentCache, PerUser};
pub use config::HexConfig;
pub use error::{Error, Result};
pub use notes::{Note, NoteStore};
pub use paths::DataPaths;
pub use prefs::{PreferenceRecord, PreferenceStore};
pub use tasks::{Task, TaskStore};
