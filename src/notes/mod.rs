//! Notes module — per-user quick notes with full CRUD

pub mod store;
pub mod types;

pub use store::NoteStore;
pub use types::Note;
