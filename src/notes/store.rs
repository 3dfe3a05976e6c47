//! Note store over the shared `notes.json` document

use crate::cache::{DocumentCache, PerUser};
use crate::error::Result;
use crate::notes::types::{date_display, Note};
use crate::timeparse::format_timestamp;
use chrono::NaiveDateTime;
use std::path::PathBuf;
use std::sync::Arc;

type NoteDocument = PerUser<Vec<Note>>;

/// Per-user quick notes
pub struct NoteStore {
    cache: Arc<DocumentCache>,
    path: PathBuf,
}

impl NoteStore {
    pub fn new(cache: Arc<DocumentCache>, path: PathBuf) -> Self {
        Self { cache, path }
    }

    /// Append a new note to the user's list
    pub fn add_note(
        &self,
        user_id: &str,
        title: &str,
        content: &str,
        now: NaiveDateTime,
    ) -> Result<Note> {
        let note = Note {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            timestamp: format_timestamp(now),
            date_display: date_display(now),
        };

        let mut document = self.read_for_update()?;
        document
            .entry(user_id.to_string())
            .or_default()
            .push(note.clone());
        self.cache.put(&self.path, &document)?;

        tracing::info!("Added note {} for user {}", note.id, user_id);
        Ok(note)
    }

    /// The user's notes in insertion order
    pub fn list_notes(&self, user_id: &str) -> Vec<Note> {
        self.cache
            .load_or(&self.path, NoteDocument::new())
            .remove(user_id)
            .unwrap_or_default()
    }

    pub fn get_note(&self, user_id: &str, note_id: &str) -> Option<Note> {
        self.list_notes(user_id).into_iter().find(|n| n.id == note_id)
    }

    /// Replace title, content and timestamps in place.
    ///
    /// Returns `Ok(None)` without writing if the note does not exist.
    pub fn update_note(
        &self,
        user_id: &str,
        note_id: &str,
        title: &str,
        content: &str,
        now: NaiveDateTime,
    ) -> Result<Option<Note>> {
        let mut document = self.read_for_update()?;
        let Some(note) = document
            .get_mut(user_id)
            .and_then(|notes| notes.iter_mut().find(|n| n.id == note_id))
        else {
            tracing::debug!("Note {} not found for user {}", note_id, user_id);
            return Ok(None);
        };

        note.title = title.to_string();
        note.content = content.to_string();
        note.timestamp = format_timestamp(now);
        note.date_display = date_display(now);
        let updated = note.clone();

        self.cache.put(&self.path, &document)?;
        Ok(Some(updated))
    }

    /// Remove every note with `note_id`, returning how many were removed
    pub fn delete_note(&self, user_id: &str, note_id: &str) -> Result<usize> {
        let mut document = self.read_for_update()?;
        let Some(notes) = document.get_mut(user_id) else {
            return Ok(0);
        };

        let before = notes.len();
        notes.retain(|n| n.id != note_id);
        let removed = before - notes.len();
        if removed == 0 {
            return Ok(0);
        }

        self.cache.put(&self.path, &document)?;
        tracing::info!("Deleted note {} for user {}", note_id, user_id);
        Ok(removed)
    }

    fn read_for_update(&self) -> Result<NoteDocument> {
        Ok(self.cache.load(&self.path)?.unwrap_or_default())
    }
}
