//! Reminder store over the shared `tasks.json` document
//!
//! Every mutation is a full read-modify-write of the document. Reads that
//! hit a corrupt document fall back to an empty collection; mutations refuse
//! to run so the corrupt file is never overwritten.

use crate::cache::{DocumentCache, PerUser};
use crate::error::{Error, Result};
use crate::tasks::types::{Task, TIME_FORMAT_HINT};
use crate::timeparse::{format_timestamp, parse_time};
use chrono::NaiveDateTime;
use std::path::PathBuf;
use std::sync::Arc;

type TaskDocument = PerUser<Vec<Task>>;

/// Per-user reminders
pub struct TaskStore {
    cache: Arc<DocumentCache>,
    path: PathBuf,
}

impl TaskStore {
    pub fn new(cache: Arc<DocumentCache>, path: PathBuf) -> Self {
        Self { cache, path }
    }

    /// Create a reminder due at the time described by `time_text`.
    ///
    /// Nothing is persisted when the time cannot be parsed.
    pub fn create_task(
        &self,
        user_id: &str,
        reason: &str,
        time_text: &str,
        now: NaiveDateTime,
    ) -> Result<Task> {
        let due = parse_time(time_text, now).ok_or_else(|| {
            tracing::debug!("Unparseable reminder time {:?} for user {}", time_text, user_id);
            Error::UnparseableTime(TIME_FORMAT_HINT.to_string())
        })?;

        let task = Task {
            id: uuid::Uuid::new_v4().to_string(),
            reason: reason.to_string(),
            time: format_timestamp(due),
            created: format_timestamp(now),
            completed: false,
            notified: false,
        };

        let mut document = self.read_for_update()?;
        document
            .entry(user_id.to_string())
            .or_default()
            .push(task.clone());
        self.cache.put(&self.path, &document)?;

        tracing::info!("Created task {} for user {} due {}", task.id, user_id, task.time);
        Ok(task)
    }

    /// All of a user's tasks in insertion order
    pub fn list_tasks(&self, user_id: &str) -> Vec<Task> {
        self.read().remove(user_id).unwrap_or_default()
    }

    /// Tasks due at or before `now` that are neither completed nor notified.
    ///
    /// Tasks whose stored time does not parse are skipped.
    pub fn pending_tasks(&self, user_id: &str, now: NaiveDateTime) -> Vec<Task> {
        self.list_tasks(user_id)
            .into_iter()
            .filter(|task| {
                if task.due_at().is_none() {
                    tracing::debug!("Skipping task {} with malformed time {:?}", task.id, task.time);
                    return false;
                }
                task.is_pending(now)
            })
            .collect()
    }

    /// Mark a task as surfaced to the user. Unknown ids are ignored.
    pub fn mark_notified(&self, user_id: &str, task_id: &str) -> Result<()> {
        self.update_task(user_id, task_id, |task| task.notified = true)
    }

    /// Mark a task as done. Unknown ids are ignored.
    pub fn mark_completed(&self, user_id: &str, task_id: &str) -> Result<()> {
        self.update_task(user_id, task_id, |task| task.completed = true)
    }

    fn update_task(&self, user_id: &str, task_id: &str, apply: impl FnOnce(&mut Task)) -> Result<()> {
        let mut document = self.read_for_update()?;
        let Some(task) = document
            .get_mut(user_id)
            .and_then(|tasks| tasks.iter_mut().find(|t| t.id == task_id))
        else {
            tracing::debug!("Task {} not found for user {}", task_id, user_id);
            return Ok(());
        };

        apply(task);
        self.cache.put(&self.path, &document)
    }

    fn read(&self) -> TaskDocument {
        self.cache.load_or(&self.path, TaskDocument::new())
    }

    fn read_for_update(&self) -> Result<TaskDocument> {
        Ok(self.cache.load(&self.path)?.unwrap_or_default())
    }
}
