//! Wiring of the stores around one shared document cache

use crate::cache::DocumentCache;
use crate::error::Result;
use crate::export::export_user_data;
use crate::notes::NoteStore;
use crate::paths::DataPaths;
use crate::prefs::PreferenceStore;
use crate::tasks::TaskStore;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// All stores for one data directory
pub struct Brain {
    paths: DataPaths,
    cache: Arc<DocumentCache>,
    tasks: TaskStore,
    notes: NoteStore,
    prefs: PreferenceStore,
}

impl Brain {
    /// Open (and create if needed) the data directory
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let paths = DataPaths::new(data_dir)?;
        let cache = Arc::new(DocumentCache::new());

        Ok(Self {
            tasks: TaskStore::new(cache.clone(), paths.tasks()),
            notes: NoteStore::new(cache.clone(), paths.notes()),
            prefs: PreferenceStore::new(cache.clone(), paths.user_prefs()),
            cache,
            paths,
        })
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// The shared cache, for documents without a dedicated store
    pub fn cache(&self) -> &Arc<DocumentCache> {
        &self.cache
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn prefs(&self) -> &PreferenceStore {
        &self.prefs
    }

    /// See [`export_user_data`]
    pub fn export(&self, user_id: &str, export_base: &Path, now: NaiveDateTime) -> Result<PathBuf> {
        export_user_data(&self.paths, &self.cache, user_id, export_base, now)
    }
}
