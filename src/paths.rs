//! On-disk layout of the data directory
//!
//! ```text
//! <data_dir>/
//! ├── users.json
//! ├── knowledge_hex.json
//! ├── knowledge_user_<id>.json
//! ├── spelling_map.json
//! ├── spelling_rejected.json
//! ├── notes.json
//! ├── tasks.json
//! ├── user_prefs.json
//! ├── gallery.json
//! └── gallery_images/
//! ```
//!
//! Every record type lives in a single document shared by all users, keyed
//! by user id.

use std::path::{Path, PathBuf};

/// Resolved paths for one data directory
#[derive(Debug, Clone)]
pub struct DataPaths {
    data_dir: PathBuf,
}

impl DataPaths {
    /// Use `data_dir` as the root, creating it and the gallery image
    /// directory if they do not exist yet
    pub fn new(data_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let paths = Self {
            data_dir: data_dir.into(),
        };
        std::fs::create_dir_all(&paths.data_dir)?;
        std::fs::create_dir_all(paths.gallery_images_dir())?;
        tracing::debug!("Data directory ready at {}", paths.data_dir.display());
        Ok(paths)
    }

    /// Default directory (~/.hexbrain/data/)
    pub fn default_dir() -> PathBuf {
        dirs_next::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hexbrain")
            .join("data")
    }

    /// Default export base (~/HEX_Backups/)
    pub fn default_export_dir() -> PathBuf {
        dirs_next::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("HEX_Backups")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn users(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    /// Shared knowledge base
    pub fn knowledge(&self) -> PathBuf {
        self.data_dir.join("knowledge_hex.json")
    }

    /// Knowledge taught by a single user
    pub fn user_knowledge(&self, user_id: &str) -> PathBuf {
        self.data_dir.join(format!("knowledge_user_{}.json", user_id))
    }

    pub fn spelling_map(&self) -> PathBuf {
        self.data_dir.join("spelling_map.json")
    }

    pub fn spelling_rejected(&self) -> PathBuf {
        self.data_dir.join("spelling_rejected.json")
    }

    pub fn notes(&self) -> PathBuf {
        self.data_dir.join("notes.json")
    }

    pub fn tasks(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }

    pub fn user_prefs(&self) -> PathBuf {
        self.data_dir.join("user_prefs.json")
    }

    pub fn gallery(&self) -> PathBuf {
        self.data_dir.join("gallery.json")
    }

    pub fn gallery_images_dir(&self) -> PathBuf {
        self.data_dir.join("gallery_images")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_layout() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("data");
        let paths = DataPaths::new(&root).unwrap();

        assert!(root.is_dir());
        assert!(paths.gallery_images_dir().is_dir());
        assert_eq!(paths.data_dir(), root.as_path());
    }

    #[test]
    fn test_new_is_idempotent() {
        let dir = TempDir::new().unwrap();
        DataPaths::new(dir.path()).unwrap();
        assert!(DataPaths::new(dir.path()).is_ok());
    }

    #[test]
    fn test_document_paths() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path()).unwrap();

        assert_eq!(paths.tasks(), dir.path().join("tasks.json"));
        assert_eq!(paths.notes(), dir.path().join("notes.json"));
        assert_eq!(paths.user_prefs(), dir.path().join("user_prefs.json"));
        assert_eq!(paths.knowledge(), dir.path().join("knowledge_hex.json"));
        assert_eq!(
            paths.user_knowledge("alice"),
            dir.path().join("knowledge_user_alice.json")
        );
        assert_eq!(paths.spelling_map(), dir.path().join("spelling_map.json"));
        assert_eq!(paths.spelling_rejected(), dir.path().join("spelling_rejected.json"));
        assert_eq!(paths.users(), dir.path().join("users.json"));
        assert_eq!(paths.gallery(), dir.path().join("gallery.json"));
    }

    #[test]
    fn test_default_dirs() {
        assert!(DataPaths::default_dir().ends_with(".hexbrain/data"));
        assert!(DataPaths::default_export_dir().ends_with("HEX_Backups"));
    }
}
