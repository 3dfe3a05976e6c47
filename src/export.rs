//! Per-user backup export
//!
//! Layout of one export:
//! ```text
//! <export_base>/hex_export_<YYYYMMDD_HHMMSS>/
//! ├── my_knowledge.json          (copy of knowledge_user_<id>.json)
//! ├── my_notes.json              ({"notes": [...]})
//! └── gallery/
//!     ├── <image files>
//!     └── gallery_index.json     ({"gallery": [...]})
//! ```
//! Each part is only written when the user has data for it.

use crate::cache::{DocumentCache, PerUser};
use crate::error::{Error, Result};
use crate::notes::Note;
use crate::paths::DataPaths;
use chrono::NaiveDateTime;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Export everything `user_id` owns into a new timestamped folder under
/// `export_base`, returning the folder path
pub fn export_user_data(
    paths: &DataPaths,
    cache: &DocumentCache,
    user_id: &str,
    export_base: &Path,
    now: NaiveDateTime,
) -> Result<PathBuf> {
    std::fs::create_dir_all(export_base)?;

    let folder = export_base.join(format!("hex_export_{}", now.format("%Y%m%d_%H%M%S")));
    std::fs::create_dir(&folder).map_err(|e| {
        Error::Export(format!("Cannot create {}: {}", folder.display(), e))
    })?;

    let knowledge = paths.user_knowledge(user_id);
    if knowledge.exists() {
        std::fs::copy(&knowledge, folder.join("my_knowledge.json"))?;
    }

    let notes: Vec<Note> = cache
        .load::<PerUser<Vec<Note>>>(&paths.notes())?
        .and_then(|mut doc| doc.remove(user_id))
        .unwrap_or_default();
    if !notes.is_empty() {
        write_json(&folder.join("my_notes.json"), &json!({ "notes": notes }))?;
    }

    let gallery: Vec<Value> = cache
        .load::<PerUser<Vec<Value>>>(&paths.gallery())?
        .and_then(|mut doc| doc.remove(user_id))
        .unwrap_or_default();
    if !gallery.is_empty() {
        let gallery_dir = folder.join("gallery");
        std::fs::create_dir(&gallery_dir)?;

        for item in &gallery {
            let Some(image) = item.get("image_path").and_then(Value::as_str).map(Path::new) else {
                continue;
            };
            match image.file_name() {
                Some(name) if image.is_file() => {
                    std::fs::copy(image, gallery_dir.join(name))?;
                }
                _ => tracing::debug!("Skipping missing gallery image {}", image.display()),
            }
        }

        write_json(
            &gallery_dir.join("gallery_index.json"),
            &json!({ "gallery": gallery }),
        )?;
    }

    tracing::info!("Exported data for user {} to {}", user_id, folder.display());
    Ok(folder)
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::NoteStore;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(17, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_export_empty_user() {
        let data = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let paths = DataPaths::new(data.path()).unwrap();
        let cache = DocumentCache::new();

        let folder = export_user_data(&paths, &cache, "alice", out.path(), now()).unwrap();
        assert_eq!(folder, out.path().join("hex_export_20240501_173005"));
        assert!(folder.is_dir());
        assert_eq!(std::fs::read_dir(&folder).unwrap().count(), 0);
    }

    #[test]
    fn test_export_full() {
        let data = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let paths = DataPaths::new(data.path()).unwrap();
        let cache = Arc::new(DocumentCache::new());

        std::fs::write(paths.user_knowledge("alice"), r#"{"q": "a"}"#).unwrap();

        let notes = NoteStore::new(cache.clone(), paths.notes());
        notes.add_note("alice", "Mine", "keep", now()).unwrap();
        notes.add_note("bob", "Theirs", "skip", now()).unwrap();

        let image = paths.gallery_images_dir().join("sunset.png");
        std::fs::write(&image, b"png-bytes").unwrap();
        let gallery = json!({
            "alice": [
                {"title": "Sunset", "image_path": image.to_string_lossy()},
                {"title": "Lost", "image_path": "/definitely/missing.png"}
            ]
        });
        cache.put(&paths.gallery(), &gallery).unwrap();

        let folder = export_user_data(&paths, &cache, "alice", out.path(), now()).unwrap();

        assert_eq!(
            std::fs::read_to_string(folder.join("my_knowledge.json")).unwrap(),
            r#"{"q": "a"}"#
        );

        let exported: Value =
            serde_json::from_str(&std::fs::read_to_string(folder.join("my_notes.json")).unwrap())
                .unwrap();
        let exported_notes = exported["notes"].as_array().unwrap();
        assert_eq!(exported_notes.len(), 1);
        assert_eq!(exported_notes[0]["title"], "Mine");

        assert_eq!(
            std::fs::read(folder.join("gallery").join("sunset.png")).unwrap(),
            b"png-bytes"
        );
        let index: Value = serde_json::from_str(
            &std::fs::read_to_string(folder.join("gallery").join("gallery_index.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(index["gallery"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_export_same_second_fails() {
        let data = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let paths = DataPaths::new(data.path()).unwrap();
        let cache = DocumentCache::new();

        export_user_data(&paths, &cache, "alice", out.path(), now()).unwrap();
        let err = export_user_data(&paths, &cache, "alice", out.path(), now()).unwrap_err();
        assert!(matches!(err, Error::Export(_)));
    }
}
