//! Sandboxed artifact store
//!
//! Persists generated extension sources under a single sandbox root, one
//! file per feature. There is no index file: listing is a directory scan
//! and existence is file existence. Writes are last-writer-wins; callers
//! needing stronger guarantees hold the per-feature lock above this layer.

use crate::error::StoreError;
use crate::sanitize::sanitize_feature_name;
use chrono::{DateTime, Utc};
use modsmith_validate::Language;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable unit: one persisted extension source
///
/// Invariant: an artifact on disk is always syntactically valid source.
/// The validation gate runs before every write, never after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Artifact key and filename stem
    pub feature_name: String,
    /// Location under the sandbox directory
    pub filepath: PathBuf,
    /// Current persisted source
    pub source_text: String,
    /// Creation time (file metadata)
    pub created_at: DateTime<Utc>,
    /// Last write time (file metadata)
    pub updated_at: DateTime<Utc>,
}

/// Filesystem-backed artifact store confined to one sandbox directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
    language: Language,
}

impl ArtifactStore {
    /// Create store rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the sandbox root cannot be created.
    pub fn new(root: impl Into<PathBuf>, language: Language) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self { root, language })
    }

    /// Sandbox root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Language artifacts are stored as
    #[inline]
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Resolve the on-disk path for a feature name
    ///
    /// # Errors
    /// Returns `StoreError::InvalidName` if the name sanitizes to nothing.
    pub fn filepath_for(&self, feature_name: &str) -> Result<PathBuf, StoreError> {
        let stem = sanitize_feature_name(feature_name)?;
        Ok(self
            .root
            .join(format!("{stem}.{}", self.language.primary_extension())))
    }

    /// Write source for a feature, overwriting any previous version
    ///
    /// Callers must have validated `source_text` first; this layer never
    /// re-checks it.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidName` or `StoreError::Io`.
    pub fn save(&self, feature_name: &str, source_text: &str) -> Result<PathBuf, StoreError> {
        let path = self.filepath_for(feature_name)?;
        fs::write(&path, source_text).map_err(|e| StoreError::io(&path, e))?;
        tracing::debug!(feature = feature_name, path = %path.display(), "artifact saved");
        Ok(path)
    }

    /// Read the current source for a feature
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no artifact exists.
    pub fn read(&self, feature_name: &str) -> Result<String, StoreError> {
        let path = self.filepath_for(feature_name)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(feature_name.to_string()));
        }
        fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))
    }

    /// Read an artifact with its file metadata
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no artifact exists.
    pub fn artifact(&self, feature_name: &str) -> Result<GeneratedArtifact, StoreError> {
        let path = self.filepath_for(feature_name)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(feature_name.to_string()));
        }
        let source_text = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        let meta = fs::metadata(&path).map_err(|e| StoreError::io(&path, e))?;

        let updated_at = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        // Creation time is not available on every filesystem
        let created_at = meta
            .created()
            .map(DateTime::<Utc>::from)
            .unwrap_or(updated_at);

        Ok(GeneratedArtifact {
            feature_name: sanitize_feature_name(feature_name)?,
            filepath: path,
            source_text,
            created_at,
            updated_at,
        })
    }

    /// Remove the artifact file for a feature
    ///
    /// Returns `false` if no artifact existed; deleting a missing artifact
    /// is not an error.
    ///
    /// # Errors
    /// Returns `StoreError::Io` on filesystem failure.
    pub fn delete(&self, feature_name: &str) -> Result<bool, StoreError> {
        let path = self.filepath_for(feature_name)?;
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;
        tracing::debug!(feature = feature_name, "artifact deleted");
        Ok(true)
    }

    /// Whether an artifact exists for the feature
    #[must_use]
    pub fn exists(&self, feature_name: &str) -> bool {
        self.filepath_for(feature_name)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    /// Enumerate all feature names currently on disk
    ///
    /// Directory scan over the sandbox root; files with a foreign extension
    /// are ignored.
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the root cannot be read.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let ext = self.language.primary_extension();
        let mut names = Vec::new();

        let entries = fs::read_dir(&self.root).map_err(|e| StoreError::io(&self.root, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(ext) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, ArtifactStore) {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path().join("generated"), Language::Python).unwrap();
        (dir, store)
    }

    #[test]
    fn save_then_read_round_trips() {
        let (_dir, store) = store();
        let path = store.save("dice_roller", "def roll(): pass\n").unwrap();
        assert!(path.ends_with("dice_roller.py"));
        assert_eq!(store.read("dice_roller").unwrap(), "def roll(): pass\n");
    }

    #[test]
    fn save_overwrites_existing() {
        let (_dir, store) = store();
        store.save("poll", "v1").unwrap();
        store.save("poll", "v2").unwrap();
        assert_eq!(store.read("poll").unwrap(), "v2");
    }

    #[test]
    fn read_missing_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(
            store.read("ghost"),
            Err(StoreError::NotFound(name)) if name == "ghost"
        ));
    }

    #[test]
    fn delete_reports_existence() {
        let (_dir, store) = store();
        store.save("tmp", "x = 1\n").unwrap();
        assert!(store.delete("tmp").unwrap());
        assert!(!store.delete("tmp").unwrap());
        assert!(!store.exists("tmp"));
    }

    #[test]
    fn list_scans_directory() {
        let (_dir, store) = store();
        store.save("b_feature", "pass\n").unwrap();
        store.save("a_feature", "pass\n").unwrap();
        assert_eq!(store.list().unwrap(), vec!["a_feature", "b_feature"]);
    }

    #[test]
    fn list_ignores_foreign_files() {
        let (_dir, store) = store();
        store.save("real", "pass\n").unwrap();
        fs::write(store.root().join("notes.txt"), "notes").unwrap();
        assert_eq!(store.list().unwrap(), vec!["real"]);
    }

    #[test]
    fn hostile_name_confined_to_root() {
        let (_dir, store) = store();
        let path = store.save("../../etc/passwd", "pass\n").unwrap();
        assert!(path.starts_with(store.root()));
        assert_eq!(store.list().unwrap(), vec!["etc_passwd"]);
    }

    #[test]
    fn artifact_carries_metadata() {
        let (_dir, store) = store();
        store.save("meta", "x = 1\n").unwrap();
        let artifact = store.artifact("meta").unwrap();
        assert_eq!(artifact.feature_name, "meta");
        assert_eq!(artifact.source_text, "x = 1\n");
        assert!(artifact.updated_at >= artifact.created_at);
    }
}
