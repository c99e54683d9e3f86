//! Dynamic extension registry
//!
//! Tracks which artifacts are currently loaded into the running host
//! process and performs load / unload / reload / delete against the host
//! runtime. The keyed record store is owned here and accessed only
//! through these methods; no ambient state.
//!
//! State machine per feature: unloaded (implicit) → loaded → unloaded →
//! loaded → removed (terminal, after delete).

use crate::error::RegistryError;
use crate::host::HostRuntime;
use dashmap::DashMap;
use modsmith_store::{sanitize_feature_name, ArtifactStore};
use std::sync::Arc;

/// Load state of one extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Not active in the host process
    Unloaded,
    /// Definitions active in-process
    Loaded,
}

/// Runtime registry entry; at most one per feature name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRecord {
    /// Feature name (registry key)
    pub feature_name: String,
    /// Host-runtime identifier, derived deterministically from the name
    pub module_path: String,
    /// Current load state
    pub load_state: LoadState,
}

/// Derive the host module path for a feature name
#[must_use]
pub fn module_path_for(feature_name: &str) -> String {
    format!("generated.{feature_name}")
}

/// Host-level dynamic loader for generated extensions
pub struct ExtensionRegistry {
    records: DashMap<String, ExtensionRecord>,
    host: Arc<dyn HostRuntime>,
    store: ArtifactStore,
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("record_count", &self.records.len())
            .finish_non_exhaustive()
    }
}

impl ExtensionRegistry {
    /// Create registry over a host runtime and the artifact store
    #[inline]
    #[must_use]
    pub fn new(host: Arc<dyn HostRuntime>, store: ArtifactStore) -> Self {
        Self {
            records: DashMap::new(),
            host,
            store,
        }
    }

    /// Current record for a feature, if one exists
    #[must_use]
    pub fn record(&self, feature_name: &str) -> Option<ExtensionRecord> {
        let key = sanitize_feature_name(feature_name).ok()?;
        self.records.get(&key).map(|r| r.clone())
    }

    /// Whether the feature is currently loaded
    #[must_use]
    pub fn is_loaded(&self, feature_name: &str) -> bool {
        self.record(feature_name)
            .is_some_and(|r| r.load_state == LoadState::Loaded)
    }

    /// Load an extension into the host process
    ///
    /// # Errors
    /// - `RegistryError::AlreadyLoaded` if the record is in state loaded
    /// - `RegistryError::NotFound` if no artifact exists on disk
    /// - `RegistryError::Load` on host import failure; the record remains
    ///   unloaded
    pub async fn load(&self, feature_name: &str) -> Result<ExtensionRecord, RegistryError> {
        let key = sanitize_feature_name(feature_name)?;

        if let Some(record) = self.records.get(&key) {
            if record.load_state == LoadState::Loaded {
                return Err(RegistryError::AlreadyLoaded(key));
            }
        }

        let filepath = self.store.filepath_for(&key)?;
        if !self.store.exists(&key) {
            return Err(RegistryError::NotFound(key));
        }

        let module_path = module_path_for(&key);
        match self.host.import(&module_path, &filepath).await {
            Ok(()) => {
                let record = ExtensionRecord {
                    feature_name: key.clone(),
                    module_path,
                    load_state: LoadState::Loaded,
                };
                self.records.insert(key.clone(), record.clone());
                tracing::info!(feature = %key, "extension loaded");
                Ok(record)
            }
            Err(e) => {
                // Lazily created record stays unloaded
                self.records.insert(
                    key.clone(),
                    ExtensionRecord {
                        feature_name: key.clone(),
                        module_path,
                        load_state: LoadState::Unloaded,
                    },
                );
                tracing::error!(feature = %key, error = %e, "extension load failed");
                Err(RegistryError::Load {
                    feature: key,
                    source: e,
                })
            }
        }
    }

    /// Unload an extension from the host process
    ///
    /// No-op success when the feature is already unloaded or has no
    /// record.
    ///
    /// # Errors
    /// Returns `RegistryError::Unload` if host teardown fails; the record
    /// then still reflects the loaded module.
    pub async fn unload(&self, feature_name: &str) -> Result<(), RegistryError> {
        let key = sanitize_feature_name(feature_name)?;

        let module_path = match self.records.get(&key) {
            Some(record) if record.load_state == LoadState::Loaded => record.module_path.clone(),
            _ => return Ok(()),
        };

        self.host
            .teardown(&module_path)
            .await
            .map_err(|e| RegistryError::Unload {
                feature: key.clone(),
                source: e,
            })?;

        if let Some(mut record) = self.records.get_mut(&key) {
            record.load_state = LoadState::Unloaded;
        }
        tracing::info!(feature = %key, "extension unloaded");
        Ok(())
    }

    /// Reload an extension as one logical operation
    ///
    /// If loaded: unload then load — either both succeed or the record is
    /// left unloaded with the error surfaced, never in an ambiguous state.
    /// If not loaded: behaves as [`ExtensionRegistry::load`].
    ///
    /// # Errors
    /// Same as [`ExtensionRegistry::load`] and [`ExtensionRegistry::unload`].
    pub async fn reload(&self, feature_name: &str) -> Result<ExtensionRecord, RegistryError> {
        let key = sanitize_feature_name(feature_name)?;

        if self.is_loaded(&key) {
            if let Err(e) = self.unload(&key).await {
                // The record must not stay ambiguous after a failed reload
                if let Some(mut record) = self.records.get_mut(&key) {
                    record.load_state = LoadState::Unloaded;
                }
                return Err(e);
            }
        }
        self.load(&key).await
    }

    /// Delete an extension: unload first, then remove the artifact
    ///
    /// Never leaves a loaded registry record pointing at a deleted
    /// artifact. Returns whether an artifact file existed.
    ///
    /// # Errors
    /// Returns `RegistryError::Unload` (nothing deleted) or a store error.
    pub async fn delete(&self, feature_name: &str) -> Result<bool, RegistryError> {
        let key = sanitize_feature_name(feature_name)?;

        // Unload must succeed (or be a no-op) before the file goes away
        self.unload(&key).await?;

        let existed = self.store.delete(&key)?;
        self.records.remove(&key);
        tracing::info!(feature = %key, existed, "extension deleted");
        Ok(existed)
    }

    /// Feature names with a record in the loaded state
    #[must_use]
    pub fn loaded(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.load_state == LoadState::Loaded)
            .map(|r| r.feature_name.clone())
            .collect();
        names.sort();
        names
    }
}
