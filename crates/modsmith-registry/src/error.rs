//! Error types for the extension registry

use crate::host::HostError;
use modsmith_store::StoreError;

/// Extension registry errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Load requested for a feature already in the loaded state
    #[error("extension already loaded: {0}")]
    AlreadyLoaded(String),

    /// No artifact exists for the feature
    #[error("extension not found: {0}")]
    NotFound(String),

    /// Host runtime refused to import a file that parsed successfully
    #[error("load of {feature} failed: {source}")]
    Load {
        feature: String,
        #[source]
        source: HostError,
    },

    /// Host runtime failed to tear the module down
    #[error("unload of {feature} failed: {source}")]
    Unload {
        feature: String,
        #[source]
        source: HostError,
    },

    /// Artifact store failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
