//! Error types for the feature pipeline
//!
//! Taxonomy per the propagation policy: extraction, synthesis, and
//! validation failures leave all shared state unchanged; a load failure
//! after a successful write is the one case where state has already
//! moved.

use modsmith_registry::RegistryError;
use modsmith_store::StoreError;
use modsmith_synthesis::SynthesisError;

/// Top-level feature pipeline error
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// Spec extraction or code synthesis failed
    #[error("synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Artifact store failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Registry/host failure
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl FeatureError {
    /// Whether the failure left all shared state (files, registry)
    /// unchanged, so the caller can simply retry or re-phrase
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Synthesis happens strictly before validation and persistence
            Self::Synthesis(_) => true,
            Self::Store(StoreError::NotFound(_) | StoreError::InvalidName(_)) => true,
            Self::Store(StoreError::Io { .. }) => false,
            Self::Registry(e) => matches!(
                e,
                RegistryError::AlreadyLoaded(_) | RegistryError::NotFound(_)
            ),
        }
    }
}
