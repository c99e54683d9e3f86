//! AI-assisted edit loop
//!
//! Edits an existing feature via a free-text instruction: synthesize →
//! validate → persist → reload, rejecting the entire step if validation
//! fails so that the previously-loaded version stays untouched.

use crate::error::FeatureError;
use crate::keyed_lock::KeyedLock;
use crate::types::RefineOutcome;
use modsmith_registry::ExtensionRegistry;
use modsmith_store::{sanitize_feature_name, ArtifactStore};
use modsmith_synthesis::CodeSynthesizer;
use modsmith_validate::SyntaxValidator;
use std::sync::Arc;

/// Orchestrates edit-and-reload for existing features
#[derive(Debug, Clone)]
pub struct RefinementLoop {
    synthesizer: CodeSynthesizer,
    validator: SyntaxValidator,
    store: ArtifactStore,
    registry: Arc<ExtensionRegistry>,
    locks: KeyedLock,
}

impl RefinementLoop {
    /// Create refinement loop over shared pipeline components
    #[inline]
    #[must_use]
    pub fn new(
        synthesizer: CodeSynthesizer,
        validator: SyntaxValidator,
        store: ArtifactStore,
        registry: Arc<ExtensionRegistry>,
        locks: KeyedLock,
    ) -> Self {
        Self {
            synthesizer,
            validator,
            store,
            registry,
            locks,
        }
    }

    /// Apply an edit instruction to an existing feature
    ///
    /// Swap-or-reject semantics: a validation failure returns
    /// [`RefineOutcome::Rejected`] with zero observable state change. A
    /// host reload failure after the write is surfaced as
    /// [`RefineOutcome::LoadFailed`] — the artifact is already
    /// overwritten and is not rolled back.
    ///
    /// # Errors
    /// - `FeatureError::Store` if the artifact does not exist
    /// - `FeatureError::Synthesis` on service failure, timeout, or empty
    ///   output (all before any state change)
    pub async fn refine(
        &self,
        feature_name: &str,
        instruction: &str,
    ) -> Result<RefineOutcome, FeatureError> {
        let key = sanitize_feature_name(feature_name)?;
        let _guard = self.locks.acquire(&key).await;

        let current = self.store.read(&key)?;
        tracing::info!(feature = %key, "refining feature");

        let candidate = self.synthesizer.modify(&current, instruction).await?;

        let validation = self.validator.validate(&candidate);
        if !validation.ok {
            let reason = validation
                .error_message
                .unwrap_or_else(|| "candidate failed validation".to_string());
            tracing::warn!(feature = %key, %reason, "edit rejected, artifact untouched");
            return Ok(RefineOutcome::Rejected { reason });
        }

        let filepath = self.store.save(&key, &candidate)?;

        // Reload behaves as load when the feature was not previously loaded
        match self.registry.reload(&key).await {
            Ok(record) => {
                tracing::info!(feature = %key, "edit applied and reloaded");
                Ok(RefineOutcome::Accepted {
                    feature_name: key,
                    filepath,
                    record,
                })
            }
            Err(e) => {
                tracing::error!(
                    feature = %key,
                    error = %e,
                    "reload failed after write; artifact already overwritten"
                );
                Ok(RefineOutcome::LoadFailed {
                    feature_name: key,
                    message: e.to_string(),
                })
            }
        }
    }
}
