//! Feature pipeline orchestrator
//!
//! Composes spec extraction → feasibility gate → code synthesis →
//! validation gate → artifact persistence for first-time creation, and
//! exposes the refinement and lifecycle paths to the presentation layer.
//! First-time creation persists but does not load: the first load is an
//! explicit registry operation from the management surface.

use crate::config::ModsmithConfig;
use crate::error::FeatureError;
use crate::keyed_lock::KeyedLock;
use crate::refine::RefinementLoop;
use crate::types::{PipelineOutcome, RefineOutcome};
use modsmith_registry::{ExtensionRegistry, HostRuntime};
use modsmith_store::ArtifactStore;
use modsmith_synthesis::{CodeSynthesizer, SpecExtractor, SynthesisService};
use modsmith_validate::SyntaxValidator;
use std::sync::Arc;

/// The feature pipeline orchestrator
///
/// Owns the injected pipeline components; all shared state (sandbox
/// directory, registry records) is reached only through them.
#[derive(Debug)]
pub struct FeatureManager {
    config: ModsmithConfig,
    extractor: SpecExtractor,
    synthesizer: CodeSynthesizer,
    validator: SyntaxValidator,
    store: ArtifactStore,
    registry: Arc<ExtensionRegistry>,
    refiner: RefinementLoop,
    locks: KeyedLock,
}

impl FeatureManager {
    /// Create the pipeline over a synthesis service and host runtime
    ///
    /// # Errors
    /// Returns `FeatureError::Store` if the sandbox root cannot be created.
    pub fn new(
        service: Arc<dyn SynthesisService>,
        host: Arc<dyn HostRuntime>,
        config: ModsmithConfig,
    ) -> Result<Self, FeatureError> {
        let store = ArtifactStore::new(&config.sandbox_dir, config.language)?;
        let registry = Arc::new(ExtensionRegistry::new(host, store.clone()));

        let extractor = SpecExtractor::new(service.clone(), config.synthesis_timeout_secs);
        let synthesizer = CodeSynthesizer::new(
            service,
            config.language,
            config.code_block_policy,
            config.synthesis_timeout_secs,
        );
        let validator = SyntaxValidator::new(config.language);
        let locks = KeyedLock::new();
        let refiner = RefinementLoop::new(
            synthesizer.clone(),
            validator,
            store.clone(),
            registry.clone(),
            locks.clone(),
        );

        Ok(Self {
            config,
            extractor,
            synthesizer,
            validator,
            store,
            registry,
            refiner,
            locks,
        })
    }

    /// Run the full creation pipeline for a free-text feature request
    ///
    /// Every outcome is one of the closed tagged set: `Success`,
    /// `Rejected` (infeasible by policy), or `Error`. Failed steps never
    /// leave partial state: validation runs before the write, and the
    /// write is the last step.
    pub async fn process_request(&self, request_text: &str) -> PipelineOutcome {
        tracing::info!("processing feature request");

        // 1. Interpret the request
        let mut spec = match self.extractor.extract(request_text).await {
            Ok(spec) => spec,
            Err(e) => {
                tracing::warn!(error = %e, "spec extraction failed");
                return PipelineOutcome::Error {
                    message: e.to_string(),
                };
            }
        };

        // 2. Feasibility gate: an infeasible spec never reaches synthesis
        if !spec.is_feasible {
            tracing::warn!(feature = %spec.feature_name, "request rejected as infeasible");
            return PipelineOutcome::Rejected {
                message: format!("feature {:?} deemed not feasible", spec.feature_name),
            };
        }

        // The sanitized name is the artifact key; locking must use the
        // same key the refinement and delete paths use
        let key = match modsmith_store::sanitize_feature_name(&spec.feature_name) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(feature = %spec.feature_name, error = %e, "unusable feature name");
                return PipelineOutcome::Error {
                    message: e.to_string(),
                };
            }
        };
        // The spec travels inside the success outcome; its name must agree
        // with the artifact key
        spec.feature_name.clone_from(&key);
        let _guard = self.locks.acquire(&key).await;

        // 3. Synthesize
        let source = match self.synthesizer.synthesize(&spec).await {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(feature = %spec.feature_name, error = %e, "synthesis failed");
                return PipelineOutcome::Error {
                    message: e.to_string(),
                };
            }
        };

        // 4. Validate before any write
        let validation = self.validator.validate(&source);
        if !validation.ok {
            let message = validation
                .error_message
                .unwrap_or_else(|| "candidate failed validation".to_string());
            tracing::warn!(feature = %spec.feature_name, %message, "validation failed");
            return PipelineOutcome::Error { message };
        }

        // 5. Persist; loading waits for explicit approval
        let filepath = match self.store.save(&key, &source) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!(feature = %spec.feature_name, error = %e, "persist failed");
                return PipelineOutcome::Error {
                    message: e.to_string(),
                };
            }
        };

        tracing::info!(feature = %key, path = %filepath.display(), "feature created");
        PipelineOutcome::Success {
            feature_name: key,
            filepath,
            spec,
            source,
        }
    }

    /// Apply an AI-assisted edit to an existing feature
    ///
    /// # Errors
    /// See [`RefinementLoop::refine`].
    pub async fn refine(
        &self,
        feature_name: &str,
        instruction: &str,
    ) -> Result<RefineOutcome, FeatureError> {
        self.refiner.refine(feature_name, instruction).await
    }

    /// Delete a feature: unload from the host, then remove the artifact
    ///
    /// Returns whether an artifact existed.
    ///
    /// # Errors
    /// Returns `FeatureError::Registry` if unload fails (nothing deleted).
    pub async fn delete(&self, feature_name: &str) -> Result<bool, FeatureError> {
        let key = modsmith_store::sanitize_feature_name(feature_name)?;
        let _guard = self.locks.acquire(&key).await;
        Ok(self.registry.delete(&key).await?)
    }

    /// Extension registry, for direct load/unload/reload by the
    /// management surface
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<ExtensionRegistry> {
        &self.registry
    }

    /// Artifact store, for list/read management views
    #[inline]
    #[must_use]
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ModsmithConfig {
        &self.config
    }
}
