//! Spec extraction from free-text requests
//!
//! Turns a natural-language feature request into a structured
//! [`FeatureSpec`] by delegating to the synthesis service with a fixed
//! instruction template and parsing its structured reply.

use crate::error::SynthesisError;
use crate::extract::extract_structured;
use crate::service::{complete_with_timeout, SynthesisService};
use crate::spec::FeatureSpec;
use std::sync::Arc;

/// Interprets feature requests into structured specs
#[derive(Clone)]
pub struct SpecExtractor {
    service: Arc<dyn SynthesisService>,
    timeout_secs: u64,
}

impl std::fmt::Debug for SpecExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecExtractor")
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl SpecExtractor {
    /// Create extractor over a synthesis service
    #[inline]
    #[must_use]
    pub fn new(service: Arc<dyn SynthesisService>, timeout_secs: u64) -> Self {
        Self {
            service,
            timeout_secs,
        }
    }

    /// Extract a structured spec from a free-text request
    ///
    /// Parses the reply permissively: a fenced structured block if
    /// present, otherwise the whole reply. `is_feasible == false` in the
    /// result is a normal outcome, not an error.
    ///
    /// # Errors
    /// - `SynthesisError::Extraction` when the reply cannot be parsed
    /// - `SynthesisError::Timeout` / `SynthesisError::Service` from the call
    pub async fn extract(&self, request_text: &str) -> Result<FeatureSpec, SynthesisError> {
        let prompt = spec_prompt(request_text);
        let reply = complete_with_timeout(self.service.as_ref(), &prompt, self.timeout_secs).await?;

        let payload = extract_structured(&reply);
        let spec: FeatureSpec = serde_json::from_str(&payload)
            .map_err(|e| SynthesisError::Extraction(format!("malformed spec payload: {e}")))?;
        let spec = spec.normalized();

        tracing::debug!(
            feature = %spec.feature_name,
            feasible = spec.is_feasible,
            commands = spec.commands.len(),
            "spec extracted"
        );
        Ok(spec)
    }
}

/// Fixed instruction template for spec extraction
fn spec_prompt(request_text: &str) -> String {
    format!(
        r#"Analyze the following user request and extract the requirements for a new assistant feature as JSON.

Request: "{request_text}"

Required output format:
{{
    "feature_name": "feature name (english, snake_case)",
    "description": "summary of the feature",
    "commands": [
        {{
            "name": "command name",
            "usage": "invocation syntax",
            "description": "what the command does"
        }}
    ],
    "data_requirements": ["persisted state needed (e.g. a json file)"],
    "complexity": "low/medium/high",
    "is_feasible": true/false
}}"#
    )
}
