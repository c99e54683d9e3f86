//! Code synthesis for extension sources
//!
//! Turns a [`FeatureSpec`] (create) or an existing source plus an edit
//! instruction (modify) into candidate source text via the synthesis
//! service. Candidates are never trusted: the validation gate runs before
//! anything is persisted.

use crate::error::SynthesisError;
use crate::extract::{extract_code, CodeBlockPolicy};
use crate::service::{complete_with_timeout, SynthesisService};
use crate::spec::FeatureSpec;
use modsmith_validate::Language;
use std::sync::Arc;

/// Synthesizes candidate extension sources
#[derive(Clone)]
pub struct CodeSynthesizer {
    service: Arc<dyn SynthesisService>,
    language: Language,
    policy: CodeBlockPolicy,
    timeout_secs: u64,
}

impl std::fmt::Debug for CodeSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeSynthesizer")
            .field("language", &self.language)
            .field("policy", &self.policy)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl CodeSynthesizer {
    /// Create synthesizer over a synthesis service
    #[inline]
    #[must_use]
    pub fn new(
        service: Arc<dyn SynthesisService>,
        language: Language,
        policy: CodeBlockPolicy,
        timeout_secs: u64,
    ) -> Self {
        Self {
            service,
            language,
            policy,
            timeout_secs,
        }
    }

    /// Target language for generated sources
    #[inline]
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Synthesize a fresh extension source from a spec
    ///
    /// # Errors
    /// - `SynthesisError::EmptyOutput` / `MissingCodeBlock` on unusable replies
    /// - `SynthesisError::Timeout` / `Service` from the call
    pub async fn synthesize(&self, spec: &FeatureSpec) -> Result<String, SynthesisError> {
        let spec_json = serde_json::to_string_pretty(spec)
            .map_err(|e| SynthesisError::Extraction(format!("spec serialization failed: {e}")))?;
        let prompt = create_prompt(&spec_json, self.language);

        let reply = complete_with_timeout(self.service.as_ref(), &prompt, self.timeout_secs).await?;
        let source = extract_code(&reply, self.policy)?;
        tracing::debug!(
            feature = %spec.feature_name,
            bytes = source.len(),
            "source synthesized"
        );
        Ok(source)
    }

    /// Produce the complete modified source for an existing artifact
    ///
    /// The template demands the full modified source back, never a diff.
    ///
    /// # Errors
    /// Same as [`CodeSynthesizer::synthesize`].
    pub async fn modify(
        &self,
        existing_source: &str,
        instruction: &str,
    ) -> Result<String, SynthesisError> {
        let prompt = modify_prompt(existing_source, instruction, self.language);

        let reply = complete_with_timeout(self.service.as_ref(), &prompt, self.timeout_secs).await?;
        let source = extract_code(&reply, self.policy)?;
        tracing::debug!(bytes = source.len(), "modified source synthesized");
        Ok(source)
    }
}

/// Instruction template for first-time synthesis
fn create_prompt(spec_json: &str, language: Language) -> String {
    let lang = language.name();
    format!(
        r#"Generate a {lang} extension module for the assistant based on the following feature specification.

Specification:
{spec_json}

Requirements:
1. Implement every listed command
2. Include all necessary imports
3. Implement error handling
4. If data needs to be persisted, use the `data/` directory
5. Output only the code, inside a fenced markdown code block"#
    )
}

/// Instruction template for AI-assisted edits
fn modify_prompt(existing_source: &str, instruction: &str, language: Language) -> String {
    let lang = language.name();
    format!(
        r#"Modify the following {lang} code according to the instruction.

Instruction:
{instruction}

Original code:
```{lang}
{existing_source}
```

Requirements:
1. Output the complete modified source, not a diff
2. Output only the code, inside a fenced markdown code block
3. Preserve existing behavior; apply only the instructed change"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::spec::FeatureSpec;
    use async_trait::async_trait;

    struct FixedReply(String);

    #[async_trait]
    impl SynthesisService for FixedReply {
        async fn complete(&self, _prompt: &str) -> Result<String, ServiceError> {
            Ok(self.0.clone())
        }
    }

    fn spec() -> FeatureSpec {
        serde_json::from_str(r#"{"feature_name": "dice_roller", "is_feasible": true}"#).unwrap()
    }

    fn synthesizer(reply: &str, policy: CodeBlockPolicy) -> CodeSynthesizer {
        CodeSynthesizer::new(
            Arc::new(FixedReply(reply.to_string())),
            Language::Python,
            policy,
            30,
        )
    }

    #[tokio::test]
    async fn synthesize_extracts_fenced_source() {
        let reply = "```python\nimport random\n\ndef roll():\n    return random.randint(1, 6)\n```";
        let source = synthesizer(reply, CodeBlockPolicy::Lenient)
            .synthesize(&spec())
            .await
            .unwrap();
        assert!(source.starts_with("import random"));
    }

    #[tokio::test]
    async fn empty_reply_is_rejected() {
        let result = synthesizer("   ", CodeBlockPolicy::Lenient)
            .synthesize(&spec())
            .await;
        assert!(matches!(result, Err(SynthesisError::EmptyOutput)));
    }

    #[tokio::test]
    async fn modify_uses_raw_reply_under_lenient_policy() {
        let source = synthesizer("x = 2", CodeBlockPolicy::Lenient)
            .modify("x = 1", "change x to 2")
            .await
            .unwrap();
        assert_eq!(source, "x = 2");
    }

    #[tokio::test]
    async fn modify_rejects_unfenced_reply_under_strict_policy() {
        let result = synthesizer("x = 2", CodeBlockPolicy::Strict)
            .modify("x = 1", "change x to 2")
            .await;
        assert!(matches!(result, Err(SynthesisError::MissingCodeBlock)));
    }

    #[test]
    fn create_prompt_embeds_spec_and_language() {
        let prompt = create_prompt("{\"feature_name\": \"x\"}", Language::Python);
        assert!(prompt.contains("python"));
        assert!(prompt.contains("feature_name"));
    }

    #[test]
    fn modify_prompt_demands_complete_source() {
        let prompt = modify_prompt("x = 1", "rename x", Language::Python);
        assert!(prompt.contains("complete modified source"));
        assert!(prompt.contains("x = 1"));
    }
}
