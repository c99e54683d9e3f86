//! Pipeline configuration

use modsmith_synthesis::CodeBlockPolicy;
use modsmith_validate::Language;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Modsmith configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModsmithConfig {
    /// Sandbox root all artifacts are confined to
    pub sandbox_dir: PathBuf,
    /// Language generated extensions are written in
    pub language: Language,
    /// How synthesis replies without a fenced block are treated
    pub code_block_policy: CodeBlockPolicy,
    /// Timeout for each synthesis service call
    pub synthesis_timeout_secs: u64,
}

impl ModsmithConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With sandbox directory
    #[inline]
    #[must_use]
    pub fn with_sandbox_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sandbox_dir = dir.into();
        self
    }

    /// With target language
    #[inline]
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// With code block policy
    #[inline]
    #[must_use]
    pub fn with_code_block_policy(mut self, policy: CodeBlockPolicy) -> Self {
        self.code_block_policy = policy;
        self
    }

    /// With synthesis timeout
    #[inline]
    #[must_use]
    pub fn with_synthesis_timeout_secs(mut self, secs: u64) -> Self {
        self.synthesis_timeout_secs = secs;
        self
    }
}

impl Default for ModsmithConfig {
    fn default() -> Self {
        Self {
            sandbox_dir: PathBuf::from("generated"),
            language: Language::Python,
            code_block_policy: CodeBlockPolicy::Lenient,
            synthesis_timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ModsmithConfig::new();
        assert_eq!(config.language, Language::Python);
        assert_eq!(config.code_block_policy, CodeBlockPolicy::Lenient);
        assert_eq!(config.synthesis_timeout_secs, 60);
    }

    #[test]
    fn builder_overrides() {
        let config = ModsmithConfig::new()
            .with_sandbox_dir("/tmp/sandbox")
            .with_language(Language::Rust)
            .with_code_block_policy(CodeBlockPolicy::Strict)
            .with_synthesis_timeout_secs(10);
        assert_eq!(config.sandbox_dir, PathBuf::from("/tmp/sandbox"));
        assert_eq!(config.language, Language::Rust);
        assert_eq!(config.code_block_policy, CodeBlockPolicy::Strict);
        assert_eq!(config.synthesis_timeout_secs, 10);
    }
}
