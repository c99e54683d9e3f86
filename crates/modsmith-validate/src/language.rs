//! Host languages for generated extension sources
//!
//! Provides [`Language`] identifying the grammar a candidate source is
//! validated against and the file extension artifacts are stored under.

use serde::{Deserialize, Serialize};

/// Supported host languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Rust
    Rust,
    /// TypeScript
    TypeScript,
    /// Python
    Python,
    /// Go
    Go,
}

impl Language {
    /// Get file extensions for this language
    #[inline]
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Rust => &["rs"],
            Language::TypeScript => &["ts", "tsx"],
            Language::Python => &["py"],
            Language::Go => &["go"],
        }
    }

    /// Primary file extension (used when naming artifact files)
    #[inline]
    #[must_use]
    pub fn primary_extension(&self) -> &'static str {
        self.extensions()[0]
    }

    /// Get human-readable name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Go => "go",
        }
    }

    /// Tree-sitter grammar for this language
    #[must_use]
    pub(crate) fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::Rust => tree_sitter_rust::LANGUAGE.into(),
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Python
    }
}
