//! Structured feature specifications
//!
//! The synthesis service's structured interpretation of a free-text
//! request. Created once per request, never mutated, discarded after the
//! pipeline run.

use serde::{Deserialize, Serialize};

/// One command the requested feature would expose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Command name
    pub name: String,
    /// Invocation syntax
    #[serde(default)]
    pub usage: String,
    /// What the command does
    #[serde(default)]
    pub description: String,
}

/// Estimated implementation complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

/// Structured interpretation of a feature request
///
/// The `is_feasible` flag is the service's own self-assessment; a `false`
/// here is a policy decision, not a parse failure, and is surfaced
/// separately by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    /// Normalized identifier, unique within the artifact namespace
    #[serde(default = "default_feature_name")]
    pub feature_name: String,
    /// Human-readable summary
    #[serde(default)]
    pub description: String,
    /// Commands the feature exposes
    #[serde(default)]
    pub commands: Vec<CommandDescriptor>,
    /// Free-text notes on persisted state the feature will need
    #[serde(default)]
    pub data_requirements: Vec<String>,
    /// Estimated complexity
    #[serde(default)]
    pub complexity: Complexity,
    /// Service self-assessment; gates the rest of the pipeline
    #[serde(default)]
    pub is_feasible: bool,
}

fn default_feature_name() -> String {
    "unknown_feature".to_string()
}

impl FeatureSpec {
    /// Normalize the feature name in place: lowercase, words joined by `_`
    ///
    /// Filesystem-level sanitization happens again in the artifact store;
    /// this only fixes up casing and separators from the service reply.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.feature_name = normalize_name(&self.feature_name);
        self
    }
}

/// Lowercase a name and join its words with underscores
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.trim().chars() {
        if c.is_whitespace() || c == '-' {
            pending_separator = !out.is_empty();
            continue;
        }
        if pending_separator {
            out.push('_');
            pending_separator = false;
        }
        out.extend(c.to_lowercase());
    }
    out
}
