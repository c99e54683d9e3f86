//! Pipeline outcome types
//!
//! Every pipeline run ends in one of a small closed set of tagged
//! results; nothing is silently dropped, and a failed step always yields
//! an explicit report.

use modsmith_registry::ExtensionRecord;
use modsmith_synthesis::FeatureSpec;
use std::path::PathBuf;

/// Result of a first-time creation request
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// Spec extracted, source synthesized, validated, and persisted.
    /// The artifact is on disk awaiting an explicit load.
    Success {
        feature_name: String,
        filepath: PathBuf,
        spec: FeatureSpec,
        source: String,
    },
    /// Rejected by policy: the service judged the request infeasible.
    /// Not a bug, a decision; no synthesis was attempted.
    Rejected { message: String },
    /// A pipeline step failed; shared state is unchanged (every mutation
    /// is gated by a prior successful check)
    Error { message: String },
}

impl PipelineOutcome {
    /// Whether the run produced a persisted artifact
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Result of an AI-assisted edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefineOutcome {
    /// Candidate validated, persisted, and (re)loaded
    Accepted {
        feature_name: String,
        filepath: PathBuf,
        record: ExtensionRecord,
    },
    /// Candidate failed validation; the on-disk artifact and any loaded
    /// module are untouched
    Rejected { reason: String },
    /// Candidate validated and was persisted, but the host refused the
    /// reload. The artifact is already overwritten; the caller decides
    /// whether to re-edit or roll back manually.
    LoadFailed {
        feature_name: String,
        message: String,
    },
}

impl RefineOutcome {
    /// Whether the edit was fully applied
    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_predicates() {
        let rejected = PipelineOutcome::Rejected {
            message: "infeasible".to_string(),
        };
        assert!(!rejected.is_success());

        let rejected_edit = RefineOutcome::Rejected {
            reason: "syntax error".to_string(),
        };
        assert!(!rejected_edit.is_accepted());
    }
}
