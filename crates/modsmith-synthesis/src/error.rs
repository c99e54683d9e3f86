//! Error types for synthesis and spec extraction

/// Failure at the synthesis service boundary
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Service is not configured or unreachable
    #[error("synthesis service unavailable: {0}")]
    Unavailable(String),

    /// Service returned an error reply
    #[error("synthesis service request failed: {0}")]
    RequestFailed(String),
}

/// Synthesis pipeline errors
///
/// All variants leave shared state (files, registry) unchanged: synthesis
/// occurs strictly before validation and persistence.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// Structured spec reply could not be parsed
    #[error("spec extraction failed: {0}")]
    Extraction(String),

    /// Strict extraction found no fenced code block in the reply
    #[error("no fenced code block in synthesis reply")]
    MissingCodeBlock,

    /// Service produced empty or whitespace-only output
    #[error("synthesis produced empty output")]
    EmptyOutput,

    /// Service call exceeded the configured timeout
    #[error("synthesis timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Underlying service failure
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
}
