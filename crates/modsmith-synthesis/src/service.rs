//! Synthesis service boundary
//!
//! The external text-generation capability is consumed as a black box:
//! one request/response text exchange per call. Everything behind this
//! trait (provider, transport, model) is out of scope for the pipeline.

use crate::error::{ServiceError, SynthesisError};
use async_trait::async_trait;
use std::time::Duration;

/// External code-synthesis capability
///
/// Implementations suspend the calling flow until a reply (or error) is
/// received; timeouts are enforced by the caller, not here.
#[async_trait]
pub trait SynthesisService: Send + Sync {
    /// Send one prompt, receive one free-text reply
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

/// Run one service call under the configured timeout
///
/// Elapsing aborts the whole pipeline run with `SynthesisError::Timeout`;
/// this always happens before any state is persisted or loaded.
pub(crate) async fn complete_with_timeout(
    service: &dyn SynthesisService,
    prompt: &str,
    timeout_secs: u64,
) -> Result<String, SynthesisError> {
    match tokio::time::timeout(Duration::from_secs(timeout_secs), service.complete(prompt)).await {
        Ok(reply) => Ok(reply?),
        Err(_) => Err(SynthesisError::Timeout { timeout_secs }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowService;

    #[async_trait]
    impl SynthesisService for SlowService {
        async fn complete(&self, _prompt: &str) -> Result<String, ServiceError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_service_times_out() {
        let result = complete_with_timeout(&SlowService, "p", 5).await;
        assert!(matches!(
            result,
            Err(SynthesisError::Timeout { timeout_secs: 5 })
        ));
    }
}

