//! Host runtime capability boundary
//!
//! The registry never knows how module import/teardown is achieved, only
//! that each call reports success or failure atomically. Adapters
//! implement [`HostRuntime`] against the actual host process.

use async_trait::async_trait;
use std::path::Path;

/// Host runtime failures
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Module import failed (the file may parse yet still fail at
    /// module-execution time; the syntax gate does not cover this)
    #[error("import of {module_path} failed: {message}")]
    ImportFailed {
        module_path: String,
        message: String,
    },

    /// Module teardown failed
    #[error("teardown of {module_path} failed: {message}")]
    TeardownFailed {
        module_path: String,
        message: String,
    },

    /// Host runtime itself is unavailable
    #[error("host runtime unavailable: {0}")]
    Unavailable(String),
}

/// Capability interface to the host runtime's module system
///
/// Both operations suspend for the duration of the host's import/teardown
/// work.
#[async_trait]
pub trait HostRuntime: Send + Sync {
    /// Import/register the module at `filepath` under `module_path`
    async fn import(&self, module_path: &str, filepath: &Path) -> Result<(), HostError>;

    /// Deregister the module at `module_path`
    async fn teardown(&self, module_path: &str) -> Result<(), HostError>;
}
