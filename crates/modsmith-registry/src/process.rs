//! Subprocess host adapter
//!
//! Probes importability of an artifact by byte-compiling it in a spawned
//! interpreter process. The subprocess is the isolation boundary: nothing
//! from the candidate module ever runs inside this process. Teardown is a
//! bookkeeping no-op at the process boundary, since nothing stays resident
//! between probes.

use crate::host::{HostError, HostRuntime};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Host adapter backed by an interpreter subprocess
#[derive(Debug, Clone)]
pub struct ProcessHost {
    interpreter: String,
}

impl ProcessHost {
    /// Create adapter for an interpreter binary
    #[inline]
    #[must_use]
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// Python host (`python3 -m py_compile`)
    #[inline]
    #[must_use]
    pub fn python() -> Self {
        Self::new("python3")
    }
}

#[async_trait]
impl HostRuntime for ProcessHost {
    async fn import(&self, module_path: &str, filepath: &Path) -> Result<(), HostError> {
        let output = Command::new(&self.interpreter)
            .arg("-m")
            .arg("py_compile")
            .arg(filepath)
            .output()
            .await
            .map_err(|e| HostError::Unavailable(format!("{}: {e}", self.interpreter)))?;

        if output.status.success() {
            tracing::debug!(module = module_path, "import probe succeeded");
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(HostError::ImportFailed {
                module_path: module_path.to_string(),
                message: stderr.trim().to_string(),
            })
        }
    }

    async fn teardown(&self, module_path: &str) -> Result<(), HostError> {
        tracing::debug!(module = module_path, "teardown (no resident state)");
        Ok(())
    }
}
