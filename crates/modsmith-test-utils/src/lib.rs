//! Testing utilities for the modsmith workspace
//!
//! Shared test doubles for the two external boundaries (synthesis
//! service, host runtime) plus fixture sources and reply builders.

#![allow(missing_docs)]

use async_trait::async_trait;
use modsmith_registry::{HostError, HostRuntime};
use modsmith_synthesis::{ServiceError, SynthesisService};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// A syntactically valid python extension source
pub const VALID_PYTHON: &str = "import random\n\n\ndef roll():\n    return random.randint(1, 6)\n";

/// A second valid source, distinguishable from [`VALID_PYTHON`]
pub const VALID_PYTHON_V2: &str =
    "import random\n\n\ndef roll():\n    return random.randint(1, 20)\n";

/// A source that fails the syntax gate
pub const BROKEN_PYTHON: &str = "def broken(:\n    pass\n";

/// Build a fenced JSON spec reply as the service would produce it
#[must_use]
pub fn spec_reply(feature_name: &str, is_feasible: bool) -> String {
    format!(
        "```json\n{{\"feature_name\": \"{feature_name}\", \"description\": \"test feature\", \
         \"commands\": [], \"data_requirements\": [], \"complexity\": \"low\", \
         \"is_feasible\": {is_feasible}}}\n```"
    )
}

/// Build a fenced python code reply as the service would produce it
#[must_use]
pub fn code_reply(source: &str) -> String {
    format!("```python\n{source}\n```")
}

/// Synthesis service replaying a scripted sequence of replies
///
/// Each `complete` call pops the next reply; running out of script is a
/// service failure so tests fail loudly instead of looping.
#[derive(Debug, Default)]
pub struct ScriptedService {
    replies: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedService {
    #[must_use]
    pub fn new(replies: impl IntoIterator<Item = String>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies
            .lock()
            .expect("reply script lock")
            .push_back(reply.into());
    }

    /// Number of `complete` calls observed
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisService for ScriptedService {
    async fn complete(&self, _prompt: &str) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .expect("reply script lock")
            .pop_front()
            .ok_or_else(|| ServiceError::RequestFailed("scripted replies exhausted".to_string()))
    }
}

/// Host runtime that records calls and fails on demand
#[derive(Debug, Default)]
pub struct RecordingHost {
    imports: Mutex<Vec<String>>,
    teardowns: Mutex<Vec<String>>,
    fail_imports: AtomicBool,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent import fail
    pub fn fail_imports(&self, fail: bool) {
        self.fail_imports.store(fail, Ordering::SeqCst);
    }

    /// Module paths imported so far
    #[must_use]
    pub fn imports(&self) -> Vec<String> {
        self.imports.lock().expect("imports lock").clone()
    }

    /// Module paths torn down so far
    #[must_use]
    pub fn teardowns(&self) -> Vec<String> {
        self.teardowns.lock().expect("teardowns lock").clone()
    }
}

#[async_trait]
impl HostRuntime for RecordingHost {
    async fn import(&self, module_path: &str, _filepath: &Path) -> Result<(), HostError> {
        if self.fail_imports.load(Ordering::SeqCst) {
            return Err(HostError::ImportFailed {
                module_path: module_path.to_string(),
                message: "scripted import failure".to_string(),
            });
        }
        self.imports
            .lock()
            .expect("imports lock")
            .push(module_path.to_string());
        Ok(())
    }

    async fn teardown(&self, module_path: &str) -> Result<(), HostError> {
        self.teardowns
            .lock()
            .expect("teardowns lock")
            .push(module_path.to_string());
        Ok(())
    }
}
