//! Modsmith Core - feature pipeline orchestration
//!
//! The orchestrator layer that turns a free-text feature request into a
//! runnable extension module and keeps it healthy afterwards:
//! - [`FeatureManager`]: creation pipeline (extract → gate → synthesize →
//!   validate → persist) and the lifecycle entry points
//! - [`RefinementLoop`]: AI-assisted edit with swap-or-reject semantics
//! - Per-feature keyed locking around every pipeline that mutates shared
//!   state
//!
//! # Example
//!
//! ```rust,ignore
//! use modsmith_core::{FeatureManager, ModsmithConfig, PipelineOutcome};
//!
//! # async fn example(service: std::sync::Arc<dyn modsmith_synthesis::SynthesisService>,
//! #                  host: std::sync::Arc<dyn modsmith_registry::HostRuntime>)
//! #                  -> Result<(), modsmith_core::FeatureError> {
//! let manager = FeatureManager::new(service, host, ModsmithConfig::new())?;
//!
//! match manager.process_request("add a dice roller").await {
//!     PipelineOutcome::Success { feature_name, .. } => {
//!         manager.registry().load(&feature_name).await?;
//!     }
//!     PipelineOutcome::Rejected { message } | PipelineOutcome::Error { message } => {
//!         eprintln!("{message}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod keyed_lock;
pub mod manager;
pub mod refine;
pub mod types;

pub use config::ModsmithConfig;
pub use error::FeatureError;
pub use keyed_lock::{KeyedGuard, KeyedLock};
pub use manager::FeatureManager;
pub use refine::RefinementLoop;
pub use types::{PipelineOutcome, RefineOutcome};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the feature pipeline
    pub use crate::{
        FeatureError, FeatureManager, ModsmithConfig, PipelineOutcome, RefineOutcome,
    };
    pub use modsmith_registry::{ExtensionRegistry, HostRuntime, LoadState};
    pub use modsmith_store::ArtifactStore;
    pub use modsmith_synthesis::{CodeBlockPolicy, FeatureSpec, SynthesisService};
    pub use modsmith_validate::{Language, SyntaxValidator};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
