//! Modsmith Registry - dynamic extension lifecycle
//!
//! The host-level loader for generated extensions:
//! - Keyed record store tracking which artifacts are active in-process
//! - load / unload / reload / delete with explicit state transitions
//! - [`HostRuntime`] capability boundary; the registry never knows how
//!   import/teardown is achieved
//!
//! # Example
//!
//! ```rust,ignore
//! use modsmith_registry::{ExtensionRegistry, ProcessHost};
//! use std::sync::Arc;
//!
//! let registry = ExtensionRegistry::new(Arc::new(ProcessHost::python()), store);
//! registry.load("dice_roller").await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod host;
pub mod process;
pub mod registry;

pub use error::RegistryError;
pub use host::{HostError, HostRuntime};
pub use process::ProcessHost;
pub use registry::{module_path_for, ExtensionRecord, ExtensionRegistry, LoadState};
