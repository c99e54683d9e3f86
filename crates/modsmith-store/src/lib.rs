//! Modsmith Store - sandboxed artifact persistence
//!
//! Persists validated extension sources under a single sandbox directory:
//! - One file per feature, named deterministically from the feature name
//! - Name sanitization prevents any path escape out of the sandbox root
//! - Listing is a directory scan; existence is file existence
//!
//! # Example
//!
//! ```rust,ignore
//! use modsmith_store::ArtifactStore;
//! use modsmith_validate::Language;
//!
//! let store = ArtifactStore::new("cogs/generated", Language::Python)?;
//! let path = store.save("dice_roller", "def roll(): ...")?;
//! # Ok::<(), modsmith_store::StoreError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod sanitize;
pub mod store;

pub use error::StoreError;
pub use sanitize::sanitize_feature_name;
pub use store::{ArtifactStore, GeneratedArtifact};
