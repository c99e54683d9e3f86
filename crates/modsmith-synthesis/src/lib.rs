//! Modsmith Synthesis - request interpretation and code synthesis
//!
//! The boundary with the external code-synthesis service and the two
//! components built on it:
//! - [`SpecExtractor`]: free-text request → structured [`FeatureSpec`]
//! - [`CodeSynthesizer`]: spec or (source, instruction) → candidate source
//!
//! Replies are parsed permissively (fenced block preferred); what happens
//! without a fence is governed by [`CodeBlockPolicy`], an explicit design
//! decision rather than an accident of parsing.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod extract;
pub mod extractor;
pub mod service;
pub mod spec;
pub mod synthesizer;

pub use error::{ServiceError, SynthesisError};
pub use extract::{extract_code, CodeBlockPolicy};
pub use extractor::SpecExtractor;
pub use service::SynthesisService;
pub use spec::{normalize_name, CommandDescriptor, Complexity, FeatureSpec};
pub use synthesizer::CodeSynthesizer;
