//! Modsmith Validate - syntax gate for generated sources
//!
//! The mandatory, local validation step that precedes every persist and
//! load operation:
//! - Deterministic compile-without-execute parse via tree-sitter
//! - No network calls, no execution of candidate code
//! - Hard boundary: "validated" means "parses", not "works"
//!
//! # Example
//!
//! ```rust,ignore
//! use modsmith_validate::{Language, SyntaxValidator};
//!
//! let validator = SyntaxValidator::new(Language::Python);
//! let result = validator.validate("def ping():\n    return \"pong\"\n");
//! assert!(result.ok);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod language;
pub mod validator;

pub use language::Language;
pub use validator::{SyntaxValidator, ValidationResult};
