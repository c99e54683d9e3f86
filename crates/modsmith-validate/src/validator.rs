//! Syntax validation gate
//!
//! Performs the mandatory compile-without-execute check on candidate
//! sources before they are ever persisted or loaded. Local, deterministic,
//! no execution of the candidate code.

use crate::language::Language;
use tree_sitter::{Node, Parser};

/// Outcome of a single validation pass
///
/// Transient: produced and consumed within one pipeline step, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the candidate source parses
    pub ok: bool,
    /// Parse error description when `ok` is false
    pub error_message: Option<String>,
}

impl ValidationResult {
    /// Successful validation
    #[inline]
    #[must_use]
    pub fn valid() -> Self {
        Self {
            ok: true,
            error_message: None,
        }
    }

    /// Failed validation with message
    #[inline]
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error_message: Some(message.into()),
        }
    }
}

/// Syntax-only validator for candidate sources
///
/// "Validated" means "parses against the grammar", nothing more. Runtime
/// failures, unresolved imports, logic errors, and name collisions with
/// already-loaded modules are out of scope for this gate.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxValidator {
    language: Language,
}

impl SyntaxValidator {
    /// Create validator for a language
    #[inline]
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Get validator language
    #[inline]
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Validate candidate source text
    ///
    /// Deterministic and side-effect free; cost is bounded by parser work
    /// on the input size.
    #[must_use]
    pub fn validate(&self, source: &str) -> ValidationResult {
        let result = self.parse_outcome(source);
        match &result.error_message {
            None => tracing::debug!(language = self.language.name(), "candidate parses"),
            Some(message) => {
                tracing::debug!(language = self.language.name(), %message, "candidate rejected");
            }
        }
        result
    }

    fn parse_outcome(&self, source: &str) -> ValidationResult {
        let mut parser = Parser::new();
        if parser.set_language(&self.language.grammar()).is_err() {
            // Grammar/runtime version skew; cannot happen with the pinned
            // grammar set, but must not pass unparsed source through.
            return ValidationResult::invalid(format!(
                "grammar for {} unavailable",
                self.language.name()
            ));
        }

        let Some(tree) = parser.parse(source, None) else {
            return ValidationResult::invalid("parser produced no tree");
        };

        let root = tree.root_node();
        if !root.has_error() {
            return ValidationResult::valid();
        }

        match first_error_node(root) {
            Some(node) => {
                let pos = node.start_position();
                let what = if node.is_missing() {
                    format!("missing {}", node.kind())
                } else {
                    "syntax error".to_string()
                };
                ValidationResult::invalid(format!(
                    "{} at line {}, column {}",
                    what,
                    pos.row + 1,
                    pos.column + 1
                ))
            }
            None => ValidationResult::invalid("syntax error"),
        }
    }
}

/// Locate the first ERROR or MISSING node in document order
fn first_error_node(root: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }

        // Descend only into subtrees that contain an error
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_python_passes() {
        let validator = SyntaxValidator::new(Language::Python);
        let result = validator.validate("def greet(name):\n    return f\"hi {name}\"\n");
        assert!(result.ok);
        assert!(result.error_message.is_none());
    }

    #[test]
    fn broken_python_fails_with_location() {
        let validator = SyntaxValidator::new(Language::Python);
        let result = validator.validate("def broken(:\n    pass\n");
        assert!(!result.ok);
        let msg = result.error_message.unwrap();
        assert!(msg.contains("line"), "message should locate error: {msg}");
    }

    #[test]
    fn valid_rust_passes() {
        let validator = SyntaxValidator::new(Language::Rust);
        let result = validator.validate("fn main() { println!(\"hello\"); }");
        assert!(result.ok);
    }

    #[test]
    fn unbalanced_rust_fails() {
        let validator = SyntaxValidator::new(Language::Rust);
        let result = validator.validate("fn main() { let x = ;");
        assert!(!result.ok);
    }

    #[test]
    fn empty_source_is_valid() {
        // An empty module parses; emptiness is rejected earlier, by the
        // synthesizer's empty-output check.
        let validator = SyntaxValidator::new(Language::Python);
        assert!(validator.validate("").ok);
    }

    #[test]
    fn validation_is_deterministic() {
        let validator = SyntaxValidator::new(Language::Python);
        let source = "class Thing:\n    def run(self:\n        pass\n";
        let first = validator.validate(source);
        let second = validator.validate(source);
        assert_eq!(first, second);
    }

    #[test]
    fn prose_is_not_valid_rust() {
        let validator = SyntaxValidator::new(Language::Rust);
        let result = validator.validate("Sure! Here is the code you asked for:");
        assert!(!result.ok);
    }
}
