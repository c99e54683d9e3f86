//! Payload extraction from synthesis replies
//!
//! Service replies ideally carry their payload inside a fenced block.
//! What happens when the fence is absent is an explicit policy decision,
//! not an accident: [`CodeBlockPolicy::Lenient`] falls back to the raw
//! reply verbatim (a reply mixing prose and unfenced code will then only
//! fail later, at validation or load time), while
//! [`CodeBlockPolicy::Strict`] treats the missing fence as a hard error.

use crate::error::SynthesisError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    // Language tag is optional; the payload is group 1.
    Regex::new(r"(?s)```[a-zA-Z0-9_+-]*\s*\n?(.*?)```").expect("fence pattern compiles")
});

/// How to treat replies without a fenced code block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeBlockPolicy {
    /// Use the raw reply verbatim when no fence is found (best effort)
    #[default]
    Lenient,
    /// Missing fence is a hard error
    Strict,
}

/// Extract a code payload from a service reply
///
/// Prefers the first fenced block; behavior without one follows `policy`.
/// Empty or whitespace-only payloads are always rejected.
///
/// # Errors
/// - `SynthesisError::MissingCodeBlock` (strict policy, no fence)
/// - `SynthesisError::EmptyOutput`
pub fn extract_code(reply: &str, policy: CodeBlockPolicy) -> Result<String, SynthesisError> {
    let payload = match FENCED_BLOCK.captures(reply) {
        Some(caps) => caps[1].trim().to_string(),
        None => match policy {
            CodeBlockPolicy::Lenient => reply.trim().to_string(),
            CodeBlockPolicy::Strict => return Err(SynthesisError::MissingCodeBlock),
        },
    };

    if payload.is_empty() {
        return Err(SynthesisError::EmptyOutput);
    }
    Ok(payload)
}

/// Extract a structured (JSON) payload from a service reply
///
/// Accepts a fenced block if present, otherwise the whole reply is handed
/// to the parser. Always permissive: the structured format itself is the
/// gate, not the fencing.
#[must_use]
pub fn extract_structured(reply: &str) -> String {
    match FENCED_BLOCK.captures(reply) {
        Some(caps) => caps[1].trim().to_string(),
        None => reply.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_block_extracted() {
        let reply = "Here you go:\n```python\ndef roll():\n    return 4\n```\nEnjoy!";
        let code = extract_code(reply, CodeBlockPolicy::Lenient).unwrap();
        assert_eq!(code, "def roll():\n    return 4");
    }

    #[test]
    fn fence_without_language_tag() {
        let reply = "```\nx = 1\n```";
        assert_eq!(extract_code(reply, CodeBlockPolicy::Strict).unwrap(), "x = 1");
    }

    #[test]
    fn first_of_multiple_fences_wins() {
        let reply = "```python\nfirst\n```\ntext\n```python\nsecond\n```";
        assert_eq!(extract_code(reply, CodeBlockPolicy::Lenient).unwrap(), "first");
    }

    #[test]
    fn lenient_falls_back_to_raw_reply() {
        let reply = "def roll():\n    return 4";
        assert_eq!(extract_code(reply, CodeBlockPolicy::Lenient).unwrap(), reply);
    }

    #[test]
    fn strict_rejects_missing_fence() {
        let reply = "def roll():\n    return 4";
        assert!(matches!(
            extract_code(reply, CodeBlockPolicy::Strict),
            Err(SynthesisError::MissingCodeBlock)
        ));
    }

    #[test]
    fn empty_payload_rejected_under_both_policies() {
        assert!(matches!(
            extract_code("   \n  ", CodeBlockPolicy::Lenient),
            Err(SynthesisError::EmptyOutput)
        ));
        assert!(matches!(
            extract_code("```python\n\n```", CodeBlockPolicy::Lenient),
            Err(SynthesisError::EmptyOutput)
        ));
    }

    #[test]
    fn structured_prefers_fence() {
        let reply = "Result:\n```json\n{\"ok\": true}\n```";
        assert_eq!(extract_structured(reply), "{\"ok\": true}");
    }

    #[test]
    fn structured_falls_back_to_whole_reply() {
        assert_eq!(extract_structured("  {\"ok\": true} "), "{\"ok\": true}");
    }
}
