//! Feature name sanitization
//!
//! Every feature name is reduced to a safe filename component before it
//! touches the filesystem. Lowercase alphanumerics and underscores only;
//! anything else is mapped to an underscore or dropped, so a hostile name
//! like `../../etc/passwd` can never escape the sandbox root.

use crate::error::StoreError;

/// Sanitize a feature name into a safe filename stem
///
/// - ASCII letters are lowercased, digits kept
/// - Whitespace, `-`, `.`, and `/` become `_`
/// - Everything else is dropped
/// - Runs of `_` collapse; leading/trailing `_` are trimmed
///
/// # Errors
/// Returns `StoreError::InvalidName` when nothing usable remains.
pub fn sanitize_feature_name(raw: &str) -> Result<String, StoreError> {
    let mut out = String::with_capacity(raw.len());
    let mut last_underscore = true; // suppress a leading underscore

    for c in raw.chars() {
        let mapped = match c {
            'a'..='z' | '0'..='9' => Some(c),
            'A'..='Z' => Some(c.to_ascii_lowercase()),
            '_' | '-' | '.' | '/' | '\\' => None,
            c if c.is_whitespace() => None,
            _ => continue,
        };

        match mapped {
            Some(c) => {
                out.push(c);
                last_underscore = false;
            }
            None => {
                if !last_underscore {
                    out.push('_');
                    last_underscore = true;
                }
            }
        }
    }

    while out.ends_with('_') {
        out.pop();
    }

    if out.is_empty() {
        return Err(StoreError::InvalidName(raw.to_string()));
    }
    Ok(out)
}
