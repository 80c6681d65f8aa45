//! Re-parse guard for rewritten Rust sources.
//!
//! Rewrites only swap integer literals, so a file that parsed before a
//! sync must still parse after it. Files that did not parse to begin with
//! (fixtures, partial sources) are not held to that rule.

use std::path::Path;
use thiserror::Error;

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("syn validation failed: {message}")]
    SynValidationFailed { message: String },
}

fn parses_as_file(code: &str) -> Result<(), ValidationError> {
    syn::parse_file(code)
        .map(|_| ())
        .map_err(|e| ValidationError::SynValidationFailed {
            message: e.to_string(),
        })
}

/// Check that rewriting `original` into `edited` did not break `path`.
///
/// Only `.rs` files whose original text parses are checked.
pub fn validate_rewrite(path: &Path, original: &str, edited: &str) -> Result<(), ValidationError> {
    let is_rust = path.extension().and_then(|e| e.to_str()) == Some("rs");
    if !is_rust || parses_as_file(original).is_err() {
        return Ok(());
    }
    parses_as_file(edited)
}
