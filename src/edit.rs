use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

/// The fundamental edit primitive: byte-span replacement with verification.
///
/// Every rewriter compiles down to a list of these over the text it was
/// given. Intelligence lives in span acquisition, not application.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Edit does nothing until it is applied"]
pub struct Edit {
    /// Starting byte offset (inclusive)
    pub byte_start: usize,
    /// Ending byte offset (exclusive)
    pub byte_end: usize,
    /// New text to insert at [byte_start, byte_end)
    pub new_text: String,
    /// Verification of what we expect to find before applying
    pub expected_before: EditVerification,
}

/// Verification strategy for edit safety.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditVerification {
    /// Exact text match required
    ExactMatch(String),
    /// xxh3 hash of expected text (cheaper for large spans such as array blocks)
    Hash(u64),
}

impl EditVerification {
    /// Check if the provided text matches the verification criteria.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            EditVerification::ExactMatch(expected) => text == expected,
            EditVerification::Hash(expected_hash) => xxh3_64(text.as_bytes()) == *expected_hash,
        }
    }

    /// Create verification from text, using hash for text over 1KB.
    pub fn from_text(text: &str) -> Self {
        if text.len() > 1024 {
            EditVerification::Hash(xxh3_64(text.as_bytes()))
        } else {
            EditVerification::ExactMatch(text.to_string())
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditError {
    #[error("Before-text verification failed at byte {byte_start}: found {found:?}")]
    BeforeTextMismatch {
        byte_start: usize,
        byte_end: usize,
        found: String,
    },

    #[error("Invalid byte range: [{byte_start}, {byte_end}) in text of length {text_len}")]
    InvalidByteRange {
        byte_start: usize,
        byte_end: usize,
        text_len: usize,
    },

    #[error("Overlapping edits at bytes {first_end} > {second_start}")]
    Overlap {
        first_end: usize,
        second_start: usize,
    },
}

impl Edit {
    /// Create a new edit with automatic verification generation.
    pub fn new(
        byte_start: usize,
        byte_end: usize,
        new_text: impl Into<String>,
        expected_before: &str,
    ) -> Self {
        Self {
            byte_start,
            byte_end,
            new_text: new_text.into(),
            expected_before: EditVerification::from_text(expected_before),
        }
    }

    /// Validate the edit against `text` and return the span it replaces.
    fn validate<'a>(&self, text: &'a str) -> Result<&'a str, EditError> {
        let span = text
            .get(self.byte_start..self.byte_end)
            .ok_or(EditError::InvalidByteRange {
                byte_start: self.byte_start,
                byte_end: self.byte_end,
                text_len: text.len(),
            })?;

        if !self.expected_before.matches(span) {
            return Err(EditError::BeforeTextMismatch {
                byte_start: self.byte_start,
                byte_end: self.byte_end,
                found: span.to_string(),
            });
        }

        Ok(span)
    }
}

/// Apply edits to `text` in a single pass.
///
/// All edits are validated against the original text before anything is
/// spliced, so either every edit lands or none does. Edits whose current
/// span already equals their new text are skipped.
pub fn apply_edits(text: &str, mut edits: Vec<Edit>) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(text.to_string());
    }

    edits.sort_by_key(|edit| edit.byte_start);

    for edit in &edits {
        edit.validate(text)?;
    }

    for window in edits.windows(2) {
        let (first, second) = (&window[0], &window[1]);
        if first.byte_end > second.byte_start {
            return Err(EditError::Overlap {
                first_end: first.byte_end,
                second_start: second.byte_start,
            });
        }
    }

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in &edits {
        output.push_str(&text[cursor..edit.byte_start]);
        output.push_str(&edit.new_text);
        cursor = edit.byte_end;
    }
    output.push_str(&text[cursor..]);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_verification_exact_match() {
        let verify = EditVerification::ExactMatch("0x10".to_string());
        assert!(verify.matches("0x10"));
        assert!(!verify.matches("0x1"));
    }

    #[test]
    fn test_edit_verification_from_text_large() {
        let text = "0xDEADBEEF, ".repeat(200);
        let verify = EditVerification::from_text(&text);
        assert!(matches!(verify, EditVerification::Hash(_)));
        assert!(verify.matches(&text));
        assert!(!verify.matches("0x0"));
    }

    #[test]
    fn test_apply_single_edit() {
        let text = "const A: u64 = 0x10; // A";
        let edit = Edit::new(15, 19, "0x20", "0x10");
        assert_eq!(
            apply_edits(text, vec![edit]).unwrap(),
            "const A: u64 = 0x20; // A"
        );
    }

    #[test]
    fn test_apply_unsorted_edits() {
        let text = "a=1 b=2 c=3";
        let edits = vec![
            Edit::new(10, 11, "30", "3"),
            Edit::new(2, 3, "10", "1"),
            Edit::new(6, 7, "20", "2"),
        ];
        assert_eq!(apply_edits(text, edits).unwrap(), "a=10 b=20 c=30");
    }

    #[test]
    fn test_no_edits_returns_text_unchanged() {
        assert_eq!(apply_edits("unchanged", Vec::new()).unwrap(), "unchanged");
    }

    #[test]
    fn test_mismatch_rejects_all_edits() {
        let text = "a=1 b=2";
        let edits = vec![Edit::new(2, 3, "10", "1"), Edit::new(6, 7, "20", "9")];
        assert!(matches!(
            apply_edits(text, edits),
            Err(EditError::BeforeTextMismatch { byte_start: 6, .. })
        ));
    }

    #[test]
    fn test_invalid_range() {
        let edit = Edit::new(5, 50, "x", "");
        assert!(matches!(
            apply_edits("short", vec![edit]),
            Err(EditError::InvalidByteRange { .. })
        ));
    }

    #[test]
    fn test_overlap_is_rejected() {
        let text = "abcdef";
        let edits = vec![Edit::new(0, 4, "x", "abcd"), Edit::new(2, 5, "y", "cde")];
        assert!(matches!(
            apply_edits(text, edits),
            Err(EditError::Overlap { .. })
        ));
    }
}
