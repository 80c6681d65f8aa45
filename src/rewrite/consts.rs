//! Constants tagged with a trailing `// Key` comment.
//!
//! ```text
//! pub const DECRYPT_OFFSET: u64 = 0x0F2F5F28; // XenuineDecrypt
//! ```
//!
//! The literal is replaced with the table value for `XenuineDecrypt`;
//! everything else on the line is left byte-identical.

use crate::edit::{apply_edits, Edit, EditError};
use crate::literal;
use crate::table::OffsetTable;
use once_cell::sync::Lazy;
use regex::Regex;

static TAGGED_CONST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:pub(?:\([^)\n]*\))?\s+)?const\s+[A-Z0-9_]+\s*:\s*u(?:32|64)\s*=\s*(?P<value>0[xX][0-9A-Fa-f]+|\d+)[ \t]*;[ \t]*//[ \t]*(?P<key>[A-Za-z0-9_]+)",
    )
    .expect("tagged const pattern is valid")
});

/// Plan literal replacements for every tagged constant whose key is in `table`.
pub fn plan_tagged_consts(text: &str, table: &OffsetTable) -> Vec<Edit> {
    let mut edits = Vec::new();

    for caps in TAGGED_CONST.captures_iter(text) {
        let key = &caps["key"];
        let Some(value) = table.get(key) else {
            continue;
        };
        let Some(old) = caps.name("value") else {
            continue;
        };
        if let Some(new_text) = literal::replacement(old.as_str(), value) {
            tracing::debug!(key, old = old.as_str(), new = %new_text, "constant");
            edits.push(Edit::new(old.start(), old.end(), new_text, old.as_str()));
        }
    }

    edits
}

/// Rewrite every tagged constant in `text` from `table`.
pub fn rewrite_tagged_consts(text: &str, table: &OffsetTable) -> Result<String, EditError> {
    apply_edits(text, plan_tagged_consts(text, table))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> OffsetTable {
        entries.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_rewrites_hex_preserving_width() {
        let src = "pub const DECRYPT_OFFSET: u64 = 0x0F2F5F28; // XenuineDecrypt\n";
        let out = rewrite_tagged_consts(src, &table(&[("XenuineDecrypt", 0x1234)])).unwrap();
        assert_eq!(out, "pub const DECRYPT_OFFSET: u64 = 0x00001234; // XenuineDecrypt\n");
    }

    #[test]
    fn test_rewrites_private_u32_const() {
        let src = "    const HEALTH4: u32 = 0x0980; // Health4\n";
        let out = rewrite_tagged_consts(src, &table(&[("Health4", 0xA10)])).unwrap();
        assert_eq!(out, "    const HEALTH4: u32 = 0x0A10; // Health4\n");
    }

    #[test]
    fn test_decimal_literal_stays_decimal() {
        let src = "const COUNT: u32 = 12; // Count";
        let out = rewrite_tagged_consts(src, &table(&[("Count", 40)])).unwrap();
        assert_eq!(out, "const COUNT: u32 = 40; // Count");
    }

    #[test]
    fn test_absent_key_is_untouched() {
        let src = "pub const A: u64 = 0x10; // Known\npub const B: u64 = 0x20; // Unknown\n";
        let out = rewrite_tagged_consts(src, &table(&[("Known", 0x11)])).unwrap();
        assert_eq!(out, "pub const A: u64 = 0x11; // Known\npub const B: u64 = 0x20; // Unknown\n");
    }

    #[test]
    fn test_every_occurrence_is_considered() {
        let src = "const A: u64 = 0x1; // K\nconst B: u64 = 0x2; // K\n";
        let out = rewrite_tagged_consts(src, &table(&[("K", 0x7)])).unwrap();
        assert_eq!(out, "const A: u64 = 0x7; // K\nconst B: u64 = 0x7; // K\n");
    }

    #[test]
    fn test_ignores_other_types_and_untagged_consts() {
        let src = "pub const ENTRY_OFFSET: u64 = 0x10203478;\nconst X: usize = 0x1; // K\nconst Y: u64 = 0x1;\n// K\n";
        let out = rewrite_tagged_consts(src, &table(&[("K", 0x9)])).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_scoped_visibility() {
        let src = "pub(crate) const GNAMES: u64 = 0x100; // GNames";
        let out = rewrite_tagged_consts(src, &table(&[("GNames", 0x200)])).unwrap();
        assert_eq!(out, "pub(crate) const GNAMES: u64 = 0x200; // GNames");
    }

    #[test]
    fn test_matching_value_plans_nothing() {
        let src = "pub const A: u64 = 0x0010; // A";
        assert!(plan_tagged_consts(src, &table(&[("A", 0x10)])).is_empty());
    }
}
