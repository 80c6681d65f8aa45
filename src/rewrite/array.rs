//! Fixed-size constant arrays fed from a family of indexed table keys.
//!
//! With `HealthXorKeys0` .. `HealthXorKeys15` in the table,
//!
//! ```text
//!     const HEALTH_XOR_KEYS: [u32; 16] = [
//!         0xCEC7A59A, 0x9B63B2F1, ...
//!     ];
//! ```
//!
//! has its element list regenerated as two rows of eight.

use crate::edit::{apply_edits, Edit, EditError};
use crate::literal::format_hex;
use crate::table::OffsetTable;
use regex::Regex;

/// Describes one keyed array declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraySpec {
    /// Constant name, e.g. `HEALTH_XOR_KEYS`
    pub name: String,
    /// Element type spelling, e.g. `u32`
    pub element_type: String,
    /// Table key prefix; element `i` comes from `<prefix>{i}`
    pub key_prefix: String,
    pub len: usize,
    /// Literals per output row
    pub per_line: usize,
}

impl ArraySpec {
    /// The health XOR key table in `player.rs`.
    pub fn health_xor_keys() -> Self {
        Self {
            name: "HEALTH_XOR_KEYS".to_string(),
            element_type: "u32".to_string(),
            key_prefix: "HealthXorKeys".to_string(),
            len: 16,
            per_line: 8,
        }
    }

    fn pattern(&self) -> Result<Regex, regex::Error> {
        let source = format!(
            r"(?m)^(?P<indent>[\t ]*)const\s+{name}\s*:\s*\[\s*{ty}\s*;\s*{len}\s*\]\s*=\s*\[(?P<body>[\s\S]*?)\];",
            name = regex::escape(&self.name),
            ty = regex::escape(&self.element_type),
            len = self.len,
        );
        Regex::new(&source)
    }

    /// Rows end in `newline`, the terminator the declaration already uses.
    fn render_body(&self, values: &[u64], indent: &str, newline: &str) -> String {
        let mut body = String::from(newline);
        for row in values.chunks(self.per_line.max(1)) {
            let literals: Vec<String> = row.iter().map(|&v| format_hex(v, 0)).collect();
            body.push_str(indent);
            body.push_str(&literals.join(", "));
            body.push(',');
            body.push_str(newline);
        }
        body
    }
}

/// Plan the element-list replacement for the first declaration matching `spec`.
///
/// Nothing is planned unless every indexed key is present in `table`.
pub fn plan_keyed_array(text: &str, table: &OffsetTable, spec: &ArraySpec) -> Vec<Edit> {
    let Some(values) = table.indexed_family(&spec.key_prefix, spec.len) else {
        tracing::debug!(
            prefix = %spec.key_prefix,
            len = spec.len,
            "incomplete key family, leaving {} alone",
            spec.name
        );
        return Vec::new();
    };

    let pattern = match spec.pattern() {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::warn!(array = %spec.name, "invalid array pattern: {e}");
            return Vec::new();
        }
    };
    let Some(caps) = pattern.captures(text) else {
        return Vec::new();
    };
    let (Some(indent), Some(body)) = (caps.name("indent"), caps.name("body")) else {
        return Vec::new();
    };

    let newline = if body.as_str().contains("\r\n") { "\r\n" } else { "\n" };
    let new_body = spec.render_body(&values, indent.as_str(), newline);
    if new_body == body.as_str() {
        return Vec::new();
    }

    tracing::debug!(array = %spec.name, "regenerated element list");
    vec![Edit::new(body.start(), body.end(), new_body, body.as_str())]
}

/// Rewrite the first declaration matching `spec` from `table`.
pub fn rewrite_keyed_array(
    text: &str,
    table: &OffsetTable,
    spec: &ArraySpec,
) -> Result<String, EditError> {
    apply_edits(text, plan_keyed_array(text, table, spec))
}
