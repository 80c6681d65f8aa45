//! The offsets table: symbolic names mapped to offsets and sizes.
//!
//! The table file is a list of declarations such as
//! `constexpr uint64_t GameInstance = 0x160;`. Only the name and the value
//! matter; anything that does not look like a declaration is ignored.

use crate::literal::Literal;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\s+([A-Za-z0-9_]+)\s*=\s*(0[xX][0-9A-Fa-f]+|\d+)\s*;")
        .expect("table declaration pattern is valid")
});

/// Parsed offsets table. Later duplicates override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetTable {
    entries: HashMap<String, u64>,
}

impl OffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: u64) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values of `<prefix>0` .. `<prefix>{len-1}`, or `None` unless every
    /// one of them is present.
    pub fn indexed_family(&self, prefix: &str, len: usize) -> Option<Vec<u64>> {
        (0..len)
            .map(|index| self.get(&format!("{prefix}{index}")))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for OffsetTable {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

/// Parse the raw contents of an offsets table.
///
/// Blank lines, `//` comment lines, lines without a declaration and
/// literals that fail to parse are skipped without error.
pub fn parse_table(input: &str) -> OffsetTable {
    let mut table = OffsetTable::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        let Some(caps) = DECLARATION.captures(line) else {
            continue;
        };
        let Some(literal) = Literal::parse(&caps[2]) else {
            tracing::debug!(line, "skipping table entry with unparsable value");
            continue;
        };
        table.insert(&caps[1], literal.value);
    }

    table
}
