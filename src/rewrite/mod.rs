//! Text rewriters that bring source literals in line with an offsets table.
//!
//! Each rewriter locates spans with regular expressions, plans [`Edit`]s
//! over the text it was handed, and applies them in one pass. None of them
//! keeps state between calls.
//!
//! [`Edit`]: crate::edit::Edit

pub mod array;
pub mod consts;
pub mod fields;
pub mod lines;
pub mod sizes;

pub use array::{plan_keyed_array, rewrite_keyed_array, ArraySpec};
pub use consts::{plan_tagged_consts, rewrite_tagged_consts};
pub use fields::{field_key, plan_field_offsets, rewrite_field_offsets, FIELD_MAP};
pub use sizes::{plan_struct_sizes, rewrite_struct_sizes, type_width, DEFAULT_WIDTH};

use crate::edit::EditError;
use crate::table::OffsetTable;
use std::fmt;

/// One rewrite step applied to a target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pass {
    /// `const NAME: u64 = 0x..; // Key`
    TaggedConsts,
    /// Regenerate an array from an indexed key family
    KeyedArray(ArraySpec),
    /// `#[field(offset = ..)]` via [`FIELD_MAP`]
    FieldOffsets,
    /// `#[raw_struct(size = ..)]` from the field layout
    StructSizes,
}

impl Pass {
    pub fn apply(&self, text: &str, table: &OffsetTable) -> Result<String, EditError> {
        match self {
            Pass::TaggedConsts => rewrite_tagged_consts(text, table),
            Pass::KeyedArray(spec) => rewrite_keyed_array(text, table, spec),
            Pass::FieldOffsets => rewrite_field_offsets(text, table),
            Pass::StructSizes => rewrite_struct_sizes(text),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::TaggedConsts => write!(f, "tagged constants"),
            Pass::KeyedArray(spec) => write!(f, "keyed array {}", spec.name),
            Pass::FieldOffsets => write!(f, "field offsets"),
            Pass::StructSizes => write!(f, "struct sizes"),
        }
    }
}

/// Run `passes` over `text` in order, feeding each the previous output.
pub fn apply_passes(text: &str, passes: &[Pass], table: &OffsetTable) -> Result<String, EditError> {
    let mut current = text.to_string();
    for pass in passes {
        current = pass.apply(&current, table)?;
    }
    Ok(current)
}
