//! `#[raw_struct(size = ..)]` inference from field offsets.
//!
//! The size of a struct is taken to be the furthest `offset + width` over
//! its offset-tagged fields. Run this after the field offsets have been
//! rewritten so it sees the current layout.

use super::fields::{OFFSET_ATTR, STRUCT_DECL};
use super::lines::{next_non_blank, split_lines, Line};
use crate::edit::{apply_edits, Edit, EditError};
use crate::literal::{self, Literal};
use once_cell::sync::Lazy;
use regex::Regex;

static SIZE_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#\[raw_struct\(size\s*=\s*(0[xX][0-9A-Fa-f]+|\d+)\)\]")
        .expect("size attribute pattern is valid")
});

static FIELD_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"pub\s+[A-Za-z0-9_]+\s*:\s*([^,]+)").expect("field type pattern is valid")
});

static ARRAY_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\s*([A-Za-z0-9_]+)\s*;\s*(\d+)\s*\]$").expect("array type pattern is valid")
});

/// Width assumed for types the table does not know.
pub const DEFAULT_WIDTH: u64 = 8;

const POINTER_WRAPPERS: &[&str] = &["Ptr64<", "EncryptedPtr64<"];

fn primitive_width(ty: &str) -> Option<u64> {
    let width = match ty {
        "u8" | "i8" | "bool" => 1,
        "u16" | "i16" => 2,
        "u32" | "i32" | "f32" => 4,
        "u64" | "i64" | "f64" | "usize" | "isize" => 8,
        "u128" | "i128" => 16,
        _ => return None,
    };
    Some(width)
}

/// Byte width of a field type as spelled in the source.
pub fn type_width(spelling: &str) -> u64 {
    let ty = spelling.trim();

    if POINTER_WRAPPERS.iter().any(|wrapper| ty.starts_with(wrapper)) {
        return 8;
    }

    if let Some(caps) = ARRAY_TYPE.captures(ty) {
        if let (Some(element), Ok(count)) = (primitive_width(&caps[1]), caps[2].parse::<u64>()) {
            return element.saturating_mul(count);
        }
    }

    primitive_width(ty).unwrap_or(DEFAULT_WIDTH)
}

/// Index of the first body line of the struct declared at `header`.
///
/// `None` when the struct has no multi-line body: `struct A;`, `struct A(u32);`
/// or a body opened and closed on the same line.
fn body_start(lines: &[Line<'_>], header: usize) -> Option<usize> {
    for (index, line) in lines.iter().enumerate().skip(header) {
        let text = line.text.trim_end();
        if let Some(open) = text.find('{') {
            if text[open..].contains('}') {
                return None;
            }
            return Some(index + 1);
        }
        if text.ends_with(';') {
            return None;
        }
    }
    None
}

/// Furthest `offset + width` among the tagged fields in the body of the
/// struct declared at `header`. Zero if the body has no tagged fields.
fn struct_extent(lines: &[Line<'_>], header: usize) -> u64 {
    let Some(start) = body_start(lines, header) else {
        return 0;
    };
    let mut max_end = 0;

    for index in start..lines.len() {
        let text = lines[index].text;
        if text.trim_start().starts_with('}') {
            break;
        }

        let Some(offset) = OFFSET_ATTR
            .captures(text)
            .and_then(|c| Literal::parse(&c[1]))
        else {
            continue;
        };
        let Some(decl) = next_non_blank(lines, index) else {
            continue;
        };
        let Some(ty) = FIELD_TYPE.captures(lines[decl].text.trim()) else {
            continue;
        };

        let end = offset.value.saturating_add(type_width(&ty[1]));
        max_end = max_end.max(end);
    }

    max_end
}

/// Plan size-attribute rewrites for every struct whose inferred size differs.
pub fn plan_struct_sizes(text: &str) -> Vec<Edit> {
    let lines = split_lines(text);
    let mut edits = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let Some(literal_match) = SIZE_ATTR.captures(line.text).and_then(|c| c.get(1)) else {
            continue;
        };
        let Some(header) = next_non_blank(&lines, index) else {
            continue;
        };
        let Some(name) = STRUCT_DECL
            .captures(lines[header].text)
            .and_then(|c| c.get(1))
        else {
            continue;
        };

        let inferred = struct_extent(&lines, header);
        if inferred == 0 {
            continue;
        }

        let old = literal_match.as_str();
        if let Some(new_text) = literal::replacement(old, inferred) {
            tracing::debug!(name = name.as_str(), old, new = %new_text, "struct size");
            let start = line.start + literal_match.start();
            edits.push(Edit::new(start, start + old.len(), new_text, old));
        }
    }

    edits
}

/// Rewrite every `raw_struct` size attribute whose inferred size differs.
pub fn rewrite_struct_sizes(text: &str) -> Result<String, EditError> {
    apply_edits(text, plan_struct_sizes(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_widths() {
        assert_eq!(type_width("u8"), 1);
        assert_eq!(type_width("u32"), 4);
        assert_eq!(type_width(" f32 "), 4);
        assert_eq!(type_width("[f32; 3]"), 12);
        assert_eq!(type_width("[u8;16]"), 16);
        assert_eq!(type_width("Ptr64<()>"), 8);
        assert_eq!(type_width("EncryptedPtr64<dyn TArray<Ptr64<dyn AActor>>>"), 8);
    }

    #[test]
    fn test_unknown_type_falls_back_to_default() {
        assert_eq!(type_width("FVector"), DEFAULT_WIDTH);
        assert_eq!(type_width("[FVector; 4]"), DEFAULT_WIDTH);
    }

    fn camera(size: &str) -> String {
        format!(
            "#[raw_struct(size = {size})]
pub struct Camera {{
    #[field(offset = 0x0)]
    pub flags: u32,

    #[field(offset = 0x10)]
    pub position: [f32; 3],
}}
"
        )
    }

    #[test]
    fn test_inferred_size_rewrites_attribute() {
        let out = rewrite_struct_sizes(&camera("0x0040")).unwrap();
        assert_eq!(out, camera("0x001C"));
    }

    #[test]
    fn test_matching_size_is_left_alone() {
        assert!(plan_struct_sizes(&camera("0x1C")).is_empty());
    }

    #[test]
    fn test_unknown_type_contributes_default_width() {
        let src = "#[raw_struct(size = 0x4)]
pub struct Holder {
    #[field(offset = 0x20)]
    pub value: FTransform,
}
";
        let out = rewrite_struct_sizes(src).unwrap();
        assert!(out.starts_with("#[raw_struct(size = 0x28)]"));
    }

    #[test]
    fn test_struct_without_tagged_fields_is_untouched() {
        let src = "#[raw_struct(size = 0x10)]\npub struct Empty {\n    pub marker: u8,\n}\n";
        assert_eq!(rewrite_struct_sizes(src).unwrap(), src);
    }

    #[test]
    fn test_attribute_not_followed_by_struct_is_untouched() {
        let src = "#[raw_struct(size = 0x10)]\nimpl Foo {}\n";
        assert_eq!(rewrite_struct_sizes(src).unwrap(), src);
    }

    #[test]
    fn test_body_ends_at_closing_brace() {
        let src = "#[raw_struct(size = 0x8)]
pub struct First {
    #[field(offset = 0x0)]
    pub a: u32,
}

pub struct Second {
    #[field(offset = 0x100)]
    pub b: u32,
}
";
        let out = rewrite_struct_sizes(src).unwrap();
        assert!(out.starts_with("#[raw_struct(size = 0x4)]"));
    }

    #[test]
    fn test_generic_struct_with_where_clause() {
        let src = "#[raw_struct(size = 0x10)]
pub struct TArray<T>
where
    T: Send + Sync + 'static,
{
    #[field(offset = 0x0)]
    pub data: Ptr64<[T]>,

    #[field(offset = 0x8)]
    pub count: u32,

    #[field(offset = 0xC)]
    pub max: u32,
}
";
        assert!(plan_struct_sizes(src).is_empty());
    }

    #[test]
    fn test_decimal_size_stays_decimal() {
        let src = "#[raw_struct(size = 4)]\npub struct D {\n    #[field(offset = 8)]\n    pub x: u64,\n}\n";
        let out = rewrite_struct_sizes(src).unwrap();
        assert!(out.starts_with("#[raw_struct(size = 16)]"));
    }

    #[test]
    fn test_single_line_body_does_not_borrow_next_struct() {
        let src = "#[raw_struct(size = 0x8)]
pub struct Empty {}

#[raw_struct(size = 0x24)]
pub struct Next {
    #[field(offset = 0x20)]
    pub x: u32,
}
";
        assert_eq!(rewrite_struct_sizes(src).unwrap(), src);
    }

    #[test]
    fn test_unit_and_tuple_structs_are_untouched() {
        let src = "#[raw_struct(size = 0x8)]
pub struct Unit;

#[raw_struct(size = 0x4)]
pub struct Wrapper(u32);

pub struct Next {
    #[field(offset = 0x20)]
    pub x: u32,
}
";
        assert_eq!(rewrite_struct_sizes(src).unwrap(), src);
    }

    #[test]
    fn test_brace_on_its_own_line() {
        let src = "#[raw_struct(size = 0x8)]
pub struct Spaced
{
    #[field(offset = 0x10)]
    pub x: u64,
}
";
        let out = rewrite_struct_sizes(src).unwrap();
        assert!(out.starts_with("#[raw_struct(size = 0x18)]"));
    }
}
