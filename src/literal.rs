//! Integer literals as they appear in offsets tables and Rust sources.
//!
//! A literal remembers how it was spelled (radix and, for hex, the number
//! of digits) so a new value can be written back in the same shape.

/// How a literal was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    /// `0x` prefixed, with the original digit count.
    Hex { width: usize },
    Decimal,
}

/// A parsed integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub value: u64,
    pub radix: Radix,
}

impl Literal {
    /// Parse `0x1F`, `0X1f` or `31`. Returns `None` for anything else,
    /// including values that overflow `u64`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            if digits.is_empty() {
                return None;
            }
            let value = u64::from_str_radix(digits, 16).ok()?;
            return Some(Self {
                value,
                radix: Radix::Hex {
                    width: digits.len(),
                },
            });
        }

        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = text.parse::<u64>().ok()?;
        Some(Self {
            value,
            radix: Radix::Decimal,
        })
    }

    /// Render `value` in this literal's radix and width.
    pub fn render(&self, value: u64) -> String {
        match self.radix {
            Radix::Hex { width } => format_hex(value, width),
            Radix::Decimal => value.to_string(),
        }
    }
}

/// Uppercase hex with a `0x` prefix, zero-padded to at least `width` digits.
pub fn format_hex(value: u64, width: usize) -> String {
    format!("0x{value:0width$X}")
}

/// Text to substitute for `old` so it reads `new_value`.
///
/// `None` means leave `old` alone: it either already holds `new_value` or
/// is not a literal we understand.
pub fn replacement(old: &str, new_value: u64) -> Option<String> {
    let literal = Literal::parse(old)?;
    if literal.value == new_value {
        return None;
    }
    Some(literal.render(new_value))
}
