//! Inline text format decoding.
//!
//! The CMS stores the active inline styles of a text run as an integer
//! bitmask. Decoding is a plain bitwise AND, so unexpected bits are
//! simply inert rather than an error.

use serde_json::Value as JsonValue;

/// Decoded inline-style bitmask for a text run.
///
/// Absent, non-integer or negative CMS values decode to the empty mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextFormat(u32);

impl TextFormat {
	/// Bold text (`<strong>`)
	pub const BOLD: u32 = 1;
	/// Italic text (`<em>`)
	pub const ITALIC: u32 = 1 << 1;
	/// Struck-through text (`<s>`)
	pub const STRIKETHROUGH: u32 = 1 << 2;
	/// Underlined text (`<u>`)
	pub const UNDERLINE: u32 = 1 << 3;
	/// Inline code (`<code>`)
	pub const CODE: u32 = 1 << 4;
	/// Subscript (`<sub>`)
	pub const SUBSCRIPT: u32 = 1 << 5;
	/// Superscript (`<sup>`)
	pub const SUPERSCRIPT: u32 = 1 << 6;

	/// Wraps a raw bitmask.
	pub const fn new(bits: u32) -> Self {
		Self(bits)
	}

	/// Returns the raw bitmask.
	pub const fn bits(self) -> u32 {
		self.0
	}

	/// Checks whether a named flag is active.
	pub const fn contains(self, flag: u32) -> bool {
		self.0 & flag != 0
	}

	/// Decodes the `format` field of a CMS text node.
	///
	/// `as_u64` rejects negatives and floats, which collapses every
	/// malformed value to the empty mask.
	pub fn from_json(value: Option<&JsonValue>) -> Self {
		let bits = value
			.and_then(JsonValue::as_u64)
			.map(|v| v as u32)
			.unwrap_or(0);
		Self(bits)
	}

	/// Wraps already-rendered text in the elements for each active flag.
	///
	/// The nesting order is fixed, outermost first:
	/// bold, italic, strikethrough, underline, code, subscript, superscript.
	/// Callers (and their snapshots) rely on this exact order.
	pub fn apply(self, text: &str) -> String {
		let mut out = text.to_string();
		if self.contains(Self::SUPERSCRIPT) {
			out = format!("<sup>{out}</sup>");
		}
		if self.contains(Self::SUBSCRIPT) {
			out = format!("<sub>{out}</sub>");
		}
		if self.contains(Self::CODE) {
			out = format!("<code>{out}</code>");
		}
		if self.contains(Self::UNDERLINE) {
			out = format!("<u>{out}</u>");
		}
		if self.contains(Self::STRIKETHROUGH) {
			out = format!("<s>{out}</s>");
		}
		if self.contains(Self::ITALIC) {
			out = format!("<em>{out}</em>");
		}
		if self.contains(Self::BOLD) {
			out = format!("<strong>{out}</strong>");
		}
		out
	}
}
