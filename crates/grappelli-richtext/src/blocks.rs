//! Embedded block dispatch.
//!
//! `block` nodes carry an opaque `fields` payload whose `blockType`
//! selects a sub-renderer. The set is closed; an unknown `blockType` (or
//! a missing one) renders to nothing rather than failing the page.

use serde_json::Value as JsonValue;

use crate::gallery::{self, GalleryImage};
use crate::node::Document;
use crate::render::escape_html;

/// The closed set of embedded block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
	Media,
	Gallery,
	Code,
	Quote,
	Columns,
	Unknown,
}

impl BlockKind {
	fn parse(block_type: &str) -> Self {
		match block_type {
			"mediaBlock" => Self::Media,
			"gallery" => Self::Gallery,
			"code" => Self::Code,
			"quote" => Self::Quote,
			"columns" => Self::Columns,
			_ => Self::Unknown,
		}
	}
}

/// Renders a block node's `fields` payload to an HTML fragment.
pub fn render_block(fields: &JsonValue) -> String {
	let Some(block_type) = fields.get("blockType").and_then(JsonValue::as_str) else {
		return String::new();
	};
	match BlockKind::parse(block_type) {
		BlockKind::Media => render_media(fields.get("media"), fields.get("caption")),
		BlockKind::Gallery => gallery::render_placeholder(fields),
		BlockKind::Code => render_code(fields),
		BlockKind::Quote => render_quote(fields),
		BlockKind::Columns => render_columns(fields),
		BlockKind::Unknown => String::new(),
	}
}

/// Renders a single image as a `<figure>`, optionally captioned.
///
/// Also used by the legacy zone renderer for its media components.
pub(crate) fn render_media(media: Option<&JsonValue>, caption: Option<&JsonValue>) -> String {
	let Some(media) = media else {
		return String::new();
	};
	let Ok(image) = serde_json::from_value::<GalleryImage>(media.clone()) else {
		return String::new();
	};

	let (width, height) = image.dimensions();
	let mut html = format!(
		"<figure><img src=\"{}\" alt=\"{}\" width=\"{width}\" height=\"{height}\">",
		escape_html(image.best_src()),
		escape_html(image.alt.as_deref().unwrap_or("")),
	);

	// Explicit caption wins over the one baked into the asset.
	let caption = caption
		.and_then(JsonValue::as_str)
		.or(image.caption.as_deref());
	if let Some(caption) = caption {
		html.push_str(&format!("<figcaption>{}</figcaption>", escape_html(caption)));
	}

	html.push_str("</figure>");
	html
}

/// Renders a preformatted code block.
///
/// The raw code text is escaped for the five XML-unsafe characters so a
/// code sample can never inject markup into the page.
fn render_code(fields: &JsonValue) -> String {
	let code = fields.get("code").and_then(JsonValue::as_str).unwrap_or("");
	let language = fields
		.get("language")
		.and_then(JsonValue::as_str)
		.unwrap_or("plaintext");
	format!(
		"<pre><code class=\"language-{}\">{}</code></pre>",
		escape_html(language),
		escape_html(code),
	)
}

fn render_quote(fields: &JsonValue) -> String {
	let Some(text) = fields.get("quote").and_then(JsonValue::as_str) else {
		return String::new();
	};
	render_quote_parts(text, fields.get("attribution").and_then(JsonValue::as_str))
}

/// Blockquote with an optional attribution line. Shared with the legacy
/// zone renderer.
pub(crate) fn render_quote_parts(text: &str, attribution: Option<&str>) -> String {
	let mut html = format!("<blockquote><p>{}</p>", escape_html(text));
	if let Some(attribution) = attribution {
		html.push_str(&format!("<cite>{}</cite>", escape_html(attribution)));
	}
	html.push_str("</blockquote>");
	html
}

/// Column span sequence for a layout, over a 12-column grid.
///
/// Columns beyond the layout's arity repeat the last span.
fn column_spans(layout: &str) -> &'static [u32] {
	match layout {
		"3-equal" => &[4, 4, 4],
		"4-equal" => &[3, 3, 3, 3],
		"1-2" => &[4, 8],
		"2-1" => &[8, 4],
		// "2-equal" and anything unrecognized
		_ => &[6, 6],
	}
}

fn render_columns(fields: &JsonValue) -> String {
	let Some(columns) = fields.get("columns").and_then(JsonValue::as_array) else {
		return String::new();
	};
	if columns.is_empty() {
		return String::new();
	}

	let layout = fields
		.get("layout")
		.and_then(JsonValue::as_str)
		.unwrap_or("2-equal");
	let gap = match fields.get("gap").and_then(JsonValue::as_str) {
		Some("small") => "small",
		Some("large") => "large",
		_ => "medium",
	};
	let spans = column_spans(layout);

	let mut html = format!("<div class=\"grid grid-cols-12 gap-{gap}\">");
	for (index, column) in columns.iter().enumerate() {
		let span = spans[index.min(spans.len() - 1)];
		html.push_str(&format!("<div class=\"col-span-{span}\">"));
		html.push_str(&render_column_block(column));
		html.push_str("</div>");
	}
	html.push_str("</div>");
	html
}

/// Restricted dispatcher for content inside a column.
///
/// Only `richText`, `image` and `mediaBlock` are valid here; anything
/// else renders to nothing.
fn render_column_block(column: &JsonValue) -> String {
	match column.get("blockType").and_then(JsonValue::as_str) {
		Some("richText") => column
			.get("content")
			.cloned()
			.and_then(|content| Document::from_value(content).ok())
			.map(|document| document.render())
			.unwrap_or_default(),
		Some("image") | Some("mediaBlock") => {
			render_media(column.get("media"), column.get("caption"))
		}
		_ => String::new(),
	}
}
