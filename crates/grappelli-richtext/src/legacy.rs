//! Legacy "dynamic zone" rendering.
//!
//! The product's earlier CMS delivered articles as a flat array of typed
//! components instead of a single tree. Each entry is self-contained and
//! is dispatched on its `__component` string; nesting only occurs inside
//! an entry's own rich-text content, which reuses a reduced form of the
//! main tree walker.
//!
//! Unlike the primary format there is no safe generic fallback for an
//! unrecognized entry (entries are opaque components, not nested markup),
//! so unknowns log a warning and render nothing. Failures stay local to
//! one entry; siblings always continue.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::blocks::{render_media, render_quote_parts};
use crate::gallery;
use crate::node::Node;
use crate::render::render_node;

/// A typed zone entry: discriminator plus its remaining fields.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyEntry {
	/// Component discriminator, e.g. `blog-components.rich-text`
	#[serde(rename = "__component")]
	pub component: String,
	/// The entry's own fields
	#[serde(flatten)]
	pub data: JsonValue,
}

impl LegacyEntry {
	/// Renders this entry to an HTML fragment.
	pub fn render(&self) -> String {
		dispatch(&self.component, &self.data)
	}
}

/// Renders a whole zone in document order.
pub fn render_zone(entries: &[JsonValue]) -> String {
	let mut html = String::new();
	for entry in entries {
		html.push_str(&render_entry(entry));
	}
	html
}

/// Renders one raw zone entry.
pub fn render_entry(entry: &JsonValue) -> String {
	let Some(component) = entry.get("__component").and_then(JsonValue::as_str) else {
		warn!("zone entry without __component, skipping");
		return String::new();
	};
	dispatch(component, entry)
}

fn dispatch(component: &str, data: &JsonValue) -> String {
	match component {
		"two-columns.paragraph-image" => render_two_columns(data, false),
		"two-columns.image-paragraph" => render_two_columns(data, true),
		"image-gallery.image-gallery" => gallery::render_placeholder(data),
		"blog-components.rich-text" => render_rich_nodes(data.get("body")),
		"blog-components.media" => render_media(data.get("media"), data.get("caption")),
		"blog-components.quote" => {
			let Some(text) = data.get("quote").and_then(JsonValue::as_str) else {
				return String::new();
			};
			render_quote_parts(text, data.get("attribution").and_then(JsonValue::as_str))
		}
		other => {
			warn!(component = other, "unrecognized zone component, skipping");
			String::new()
		}
	}
}

/// Reduced walker for an entry's rich-text content.
///
/// Zone entries carry no embedded blocks, so a `block` node inside one is
/// dropped outright; everything else goes through the main walker.
fn render_rich_nodes(body: Option<&JsonValue>) -> String {
	let Some(body) = body else {
		return String::new();
	};
	let Ok(nodes) = serde_json::from_value::<Vec<Node>>(body.clone()) else {
		warn!("zone entry with malformed rich-text body, skipping");
		return String::new();
	};
	nodes
		.iter()
		.map(|node| match node {
			Node::Block { .. } => String::new(),
			other => render_node(other),
		})
		.collect()
}

fn render_two_columns(data: &JsonValue, image_first: bool) -> String {
	let text = render_rich_nodes(data.get("richText"));
	let media = render_media(data.get("media"), data.get("caption"));
	let (first, second) = if image_first {
		(media, text)
	} else {
		(text, media)
	};
	format!(
		"<div class=\"grid grid-cols-12 gap-medium\">\
		 <div class=\"col-span-6\">{first}</div>\
		 <div class=\"col-span-6\">{second}</div>\
		 </div>"
	)
}
