//! Recursive document tree walker.
//!
//! Children are rendered in document order and concatenated with no
//! separator; no reordering happens at any level. Rendering is pure:
//! the same tree always yields byte-identical output.

use tracing::warn;

use crate::blocks::render_block;
use crate::node::{ListType, Node};

/// Recursion ceiling for pathologically deep trees.
///
/// CMS content is not attacker-controlled, but accidental deep nesting
/// must not blow the stack. Subtrees past this depth render to nothing.
pub const MAX_RENDER_DEPTH: usize = 128;

/// Renders a single node (and its subtree) to an HTML fragment.
pub fn render_node(node: &Node) -> String {
	render_at_depth(node, 0)
}

fn render_at_depth(node: &Node, depth: usize) -> String {
	if depth >= MAX_RENDER_DEPTH {
		warn!(depth, "document exceeds maximum render depth, truncating subtree");
		return String::new();
	}

	// A wrapper node with no children renders to nothing, not to an
	// empty pair of tags.
	match node {
		Node::Root { children } | Node::Unknown { children } => render_children(children, depth),
		Node::Paragraph { children } if children.is_empty() => String::new(),
		Node::Paragraph { children } => {
			format!("<p>{}</p>", render_children(children, depth))
		}
		Node::Heading { children, .. } if children.is_empty() => String::new(),
		Node::Heading { tag, children } => {
			let tag = tag.as_str();
			format!("<{tag}>{}</{tag}>", render_children(children, depth))
		}
		Node::Text { text, format } => format.apply(text),
		Node::Linebreak => "<br>".to_string(),
		Node::Link { children, .. } if children.is_empty() => String::new(),
		Node::Link { url, children } => {
			let href = url.as_deref().unwrap_or("#");
			format!(
				"<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
				escape_html(href),
				render_children(children, depth)
			)
		}
		Node::List { children, .. } if children.is_empty() => String::new(),
		Node::List {
			list_type,
			children,
		} => {
			let tag = match list_type {
				ListType::Number => "ol",
				ListType::Bullet => "ul",
			};
			format!("<{tag}>{}</{tag}>", render_children(children, depth))
		}
		Node::ListItem { children } if children.is_empty() => String::new(),
		Node::ListItem { children } => {
			format!("<li>{}</li>", render_children(children, depth))
		}
		Node::Quote { children } if children.is_empty() => String::new(),
		Node::Quote { children } => {
			format!("<blockquote>{}</blockquote>", render_children(children, depth))
		}
		Node::Block { fields } => render_block(fields),
	}
}

fn render_children(children: &[Node], depth: usize) -> String {
	let mut out = String::new();
	for child in children {
		out.push_str(&render_at_depth(child, depth + 1));
	}
	out
}

/// Escapes the five XML-unsafe characters.
pub(crate) fn escape_html(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node::Document;
	use serde_json::json;

	fn render(value: serde_json::Value) -> String {
		render_node(&serde_json::from_value(value).unwrap())
	}

	#[test]
	fn test_unknown_node_passes_children_through() {
		let html = render(json!({
			"type": "weird",
			"children": [{ "type": "text", "text": "hi" }]
		}));
		assert_eq!(html, "hi");
	}

	#[test]
	fn test_invalid_heading_tag_falls_back_to_h2() {
		let html = render(json!({
			"type": "heading",
			"tag": "h9",
			"children": [{ "type": "text", "text": "title" }]
		}));
		assert_eq!(html, "<h2>title</h2>");
	}

	#[test]
	fn test_paragraph_with_formatted_text() {
		let html = render(json!({
			"type": "paragraph",
			"children": [
				{ "type": "text", "text": "plain " },
				{ "type": "text", "text": "loud", "format": 1 }
			]
		}));
		assert_eq!(html, "<p>plain <strong>loud</strong></p>");
	}

	#[test]
	fn test_linebreak_ignores_children() {
		let html = render(json!({
			"type": "linebreak",
			"children": [{ "type": "text", "text": "ignored" }]
		}));
		assert_eq!(html, "<br>");
	}

	#[test]
	fn test_link_fallback_chain() {
		let html = render(json!({
			"type": "link",
			"children": [{ "type": "text", "text": "here" }]
		}));
		assert_eq!(
			html,
			"<a href=\"#\" target=\"_blank\" rel=\"noopener noreferrer\">here</a>"
		);
	}

	#[test]
	fn test_list_flavors() {
		let ordered = render(json!({
			"type": "list",
			"listType": "number",
			"children": [
				{ "type": "listitem", "children": [{ "type": "text", "text": "one" }] }
			]
		}));
		assert_eq!(ordered, "<ol><li>one</li></ol>");

		let unordered = render(json!({
			"type": "list",
			"listType": "mystery",
			"children": [
				{ "type": "listitem", "children": [{ "type": "text", "text": "one" }] }
			]
		}));
		assert_eq!(unordered, "<ul><li>one</li></ul>");
	}

	#[test]
	fn test_quote_wraps_children() {
		let html = render(json!({
			"type": "quote",
			"children": [{ "type": "text", "text": "said" }]
		}));
		assert_eq!(html, "<blockquote>said</blockquote>");
	}

	#[test]
	fn test_empty_wrappers_render_nothing() {
		assert_eq!(render(json!({ "type": "paragraph" })), "");
		assert_eq!(render(json!({ "type": "heading", "tag": "h1" })), "");
		assert_eq!(render(json!({ "type": "list", "listType": "number" })), "");
		assert_eq!(render(json!({ "type": "quote", "children": [] })), "");
	}

	#[test]
	fn test_render_is_deterministic() {
		let document = Document::from_value(json!({
			"root": {
				"type": "root",
				"children": [
					{ "type": "heading", "tag": "h1", "children": [{ "type": "text", "text": "t" }] },
					{ "type": "paragraph", "children": [{ "type": "text", "text": "body", "format": 3 }] }
				]
			}
		}))
		.unwrap();
		assert_eq!(document.render(), document.render());
	}

	#[test]
	fn test_depth_guard_truncates() {
		// Build a chain of paragraphs deeper than the guard.
		let mut value = json!({ "type": "text", "text": "deep" });
		for _ in 0..(MAX_RENDER_DEPTH + 10) {
			value = json!({ "type": "paragraph", "children": [value] });
		}
		let html = render(value);
		// Truncated, not panicked; the innermost text never survives.
		assert!(!html.contains("deep"));
	}

	#[test]
	fn test_sibling_order_is_preserved() {
		let html = render(json!({
			"type": "root",
			"children": [
				{ "type": "text", "text": "a" },
				{ "type": "text", "text": "b" },
				{ "type": "text", "text": "c" }
			]
		}));
		assert_eq!(html, "abc");
	}
}
