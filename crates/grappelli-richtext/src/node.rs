//! Document tree model.
//!
//! CMS node types form a closed set, so the tree is modeled as a sum type
//! with one default arm: a node whose `type` string we do not recognize
//! becomes [`Node::Unknown`] and keeps its children, preserving the
//! never-fail contract while the match stays exhaustive for the known set.

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::error::{RichTextError, RichTextResult};
use crate::format::TextFormat;
use crate::render::render_node;

/// One node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	/// Document root; renders its children with no wrapper
	Root {
		/// Ordered child nodes
		children: Vec<Node>,
	},
	/// Paragraph (`<p>`)
	Paragraph {
		/// Ordered child nodes
		children: Vec<Node>,
	},
	/// Heading (`<h1>`..`<h6>`)
	Heading {
		/// Heading level, already normalized to a valid tag
		tag: HeadingTag,
		/// Ordered child nodes
		children: Vec<Node>,
	},
	/// Inline text run with format flags
	Text {
		/// Raw text content
		text: String,
		/// Active inline styles
		format: TextFormat,
	},
	/// Hard line break (`<br>`); any children are ignored
	Linebreak,
	/// Anchor; destination resolved from `fields.url`, then `url`, then `#`
	Link {
		/// Resolved destination, if the CMS supplied one
		url: Option<String>,
		/// Ordered child nodes
		children: Vec<Node>,
	},
	/// Ordered or unordered list
	List {
		/// List flavor
		list_type: ListType,
		/// Ordered child nodes
		children: Vec<Node>,
	},
	/// List item (`<li>`)
	ListItem {
		/// Ordered child nodes
		children: Vec<Node>,
	},
	/// Block quote (`<blockquote>`)
	Quote {
		/// Ordered child nodes
		children: Vec<Node>,
	},
	/// Embedded block payload, dispatched on `fields.blockType`
	Block {
		/// Opaque block payload
		fields: JsonValue,
	},
	/// Unrecognized node type; renders as a pass-through of its children
	Unknown {
		/// Ordered child nodes
		children: Vec<Node>,
	},
}

/// Heading level, normalized at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingTag {
	/// `<h1>`
	H1,
	/// `<h2>` (the fallback for absent or invalid tags)
	#[default]
	H2,
	/// `<h3>`
	H3,
	/// `<h4>`
	H4,
	/// `<h5>`
	H5,
	/// `<h6>`
	H6,
}

impl HeadingTag {
	/// Parses a CMS `tag` value, falling back to `h2` for anything
	/// outside `h1..h6`.
	pub fn parse(tag: Option<&str>) -> Self {
		match tag {
			Some("h1") => Self::H1,
			Some("h2") => Self::H2,
			Some("h3") => Self::H3,
			Some("h4") => Self::H4,
			Some("h5") => Self::H5,
			Some("h6") => Self::H6,
			_ => Self::H2,
		}
	}

	/// The element name for this level.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::H1 => "h1",
			Self::H2 => "h2",
			Self::H3 => "h3",
			Self::H4 => "h4",
			Self::H5 => "h5",
			Self::H6 => "h6",
		}
	}
}

/// List flavor; unknown values fall back to bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListType {
	/// Ordered list (`<ol>`)
	Number,
	/// Unordered list (`<ul>`)
	#[default]
	Bullet,
}

impl ListType {
	/// Parses a CMS `listType` value.
	pub fn parse(list_type: Option<&str>) -> Self {
		match list_type {
			Some("number") => Self::Number,
			_ => Self::Bullet,
		}
	}
}

/// Raw CMS node shape before classification.
///
/// Every field is optional; classification in `From<RawNode>` applies the
/// per-type defaults so malformed nodes degrade instead of failing.
#[derive(Deserialize)]
struct RawNode {
	#[serde(rename = "type", default)]
	kind: String,
	#[serde(default)]
	children: Vec<Node>,
	#[serde(default)]
	text: Option<String>,
	#[serde(default)]
	format: Option<JsonValue>,
	#[serde(default)]
	tag: Option<String>,
	#[serde(rename = "listType", default)]
	list_type: Option<String>,
	#[serde(default)]
	url: Option<String>,
	#[serde(default)]
	fields: Option<JsonValue>,
}

impl From<RawNode> for Node {
	fn from(raw: RawNode) -> Self {
		match raw.kind.as_str() {
			"root" => Node::Root {
				children: raw.children,
			},
			"paragraph" => Node::Paragraph {
				children: raw.children,
			},
			"heading" => Node::Heading {
				tag: HeadingTag::parse(raw.tag.as_deref()),
				children: raw.children,
			},
			"text" => Node::Text {
				text: raw.text.unwrap_or_default(),
				format: TextFormat::from_json(raw.format.as_ref()),
			},
			"linebreak" => Node::Linebreak,
			"link" => {
				// fields.url wins over the top-level url
				let fields_url = raw
					.fields
					.as_ref()
					.and_then(|fields| fields.get("url"))
					.and_then(JsonValue::as_str)
					.map(String::from);
				Node::Link {
					url: fields_url.or(raw.url),
					children: raw.children,
				}
			}
			"list" => Node::List {
				list_type: ListType::parse(raw.list_type.as_deref()),
				children: raw.children,
			},
			"listitem" => Node::ListItem {
				children: raw.children,
			},
			"quote" => Node::Quote {
				children: raw.children,
			},
			"block" => Node::Block {
				fields: raw.fields.unwrap_or(JsonValue::Null),
			},
			_ => Node::Unknown {
				children: raw.children,
			},
		}
	}
}

impl<'de> Deserialize<'de> for Node {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		RawNode::deserialize(deserializer).map(Node::from)
	}
}

/// A complete CMS document: `{ "root": <node> }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
	/// The single root node
	pub root: Node,
}

impl Document {
	/// Parses a document out of a JSON string.
	pub fn from_json(payload: &str) -> RichTextResult<Self> {
		Ok(serde_json::from_str(payload)?)
	}

	/// Parses a document out of an already-decoded JSON value.
	pub fn from_value(value: JsonValue) -> RichTextResult<Self> {
		if value.get("root").is_none() {
			return Err(RichTextError::MissingRoot);
		}
		Ok(serde_json::from_value(value)?)
	}

	/// Renders the whole document to an HTML fragment.
	pub fn render(&self) -> String {
		render_node(&self.root)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_unknown_type_keeps_children() {
		let node: Node = serde_json::from_value(json!({
			"type": "weird",
			"children": [{ "type": "text", "text": "hi" }]
		}))
		.unwrap();

		match node {
			Node::Unknown { children } => assert_eq!(children.len(), 1),
			other => panic!("expected Unknown, got {other:?}"),
		}
	}

	#[test]
	fn test_heading_tag_fallback() {
		assert_eq!(HeadingTag::parse(Some("h3")), HeadingTag::H3);
		assert_eq!(HeadingTag::parse(Some("h9")), HeadingTag::H2);
		assert_eq!(HeadingTag::parse(None), HeadingTag::H2);
	}

	#[test]
	fn test_link_prefers_fields_url() {
		let node: Node = serde_json::from_value(json!({
			"type": "link",
			"url": "https://fallback.example",
			"fields": { "url": "https://primary.example" },
			"children": []
		}))
		.unwrap();

		match node {
			Node::Link { url, .. } => {
				assert_eq!(url.as_deref(), Some("https://primary.example"));
			}
			other => panic!("expected Link, got {other:?}"),
		}
	}

	#[test]
	fn test_link_without_any_url() {
		let node: Node = serde_json::from_value(json!({ "type": "link" })).unwrap();
		match node {
			Node::Link { url, .. } => assert!(url.is_none()),
			other => panic!("expected Link, got {other:?}"),
		}
	}

	#[test]
	fn test_text_defaults() {
		let node: Node = serde_json::from_value(json!({ "type": "text" })).unwrap();
		assert_eq!(
			node,
			Node::Text {
				text: String::new(),
				format: TextFormat::default(),
			}
		);
	}

	#[test]
	fn test_list_type_fallback() {
		assert_eq!(ListType::parse(Some("number")), ListType::Number);
		assert_eq!(ListType::parse(Some("roman")), ListType::Bullet);
		assert_eq!(ListType::parse(None), ListType::Bullet);
	}

	#[test]
	fn test_document_missing_root() {
		let err = Document::from_value(json!({ "title": "no tree here" })).unwrap_err();
		assert!(matches!(err, RichTextError::MissingRoot));
	}

	#[test]
	fn test_document_from_json() {
		let document = Document::from_json(
			r#"{ "root": { "type": "root", "children": [ { "type": "text", "text": "ok" } ] } }"#,
		)
		.unwrap();
		assert!(matches!(document.root, Node::Root { .. }));
	}
}
