//! # Grappelli RichText
//!
//! Server-side rendering for CMS-authored structured documents.
//!
//! The CMS delivers page content as a tree of typed nodes (paragraphs,
//! headings, formatted text runs, links, lists, quotes and embedded
//! "block" payloads such as media, code samples and image galleries).
//! This crate converts such a tree into an HTML fragment, deterministically
//! and without side effects, so the host framework can render pages in
//! parallel and inject the result as a trusted fragment.
//!
//! ## Architecture
//!
//! ```text
//! grappelli-richtext
//! ├── format  - inline style bitmask decoding
//! ├── node    - document tree model (closed sum type)
//! ├── render  - recursive tree walker
//! ├── blocks  - embedded block dispatch (media, code, quote, columns)
//! ├── gallery - gallery placeholder emission (client hydration hand-off)
//! └── legacy  - flat "dynamic zone" renderer for the older CMS format
//! ```
//!
//! ## Error policy
//!
//! CMS content is authored by non-technical editors, so a single malformed
//! node must never break page rendering. Rendering therefore never returns
//! an error: malformed or unrecognized nodes degrade to their children or
//! to an empty string, with diagnostics going to `tracing`. The only
//! fallible operation is parsing a document out of JSON.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grappelli_richtext::prelude::*;
//!
//! let document = Document::from_json(payload)?;
//! let html = document.render();
//! ```
//!
//! Galleries are not rendered to final markup. They become placeholder
//! elements carrying a serialized payload, which `grappelli-hydrate`
//! mounts into interactive widgets after the page loads.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod blocks;
pub mod format;
pub mod gallery;
pub mod legacy;
pub mod node;
pub mod render;

// Prelude for convenient imports
pub mod prelude {
	//! Convenient re-exports of commonly used items

	pub use crate::blocks::render_block;
	pub use crate::error::{RichTextError, RichTextResult};
	pub use crate::format::TextFormat;
	pub use crate::gallery::{GalleryImage, GalleryLayout, GalleryPayload};
	pub use crate::legacy::{LegacyEntry, render_zone};
	pub use crate::node::{Document, HeadingTag, ListType, Node};
	pub use crate::render::render_node;
}

/// Rich-text error types
pub mod error {
	use thiserror::Error;

	/// Errors at the document parse boundary.
	///
	/// Rendering itself is infallible; these only occur when converting a
	/// raw CMS payload into a [`Document`](crate::node::Document).
	#[derive(Error, Debug)]
	pub enum RichTextError {
		/// The payload was not valid JSON or did not match the document shape
		#[error("Malformed document payload: {0}")]
		Parse(#[from] serde_json::Error),

		/// The payload parsed, but carried no root node
		#[error("Document has no root node")]
		MissingRoot,
	}

	/// Result type for rich-text operations
	pub type RichTextResult<T> = Result<T, RichTextError>;
}
