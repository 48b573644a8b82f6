//! # Grappelli Hydrate
//!
//! Client-side hydration of gallery placeholders.
//!
//! `grappelli-richtext` renders galleries as marker elements
//! (`.gallery-placeholder` with a serialized `data-gallery` attribute)
//! instead of final markup, keeping the interactive widget out of the
//! server-rendered payload. After the page mounts, this crate scans the
//! document once, parses each marker's payload and mounts a gallery
//! widget into it, exactly once per marker.
//!
//! The scan/mount core is target-independent and generic over two small
//! traits ([`DocumentScan`], [`GalleryMount`]), so the state machine is
//! fully testable without a browser; the `dom` module supplies the
//! `web-sys` implementations on `wasm32`.
//!
//! ## Error policy
//!
//! A corrupt payload on one marker is logged and skipped; every other
//! marker still hydrates. Nothing in this crate panics the page.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod hydrator;
pub mod marker;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use hydrator::{
	DocumentScan, GalleryHydrator, GalleryMarker, GalleryMount, NodeKey, Phase, RescanPolicy,
};
pub use marker::{parse_payload, unescape_payload};

#[cfg(target_arch = "wasm32")]
pub use dom::hydrate_galleries;

/// Hydration error types
pub mod error {
	use thiserror::Error;

	/// Errors local to a single gallery marker.
	#[derive(Error, Debug)]
	pub enum HydrateError {
		/// The marker's serialized payload was not valid gallery JSON
		#[error("Unparseable gallery payload: {0}")]
		Payload(#[from] serde_json::Error),

		/// The marker element lacks a required attribute
		#[error("Marker is missing its {0} attribute")]
		MissingAttribute(&'static str),
	}

	/// Result type for hydration operations
	pub type HydrateResult<T> = Result<T, HydrateError>;
}
