//! # Grappelli
//!
//! Structured-document rendering for CMS-driven marketing sites.
//!
//! Marketing pages are assembled from content authored in a headless CMS:
//! rich-text trees, dynamic block lists and media references. Grappelli is
//! the engine that turns those documents into markup: deterministically
//! on the server, with interactive galleries deferred to a second,
//! client-side hydration pass.
//!
//! ## Crates
//!
//! - [`richtext`] handles server-side rendering: the document tree walker,
//!   inline-format decoding, block dispatch, gallery placeholder emission
//!   and the legacy "dynamic zone" renderer.
//! - [`hydrate`] is the client-side pass: it scans rendered markup for
//!   gallery placeholders and mounts a widget into each, exactly once.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use grappelli::prelude::*;
//!
//! // Server side: CMS payload in, HTML fragment out.
//! let document = Document::from_json(cms_payload)?;
//! let html = document.render();
//!
//! // Client side (wasm32): mount gallery widgets into the placeholders.
//! grappelli::hydrate::hydrate_galleries();
//! ```

pub use grappelli_hydrate as hydrate;
pub use grappelli_richtext as richtext;

/// Convenient re-exports of commonly used items
pub mod prelude {
	pub use grappelli_hydrate::{
		DocumentScan, GalleryHydrator, GalleryMount, Phase, RescanPolicy,
	};
	pub use grappelli_richtext::prelude::*;
}
