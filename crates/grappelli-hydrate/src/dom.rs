//! `web-sys` implementations of the hydration seams.
//!
//! Only compiled for `wasm32`: the scan walks the real DOM with
//! `query_selector_all` and the mount writes the gallery widget markup
//! into the placeholder element.

use std::cell::Cell;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use grappelli_richtext::gallery::{
	GALLERY_DATA_ATTR, GALLERY_ID_ATTR, GALLERY_PLACEHOLDER_CLASS, GalleryGap, GalleryLayout,
	GalleryPayload,
};

use crate::hydrator::{DocumentScan, GalleryHydrator, GalleryMarker, GalleryMount, NodeKey};

/// Attribute used to pin a synthetic identity onto a marker element the
/// first time the scan sees it. Survives across scan passes as long as
/// the element itself does.
const NODE_KEY_ATTR: &str = "data-gallery-key";

/// Marker class applied to an element once its widget is mounted.
const HYDRATED_CLASS: &str = "gallery-hydrated";

/// A live DOM document to scan for gallery placeholders.
pub struct DomDocument {
	document: Document,
	next_key: Cell<u64>,
}

impl DomDocument {
	/// Wraps an existing document.
	pub fn new(document: Document) -> Self {
		Self {
			document,
			next_key: Cell::new(0),
		}
	}

	/// The window's document, if available.
	pub fn from_window() -> Option<Self> {
		web_sys::window()?.document().map(Self::new)
	}

	/// Identity key for an element: read the pinned one, or pin a fresh
	/// one. A replaced element carries no pin, so it gets a new key.
	fn key_for(&self, element: &Element) -> NodeKey {
		if let Some(existing) = element
			.get_attribute(NODE_KEY_ATTR)
			.and_then(|value| value.parse().ok())
		{
			return NodeKey(existing);
		}
		let key = self.next_key.get();
		self.next_key.set(key + 1);
		let _ = element.set_attribute(NODE_KEY_ATTR, &key.to_string());
		NodeKey(key)
	}
}

impl DocumentScan for DomDocument {
	fn markers(&self) -> Vec<GalleryMarker> {
		let mut markers = Vec::new();
		let selector = format!(".{GALLERY_PLACEHOLDER_CLASS}");
		if let Ok(node_list) = self.document.query_selector_all(&selector) {
			for i in 0..node_list.length() {
				if let Some(node) = node_list.item(i)
					&& let Some(element) = node.dyn_ref::<Element>()
				{
					let Some(payload) = element.get_attribute(GALLERY_DATA_ATTR) else {
						// Placeholder without a payload: nothing to mount.
						continue;
					};
					markers.push(GalleryMarker {
						key: self.key_for(element),
						gallery_id: element.get_attribute(GALLERY_ID_ATTR),
						payload,
					});
				}
			}
		}
		markers
	}
}

/// Mounts the gallery widget by writing its markup into the placeholder.
pub struct DomGalleryMount {
	document: Document,
}

impl DomGalleryMount {
	/// Creates a mounter over the given document.
	pub fn new(document: Document) -> Self {
		Self { document }
	}

	fn find_marker_element(&self, marker: &GalleryMarker) -> Option<Element> {
		self.document
			.query_selector(&format!("[{NODE_KEY_ATTR}=\"{}\"]", marker.key.0))
			.ok()
			.flatten()
	}
}

impl GalleryMount for DomGalleryMount {
	fn mount(&mut self, marker: &GalleryMarker, payload: &GalleryPayload) {
		let Some(element) = self.find_marker_element(marker) else {
			return;
		};
		element.set_inner_html(&widget_markup(payload));
		let _ = element.class_list().add_1(HYDRATED_CLASS);
	}
}

/// The widget's inner markup for a parsed payload.
fn widget_markup(payload: &GalleryPayload) -> String {
	let layout = match payload.layout {
		GalleryLayout::Grid => "grid",
		GalleryLayout::Masonry => "masonry",
		GalleryLayout::Justified => "justified",
		GalleryLayout::Carousel => "carousel",
	};
	let gap = match payload.gap {
		GalleryGap::Small => "small",
		GalleryGap::Medium => "medium",
		GalleryGap::Large => "large",
	};

	let mut html = format!(
		"<div class=\"gallery gallery-{layout} columns-{} gap-{gap}\">",
		payload.columns
	);
	for image in &payload.images {
		let (width, height) = image.dimensions();
		html.push_str(&format!(
			"<img src=\"{}\" alt=\"{}\" width=\"{width}\" height=\"{height}\" loading=\"lazy\">",
			image.best_src(),
			image.alt.as_deref().unwrap_or(""),
		));
	}
	html.push_str("</div>");
	html
}

/// Scans the window's document once and mounts every gallery placeholder.
/// Returns the number of galleries mounted, or 0 when no document is
/// available.
pub fn hydrate_galleries() -> usize {
	let Some(document) = DomDocument::from_window() else {
		return 0;
	};
	let mounter = DomGalleryMount::new(document.document.clone());
	let mut hydrator = GalleryHydrator::new(document, mounter);
	hydrator.mount()
}
