//! Gallery placeholder emission.
//!
//! Galleries are the one block type that is not rendered to final markup
//! on the server. The interactive widget is heavy and client-only, so the
//! server emits a marker element carrying the gallery data as a serialized
//! attribute, and `grappelli-hydrate` mounts the widget into it after the
//! page loads. The marker shape is the sole hand-off contract between the
//! two sides:
//!
//! ```text
//! <div class="gallery-placeholder"
//!      data-gallery-id="gal-<uuid>"
//!      data-gallery='{"images":[...],"layout":"grid","columns":3,"gap":"medium"}'>
//! </div>
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Class name the hydrator scans for.
pub const GALLERY_PLACEHOLDER_CLASS: &str = "gallery-placeholder";

/// Attribute carrying the serialized gallery payload.
pub const GALLERY_DATA_ATTR: &str = "data-gallery";

/// Attribute carrying the per-instance placeholder id.
pub const GALLERY_ID_ATTR: &str = "data-gallery-id";

/// Default column count when the CMS omits one.
pub const DEFAULT_COLUMNS: u32 = 3;

/// One pre-rendered size variant of a CMS image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageVariant {
	/// Variant URL
	pub url: String,
	/// Variant width in pixels, if the CMS recorded it
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<u32>,
	/// Variant height in pixels, if the CMS recorded it
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub height: Option<u32>,
}

/// Optional pre-rendered variants of a CMS image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageSizes {
	/// Thumbnail variant
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub thumbnail: Option<ImageVariant>,
	/// Small variant
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub small: Option<ImageVariant>,
	/// Medium variant
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub medium: Option<ImageVariant>,
	/// Large variant
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub large: Option<ImageVariant>,
}

impl ImageSizes {
	/// Whether no variant is present (used to omit the field entirely).
	pub fn is_empty(&self) -> bool {
		self.thumbnail.is_none()
			&& self.small.is_none()
			&& self.medium.is_none()
			&& self.large.is_none()
	}
}

/// A CMS-owned image reference. Only `url` is guaranteed present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
	/// CMS asset id
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Original asset URL
	pub url: String,
	/// Alt text
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub alt: Option<String>,
	/// Caption
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub caption: Option<String>,
	/// Original width in pixels
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<u32>,
	/// Original height in pixels
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub height: Option<u32>,
	/// Original file name
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filename: Option<String>,
	/// Pre-rendered size variants
	#[serde(default, skip_serializing_if = "ImageSizes::is_empty")]
	pub sizes: ImageSizes,
}

impl GalleryImage {
	/// Picks the display source: large variant, then medium, then the
	/// raw URL.
	pub fn best_src(&self) -> &str {
		if let Some(large) = &self.sizes.large {
			return &large.url;
		}
		if let Some(medium) = &self.sizes.medium {
			return &medium.url;
		}
		&self.url
	}

	/// Display dimensions, defaulting to 800x600 when the CMS has none.
	pub fn dimensions(&self) -> (u32, u32) {
		(self.width.unwrap_or(800), self.height.unwrap_or(600))
	}
}

/// Gallery arrangement requested by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryLayout {
	/// Uniform grid (the fallback for unknown values)
	#[default]
	Grid,
	/// Masonry columns
	Masonry,
	/// Justified rows
	Justified,
	/// Horizontal carousel
	Carousel,
}

impl GalleryLayout {
	fn parse(value: Option<&JsonValue>) -> Self {
		match value.and_then(JsonValue::as_str) {
			Some("masonry") => Self::Masonry,
			Some("justified") => Self::Justified,
			Some("carousel") => Self::Carousel,
			_ => Self::Grid,
		}
	}
}

/// Spacing between gallery cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryGap {
	/// Tight spacing
	Small,
	/// Default spacing
	#[default]
	Medium,
	/// Wide spacing
	Large,
}

impl GalleryGap {
	fn parse(value: Option<&JsonValue>) -> Self {
		match value.and_then(JsonValue::as_str) {
			Some("small") => Self::Small,
			Some("large") => Self::Large,
			_ => Self::Medium,
		}
	}
}

/// The payload serialized into the `data-gallery` attribute.
///
/// Field order is the declaration order, so serialization is
/// deterministic and the escape round-trip is byte-stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryPayload {
	/// Images in document order
	pub images: Vec<GalleryImage>,
	/// Arrangement
	#[serde(default)]
	pub layout: GalleryLayout,
	/// Column count
	#[serde(default = "default_columns")]
	pub columns: u32,
	/// Cell spacing
	#[serde(default)]
	pub gap: GalleryGap,
}

fn default_columns() -> u32 {
	DEFAULT_COLUMNS
}

/// Renders a gallery block's `fields` to a placeholder marker.
///
/// Empty or absent `images` yields an empty string, never an error.
pub fn render_placeholder(fields: &JsonValue) -> String {
	let images: Vec<GalleryImage> = match fields.get("images").and_then(JsonValue::as_array) {
		Some(raw) if !raw.is_empty() => raw
			.iter()
			.filter_map(|image| serde_json::from_value(image.clone()).ok())
			.collect(),
		_ => return String::new(),
	};
	if images.is_empty() {
		return String::new();
	}

	let payload = GalleryPayload {
		images,
		layout: GalleryLayout::parse(fields.get("layout")),
		columns: fields
			.get("columns")
			.and_then(JsonValue::as_u64)
			.map(|columns| columns as u32)
			.unwrap_or(DEFAULT_COLUMNS),
		gap: GalleryGap::parse(fields.get("gap")),
	};
	emit_placeholder(&payload)
}

/// Emits the marker element for an already-built payload.
pub fn emit_placeholder(payload: &GalleryPayload) -> String {
	let Ok(json) = serde_json::to_string(payload) else {
		// Unreachable for these types; degrade to nothing regardless.
		return String::new();
	};
	format!(
		"<div class=\"{GALLERY_PLACEHOLDER_CLASS}\" {GALLERY_ID_ATTR}=\"{}\" {GALLERY_DATA_ATTR}='{}'></div>",
		placeholder_id(),
		escape_single_quotes(&json),
	)
}

/// Escapes single quotes so the JSON survives inside a single-quoted
/// HTML attribute. The hydrator reverses this before parsing.
pub fn escape_single_quotes(json: &str) -> String {
	json.replace('\'', "&#39;")
}

/// Opaque per-instance marker id.
///
/// Random rather than sequential: ids must stay unique when independent
/// documents are rendered in parallel.
fn placeholder_id() -> String {
	format!("gal-{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn two_image_fields() -> JsonValue {
		json!({
			"blockType": "gallery",
			"images": [
				{ "id": "a", "url": "https://cdn.example/a.jpg", "alt": "first" },
				{ "id": "b", "url": "https://cdn.example/b.jpg" }
			]
		})
	}

	fn extract_data_attr(html: &str) -> String {
		let start = html.find("data-gallery='").unwrap() + "data-gallery='".len();
		let end = html[start..].find('\'').unwrap();
		html[start..start + end].to_string()
	}

	#[test]
	fn test_empty_images_render_nothing() {
		assert_eq!(render_placeholder(&json!({ "blockType": "gallery" })), "");
		assert_eq!(
			render_placeholder(&json!({ "blockType": "gallery", "images": [] })),
			""
		);
	}

	#[test]
	fn test_marker_contract() {
		let html = render_placeholder(&two_image_fields());
		assert!(html.contains("class=\"gallery-placeholder\""));
		assert!(html.contains("data-gallery-id=\"gal-"));

		let payload: GalleryPayload =
			serde_json::from_str(&extract_data_attr(&html)).unwrap();
		assert_eq!(payload.images.len(), 2);
		assert_eq!(payload.images[0].id.as_deref(), Some("a"));
		assert_eq!(payload.images[1].id.as_deref(), Some("b"));
		assert_eq!(payload.layout, GalleryLayout::Grid);
		assert_eq!(payload.columns, DEFAULT_COLUMNS);
		assert_eq!(payload.gap, GalleryGap::Medium);
	}

	#[test]
	fn test_marker_ids_are_unique() {
		let first = render_placeholder(&two_image_fields());
		let second = render_placeholder(&two_image_fields());
		assert_ne!(extract_id(&first), extract_id(&second));

		fn extract_id(html: &str) -> String {
			let start = html.find("data-gallery-id=\"").unwrap() + "data-gallery-id=\"".len();
			let end = html[start..].find('"').unwrap();
			html[start..start + end].to_string()
		}
	}

	#[test]
	fn test_escape_round_trip() {
		let payload = GalleryPayload {
			images: vec![GalleryImage {
				id: None,
				url: "https://cdn.example/it's.jpg".to_string(),
				alt: Some("editor's pick".to_string()),
				caption: None,
				width: None,
				height: None,
				filename: None,
				sizes: ImageSizes::default(),
			}],
			layout: GalleryLayout::Masonry,
			columns: 2,
			gap: GalleryGap::Small,
		};
		let escaped = escape_single_quotes(&serde_json::to_string(&payload).unwrap());
		assert!(!escaped.contains('\''));

		let parsed: GalleryPayload =
			serde_json::from_str(&escaped.replace("&#39;", "'")).unwrap();
		let re_escaped = escape_single_quotes(&serde_json::to_string(&parsed).unwrap());
		assert_eq!(escaped, re_escaped);
	}

	#[test]
	fn test_best_src_preference_chain() {
		let mut image = GalleryImage {
			id: None,
			url: "raw.jpg".to_string(),
			alt: None,
			caption: None,
			width: None,
			height: None,
			filename: None,
			sizes: ImageSizes::default(),
		};
		assert_eq!(image.best_src(), "raw.jpg");

		image.sizes.medium = Some(ImageVariant {
			url: "medium.jpg".to_string(),
			width: None,
			height: None,
		});
		assert_eq!(image.best_src(), "medium.jpg");

		image.sizes.large = Some(ImageVariant {
			url: "large.jpg".to_string(),
			width: None,
			height: None,
		});
		assert_eq!(image.best_src(), "large.jpg");
	}

	#[test]
	fn test_dimensions_default() {
		let image: GalleryImage =
			serde_json::from_value(json!({ "url": "x.jpg" })).unwrap();
		assert_eq!(image.dimensions(), (800, 600));
	}

	#[test]
	fn test_unknown_layout_falls_back_to_grid() {
		let mut fields = two_image_fields();
		fields["layout"] = json!("spiral");
		let html = render_placeholder(&fields);
		let payload: GalleryPayload =
			serde_json::from_str(&extract_data_attr(&html)).unwrap();
		assert_eq!(payload.layout, GalleryLayout::Grid);
	}
}
