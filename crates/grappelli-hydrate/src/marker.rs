//! The server/client hand-off contract.
//!
//! A placeholder is an element with class `gallery-placeholder` whose
//! `data-gallery` attribute holds the gallery payload as JSON with every
//! single quote escaped as `&#39;` (it sits inside a single-quoted
//! attribute). The constants and payload types are shared with the
//! server-side emitter so the two sides cannot drift apart.

pub use grappelli_richtext::gallery::{
	GALLERY_DATA_ATTR, GALLERY_ID_ATTR, GALLERY_PLACEHOLDER_CLASS, GalleryPayload,
};

use crate::error::HydrateResult;

/// Reverses the emitter's single-quote escaping.
pub fn unescape_payload(raw: &str) -> String {
	raw.replace("&#39;", "'")
}

/// Parses a marker's raw `data-gallery` attribute value.
pub fn parse_payload(raw: &str) -> HydrateResult<GalleryPayload> {
	Ok(serde_json::from_str(&unescape_payload(raw))?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use grappelli_richtext::gallery::GalleryLayout;
	use rstest::rstest;

	#[test]
	fn test_parse_payload() {
		let payload = parse_payload(
			r#"{"images":[{"url":"a.jpg"}],"layout":"carousel","columns":4,"gap":"large"}"#,
		)
		.unwrap();
		assert_eq!(payload.images.len(), 1);
		assert_eq!(payload.layout, GalleryLayout::Carousel);
		assert_eq!(payload.columns, 4);
	}

	#[test]
	fn test_parse_payload_unescapes_quotes() {
		let payload =
			parse_payload(r#"{"images":[{"url":"a.jpg","alt":"it&#39;s fine"}]}"#).unwrap();
		assert_eq!(payload.images[0].alt.as_deref(), Some("it's fine"));
	}

	#[test]
	fn test_parse_payload_defaults() {
		let payload = parse_payload(r#"{"images":[{"url":"a.jpg"}]}"#).unwrap();
		assert_eq!(payload.layout, GalleryLayout::Grid);
		assert_eq!(payload.columns, 3);
	}

	#[rstest]
	#[case::not_json("not json")]
	#[case::wrong_shape("[1, 2, 3]")]
	#[case::missing_images(r#"{"layout":"grid"}"#)]
	fn test_parse_payload_rejects_garbage(#[case] raw: &str) {
		assert!(parse_payload(raw).is_err());
	}
}
