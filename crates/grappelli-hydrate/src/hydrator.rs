//! Gallery hydration state machine.
//!
//! One hydrator instance serves one rendered document. On mount it runs a
//! single scan pass over the document's markers; each previously unseen
//! marker is parsed and mounted, then recorded in an identity-keyed set so
//! a second pass over the same DOM mounts nothing. The set belongs to the
//! instance, never to the module, so parallel documents cannot
//! contaminate each other.

use std::collections::HashSet;

use tracing::warn;

use grappelli_richtext::gallery::GalleryPayload;

use crate::marker;

/// Stable identity of a marker element within one document instance.
///
/// Keys are assigned by the [`DocumentScan`] implementation from element
/// identity, not element value: removing a marker and inserting a
/// different one at the same position yields a fresh key, so the new
/// marker is not mistaken for an already-hydrated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey(pub u64);

/// One discovered placeholder element.
#[derive(Debug, Clone)]
pub struct GalleryMarker {
	/// Identity of the underlying element
	pub key: NodeKey,
	/// The emitter's `data-gallery-id` value, if present (diagnostics only)
	pub gallery_id: Option<String>,
	/// Raw `data-gallery` attribute text, still escaped
	pub payload: String,
}

/// Access to the rendered document's current set of markers.
pub trait DocumentScan {
	/// All placeholder elements currently in the document, in document
	/// order.
	fn markers(&self) -> Vec<GalleryMarker>;
}

/// Mounts an interactive gallery widget into a placeholder element.
pub trait GalleryMount {
	/// Replaces the marker's contents with the live widget.
	fn mount(&mut self, marker: &GalleryMarker, payload: &GalleryPayload);
}

/// Where the hydrator is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
	/// Not yet scanned
	#[default]
	Idle,
	/// A scan pass is in progress
	Scanning,
	/// All discovered markers handled; no further work until re-scanned
	Settled,
}

/// When the hydrator is willing to scan.
///
/// Markers added after the initial mount are not picked up automatically;
/// whether later calls re-scan is an explicit choice, not an accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RescanPolicy {
	/// Scan once on mount; later [`GalleryHydrator::mount`] calls are
	/// no-ops and only an explicit [`GalleryHydrator::rescan`] runs again
	#[default]
	MountOnly,
	/// Every [`GalleryHydrator::mount`] call re-scans (for hosts that
	/// re-render the container on client-side navigation)
	EveryCall,
}

/// The hydrator: scans a document for gallery placeholders and mounts a
/// widget into each, exactly once per marker.
pub struct GalleryHydrator<D, M> {
	document: D,
	mounter: M,
	policy: RescanPolicy,
	phase: Phase,
	seen: HashSet<NodeKey>,
}

impl<D: DocumentScan, M: GalleryMount> GalleryHydrator<D, M> {
	/// Creates a hydrator with the default mount-only policy.
	pub fn new(document: D, mounter: M) -> Self {
		Self::with_policy(document, mounter, RescanPolicy::default())
	}

	/// Creates a hydrator with an explicit re-scan policy.
	pub fn with_policy(document: D, mounter: M, policy: RescanPolicy) -> Self {
		Self {
			document,
			mounter,
			policy,
			phase: Phase::Idle,
			seen: HashSet::new(),
		}
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// How many markers this instance has mounted so far.
	pub fn mounted_count(&self) -> usize {
		self.seen.len()
	}

	/// Runs the mount-time scan. Returns the number of newly mounted
	/// galleries.
	///
	/// Under [`RescanPolicy::MountOnly`] this is a no-op once settled.
	pub fn mount(&mut self) -> usize {
		if self.policy == RescanPolicy::MountOnly && self.phase == Phase::Settled {
			return 0;
		}
		self.scan()
	}

	/// Explicitly re-scans, regardless of policy. For callers that mutate
	/// the document after the initial mount.
	pub fn rescan(&mut self) -> usize {
		self.scan()
	}

	fn scan(&mut self) -> usize {
		self.phase = Phase::Scanning;
		let mut mounted = 0;
		for marker in self.document.markers() {
			if self.seen.contains(&marker.key) {
				continue;
			}
			match marker::parse_payload(&marker.payload) {
				Ok(payload) => {
					self.mounter.mount(&marker, &payload);
					self.seen.insert(marker.key);
					mounted += 1;
				}
				Err(err) => {
					// Local failure: skip this marker, keep going.
					warn!(
						gallery_id = marker.gallery_id.as_deref(),
						"skipping gallery marker with corrupt payload: {err}"
					);
				}
			}
		}
		self.phase = Phase::Settled;
		mounted
	}
}
