//! Tag aggregation: regions of text that carry extra rendering data.
//!
//! A [`TagAggregator`] answers "which tags intersect this span?" and announces
//! through [`TagAggregator::tags_changed`] whenever the answer for some region
//! may have changed. [`TagStore`] is the in-memory implementation.

mod store;

use std::fmt;

pub use store::TagStore;

use crate::event::Event;
use crate::mapping::MappingSpan;
use crate::snapshot::SnapshotSpan;

/// A tag and the span it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSpan<T> {
	pub span: MappingSpan,
	pub tag: T,
}

/// Payload of [`TagAggregator::tags_changed`]: the region whose tags changed.
#[derive(Debug, Clone, PartialEq)]
pub struct TagsChangedArgs {
	pub span: MappingSpan,
}

/// Source of tags for one view.
pub trait TagAggregator<T> {
	/// Returns the tags intersecting `span`, ordered by start position.
	fn tags(&self, span: &SnapshotSpan) -> Vec<TagSpan<T>>;

	/// Raised synchronously whenever tags in some region change.
	fn tags_changed(&self) -> &Event<TagsChangedArgs>;

	/// Releases the aggregator's resources. Called once by its owner; the
	/// aggregator reports no tags afterwards.
	fn dispose(&mut self);
}

/// Which neighbouring character an adornment sticks to when text is inserted
/// at its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PositionAffinity {
	#[default]
	Predecessor,
	Successor,
}

/// Space an adornment asks the line layout to reserve in place of text.
///
/// All measurements are in layout units.
#[derive(Clone, Default, PartialEq)]
pub struct SpaceNegotiatingAdornmentTag {
	pub width: f64,
	pub top_space: f64,
	pub baseline: f64,
	pub text_height: f64,
	pub bottom_space: f64,
	pub affinity: PositionAffinity,
}

impl SpaceNegotiatingAdornmentTag {
	pub fn new(width: f64, text_height: f64) -> Self {
		Self {
			width,
			baseline: text_height,
			text_height,
			..Self::default()
		}
	}

	pub fn with_affinity(mut self, affinity: PositionAffinity) -> Self {
		self.affinity = affinity;
		self
	}
}

impl fmt::Debug for SpaceNegotiatingAdornmentTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Adornment({}x{} {:?})",
			self.width, self.text_height, self.affinity
		)
	}
}
