//! The ordered result of one sequencing request.

use std::rc::Weak;

use smallvec::SmallVec;
use strata_primitives::CharIdx;
use strata_text::{SnapshotSpan, TextSnapshot};

use crate::element::SequenceElement;
use crate::sequencer::{Sequencer, SequencerInner};

pub(crate) type Elements = SmallVec<[SequenceElement; 1]>;

/// Elements covering exactly one requested span, left to right.
///
/// Projected into the top buffer's snapshot, consecutive elements touch
/// without overlapping and together span the request. A collection is a
/// point-in-time result: it holds only a weak reference to the sequencer that
/// built it and stays readable after that sequencer detaches or is dropped.
#[derive(Debug, Clone)]
pub struct SequenceCollection {
	owner: Weak<SequencerInner>,
	span: SnapshotSpan,
	elements: Elements,
}

impl SequenceCollection {
	pub(crate) fn new(owner: Weak<SequencerInner>, span: SnapshotSpan, elements: Elements) -> Self {
		let collection = Self {
			owner,
			span,
			elements,
		};
		debug_assert!(collection.is_normalized(), "sequence elements must tile the requested span");
		collection
	}

	/// The sequencer that built this collection, while it is still alive.
	pub fn sequencer(&self) -> Option<Sequencer> {
		self.owner.upgrade().map(Sequencer::from_inner)
	}

	/// The requested span, in the top buffer snapshot it was requested against.
	pub fn span(&self) -> &SnapshotSpan {
		&self.span
	}

	pub fn elements(&self) -> &[SequenceElement] {
		&self.elements
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&SequenceElement> {
		self.elements.get(index)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, SequenceElement> {
		self.elements.iter()
	}

	/// Elements whose span, projected into `span`'s snapshot, intersects it.
	pub fn elements_intersecting<'a>(
		&'a self,
		span: &'a SnapshotSpan,
	) -> impl Iterator<Item = &'a SequenceElement> + 'a {
		self.elements.iter().filter(move |element| {
			element
				.span_in_snapshot(span.snapshot())
				.is_some_and(|projected| projected.span().intersects(&span.span()))
		})
	}

	/// The element covering `pos` in `snapshot`.
	///
	/// An empty element (the sequence of an empty line) covers its own position.
	pub fn element_at(&self, snapshot: &TextSnapshot, pos: CharIdx) -> Option<&SequenceElement> {
		self.elements.iter().find(|element| {
			element.span_in_snapshot(snapshot).is_some_and(|projected| {
				let span = projected.span();
				span.contains(pos) || (span.is_empty() && span.start == pos)
			})
		})
	}

	/// Checks the tiling invariant against the snapshot the request used.
	pub(crate) fn is_normalized(&self) -> bool {
		let snapshot = self.span.snapshot();
		let mut expected_start = self.span.start();
		for element in &self.elements {
			let Some(projected) = element.span_in_snapshot(snapshot) else {
				return false;
			};
			if projected.start() != expected_start {
				return false;
			}
			if projected.is_empty() && !self.span.is_empty() {
				return false;
			}
			expected_start = projected.end();
		}
		expected_start == self.span.end()
	}
}

impl PartialEq for SequenceCollection {
	fn eq(&self, other: &Self) -> bool {
		self.span == other.span && self.elements == other.elements
	}
}

impl<'a> IntoIterator for &'a SequenceCollection {
	type Item = &'a SequenceElement;
	type IntoIter = std::slice::Iter<'a, SequenceElement>;

	fn into_iter(self) -> Self::IntoIter {
		self.elements.iter()
	}
}
