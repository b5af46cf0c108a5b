//! The renderable units of a sequence.

use strata_text::{MappingSpan, SnapshotSpan, SpaceNegotiatingAdornmentTag, TextBuffer, TextSnapshot};

/// Discriminates [`SequenceElement`] variants without borrowing their data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceElementKind {
	Text,
	Adornment,
}

/// A run of text laid out as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
	span: MappingSpan,
}

impl TextElement {
	pub fn new(span: MappingSpan) -> Self {
		Self { span }
	}

	pub fn span(&self) -> &MappingSpan {
		&self.span
	}
}

/// Space reserved for an adornment in place of the text it covers.
///
/// The sequencer never produces these yet; the type fixes the shape layout
/// code will receive.
#[derive(Debug, Clone, PartialEq)]
pub struct AdornmentElement {
	span: MappingSpan,
	tag: SpaceNegotiatingAdornmentTag,
}

impl AdornmentElement {
	pub fn new(span: MappingSpan, tag: SpaceNegotiatingAdornmentTag) -> Self {
		Self { span, tag }
	}

	pub fn span(&self) -> &MappingSpan {
		&self.span
	}

	pub fn tag(&self) -> &SpaceNegotiatingAdornmentTag {
		&self.tag
	}
}

/// One element of a [`SequenceCollection`](crate::SequenceCollection).
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceElement {
	Text(TextElement),
	Adornment(AdornmentElement),
}

impl SequenceElement {
	pub fn kind(&self) -> SequenceElementKind {
		match self {
			Self::Text(_) => SequenceElementKind::Text,
			Self::Adornment(_) => SequenceElementKind::Adornment,
		}
	}

	/// The span the element occupies, re-projectable into other buffers.
	pub fn mapping_span(&self) -> &MappingSpan {
		match self {
			Self::Text(text) => text.span(),
			Self::Adornment(adornment) => adornment.span(),
		}
	}

	/// Whether layout should draw the text under this element.
	pub fn should_render_text(&self) -> bool {
		matches!(self, Self::Text(_))
	}

	/// The element's span in `buffer`'s current snapshot, or `None` if the
	/// buffer is unrelated in the buffer graph.
	pub fn span_in(&self, buffer: &TextBuffer) -> Option<SnapshotSpan> {
		self.mapping_span().span_in(buffer)
	}

	/// The element's span in a specific snapshot.
	pub fn span_in_snapshot(&self, snapshot: &TextSnapshot) -> Option<SnapshotSpan> {
		self.mapping_span().span_in_snapshot(snapshot)
	}
}
