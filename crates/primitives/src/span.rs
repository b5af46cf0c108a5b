use std::fmt;
use std::ops::Range;

/// A position in the text, measured in characters (not bytes).
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;

/// A half-open character interval `[start, end)`.
///
/// Unlike a selection, a span has no direction: `start <= end` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
	/// First character covered by the span.
	pub start: CharIdx,
	/// One past the last character covered by the span.
	pub end: CharIdx,
}

impl Span {
	/// Creates a span, ordering the endpoints if they were given backwards.
	pub fn new(start: CharIdx, end: CharIdx) -> Self {
		if end < start {
			Self { start: end, end: start }
		} else {
			Self { start, end }
		}
	}

	/// Creates an empty span at `pos`.
	pub fn point(pos: CharIdx) -> Self {
		Self { start: pos, end: pos }
	}

	#[inline]
	pub fn len(&self) -> CharLen {
		self.end - self.start
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if `pos` lies in `[start, end)`.
	#[inline]
	pub fn contains(&self, pos: CharIdx) -> bool {
		pos >= self.start && pos < self.end
	}

	/// Returns true if the spans share at least one character.
	pub fn overlaps(&self, other: &Span) -> bool {
		self.start < other.end && other.start < self.end
	}

	/// Returns true if the spans overlap, or if one is empty and sits inside
	/// the other's closed extent.
	///
	/// Two non-empty spans that merely touch do not intersect.
	pub fn intersects(&self, other: &Span) -> bool {
		if self.is_empty() {
			return self.start >= other.start && self.start <= other.end;
		}
		if other.is_empty() {
			return other.start >= self.start && other.start <= self.end;
		}
		self.overlaps(other)
	}

	/// Returns the overlapping part of two spans, if they intersect.
	pub fn intersection(&self, other: &Span) -> Option<Span> {
		if !self.intersects(other) {
			return None;
		}
		Some(Span {
			start: self.start.max(other.start),
			end: self.end.min(other.end),
		})
	}

	/// Returns the span as a `Range` suitable for slicing a rope.
	#[inline]
	pub fn as_range(&self) -> Range<CharIdx> {
		self.start..self.end
	}
}

impl From<Range<CharIdx>> for Span {
	fn from(range: Range<CharIdx>) -> Self {
		Self::new(range.start, range.end)
	}
}

impl fmt::Display for Span {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}..{})", self.start, self.end)
	}
}
