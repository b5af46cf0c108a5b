use crate::span::{CharIdx, CharLen, Span};

/// Replaces the text range `[start, end)` with `replacement`.
///
/// An empty replacement is a deletion; an empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
	/// The starting character index of the change.
	pub start: CharIdx,
	/// The ending character index of the change (exclusive).
	pub end: CharIdx,
	/// The replacement text.
	pub replacement: String,
}

impl Change {
	/// Inserts `text` at `at`.
	pub fn insert(at: CharIdx, text: impl Into<String>) -> Self {
		Self {
			start: at,
			end: at,
			replacement: text.into(),
		}
	}

	/// Deletes the characters covered by `span`.
	pub fn delete(span: Span) -> Self {
		Self {
			start: span.start,
			end: span.end,
			replacement: String::new(),
		}
	}

	/// Replaces the characters covered by `span` with `text`.
	pub fn replace(span: Span, text: impl Into<String>) -> Self {
		Self {
			start: span.start,
			end: span.end,
			replacement: text.into(),
		}
	}
}

/// Bias determines how positions at change boundaries are mapped.
///
/// When mapping a position through a change, bias determines whether the position
/// moves with insertions or stays before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// Position stays before insertions at the same location.
	Left,
	/// Position moves after insertions at the same location.
	Right,
}

/// A single operation in a changeset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	/// Retain the next N characters from the source document.
	Retain(CharLen),
	/// Delete the next N characters from the source document.
	Delete(CharLen),
	/// Insert new text at the current position. The second field caches the
	/// character count of the text.
	Insert(String, CharLen),
}
