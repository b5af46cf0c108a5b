use super::types::{Bias, Change, Operation};
use crate::edit::EditError;
use crate::span::{CharIdx, CharLen, Span};
use crate::tracking::SpanTrackingMode;
use crate::Rope;

/// A sequence of operations representing one edit of a document.
///
/// The operations cover the whole source document: the retained and deleted
/// lengths always sum to [`ChangeSet::len`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
	/// Sequence of retain/delete/insert operations.
	changes: Vec<Operation>,
	/// Length of the source document before changes.
	len: usize,
	/// Length of the document after applying changes.
	len_after: usize,
}

impl ChangeSet {
	/// Creates a changeset that leaves a document of `len` characters untouched.
	pub fn identity(len: CharLen) -> Self {
		let mut cs = Self::default();
		cs.retain(len);
		cs
	}

	/// Builds a changeset from sorted, non-overlapping changes against a
	/// document of `len` characters.
	///
	/// Several insertions at the same position are applied in the order given.
	pub fn from_changes(
		len: CharLen,
		changes: impl IntoIterator<Item = Change>,
	) -> Result<Self, EditError> {
		let mut cs = Self::default();
		let mut pos = 0;

		for change in changes {
			let Change {
				start,
				end,
				replacement,
			} = change;
			if end < start {
				return Err(EditError::Inverted { start, end });
			}
			if end > len {
				return Err(EditError::OutOfBounds { start, end, len });
			}
			if start < pos {
				return Err(EditError::Overlapping {
					start,
					previous_end: pos,
				});
			}

			cs.retain(start - pos);
			cs.insert(replacement);
			cs.delete(end - start);
			pos = end;
		}

		cs.retain(len - pos);
		Ok(cs)
	}

	/// Returns the length of the source document (before changes).
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns the length of the document after applying changes.
	pub fn len_after(&self) -> usize {
		self.len_after
	}

	/// Returns true if applying this changeset leaves the document unchanged.
	pub fn is_identity(&self) -> bool {
		self.changes
			.iter()
			.all(|op| matches!(op, Operation::Retain(_)))
	}

	/// Returns a slice of all operations in this changeset.
	pub fn operations(&self) -> &[Operation] {
		&self.changes
	}

	/// Consecutive retains are merged.
	fn retain(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;
		self.len_after += n;

		if let Some(Operation::Retain(count)) = self.changes.last_mut() {
			*count += n;
		} else {
			self.changes.push(Operation::Retain(n));
		}
	}

	/// Consecutive deletes are merged.
	fn delete(&mut self, n: CharLen) {
		if n == 0 {
			return;
		}

		self.len += n;

		if let Some(Operation::Delete(count)) = self.changes.last_mut() {
			*count += n;
		} else {
			self.changes.push(Operation::Delete(n));
		}
	}

	/// Directly adjacent inserts are merged.
	fn insert(&mut self, text: String) {
		if text.is_empty() {
			return;
		}

		let n = text.chars().count();
		self.len_after += n;

		if let Some(Operation::Insert(prev, count)) = self.changes.last_mut() {
			prev.push_str(&text);
			*count += n;
		} else {
			self.changes.push(Operation::Insert(text, n));
		}
	}

	/// Applies this changeset to a document, modifying it in place.
	pub fn apply(&self, doc: &mut Rope) {
		debug_assert_eq!(doc.len_chars(), self.len);

		let mut pos = 0;
		for op in &self.changes {
			match op {
				Operation::Retain(n) => {
					pos += n;
				}
				Operation::Delete(n) => {
					doc.remove(pos..pos + n);
				}
				Operation::Insert(text, n) => {
					doc.insert(pos, text);
					pos += n;
				}
			}
		}
	}

	/// Maps a position through this changeset using the specified bias.
	///
	/// Positions inside a deleted region collapse to the point where the
	/// deletion happened.
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		let mut old_pos = 0;
		let mut new_pos = 0;

		for op in &self.changes {
			match op {
				Operation::Retain(n) => {
					if old_pos + n > pos {
						return new_pos + (pos - old_pos);
					}
					old_pos += n;
					new_pos += n;
				}
				Operation::Delete(n) => {
					if old_pos + n > pos {
						return new_pos;
					}
					old_pos += n;
				}
				Operation::Insert(_, n) => {
					if old_pos == pos && bias == Bias::Left {
						// Position is exactly at insert point, stay before
					} else {
						new_pos += n;
					}
				}
			}
		}

		new_pos + (pos - old_pos)
	}

	/// Maps a position in the changed document back into the source document.
	///
	/// Positions inside inserted text collapse to the point of insertion. At
	/// a deletion point, `Bias::Left` stays before the restored text and
	/// `Bias::Right` moves after it.
	pub fn map_pos_back(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		let mut old_pos = 0;
		let mut new_pos = 0;

		for op in &self.changes {
			match op {
				Operation::Retain(n) => {
					if new_pos + n > pos {
						return old_pos + (pos - new_pos);
					}
					old_pos += n;
					new_pos += n;
				}
				Operation::Insert(_, n) => {
					if new_pos + n > pos {
						return old_pos;
					}
					new_pos += n;
				}
				Operation::Delete(n) => {
					if new_pos != pos || bias == Bias::Right {
						old_pos += n;
					}
				}
			}
		}

		old_pos + (pos - new_pos)
	}

	/// Maps a span through this changeset according to `mode`.
	///
	/// The end never precedes the start: a span whose content was deleted
	/// collapses to an empty span.
	pub fn map_span(&self, span: Span, mode: SpanTrackingMode) -> Span {
		let start = self.map_pos(span.start, mode.start_bias());
		let end = self.map_pos(span.end, mode.end_bias());
		Span {
			start,
			end: end.max(start),
		}
	}

	/// Maps a span from the changed document back into the source document.
	pub fn map_span_back(&self, span: Span, mode: SpanTrackingMode) -> Span {
		let start = self.map_pos_back(span.start, mode.start_bias());
		let end = self.map_pos_back(span.end, mode.end_bias());
		Span {
			start,
			end: end.max(start),
		}
	}
}
