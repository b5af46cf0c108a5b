use thiserror::Error;

use crate::span::CharIdx;

/// Reasons a set of changes cannot be applied to a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
	/// A change ends before it starts.
	#[error("inverted change {start}..{end}")]
	Inverted { start: CharIdx, end: CharIdx },
	/// A change extends past the end of the document.
	#[error("change {start}..{end} exceeds document length {len}")]
	OutOfBounds {
		start: CharIdx,
		end: CharIdx,
		len: usize,
	},
	/// Changes are not sorted, or two changes overlap.
	#[error("change at {start} overlaps the previous change ending at {previous_end}")]
	Overlapping {
		start: CharIdx,
		previous_end: CharIdx,
	},
}
