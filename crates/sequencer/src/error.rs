use strata_primitives::Span;
use strata_text::BufferId;
use thiserror::Error;

/// Why a sequencer request failed.
///
/// The variants fall in three groups: misuse by the caller
/// ([`is_precondition_violation`](Self::is_precondition_violation)),
/// configurations the sequencer knowingly does not handle, and use after the
/// owning view closed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
	/// The requested span is not expressed in the top buffer.
	#[error("span belongs to {actual}, expected the top buffer {expected}")]
	WrongTopBuffer { expected: BufferId, actual: BufferId },
	/// The source snapshot is not a snapshot of the source buffer.
	#[error("snapshot belongs to {actual}, expected the source buffer {expected}")]
	WrongSourceBuffer { expected: BufferId, actual: BufferId },
	/// The view's visual buffer is a projection of a different edit buffer.
	#[error("sequencing {top_buffer} as a projection of {source_buffer} is not supported")]
	UnsupportedProjection {
		source_buffer: BufferId,
		top_buffer: BufferId,
	},
	/// Adornment tags intersect the requested span. `first` is the first tag's
	/// span in the snapshot the request was made against.
	#[error("adornment sequencing is not implemented ({count} tag(s), first at {first})")]
	AdornmentsNotImplemented { count: usize, first: Span },
	/// The sequencer's view has closed.
	#[error("sequencer is detached from its view")]
	Detached,
}

impl SequencerError {
	/// True for errors caused by passing the wrong buffer or snapshot.
	pub fn is_precondition_violation(&self) -> bool {
		matches!(self, Self::WrongTopBuffer { .. } | Self::WrongSourceBuffer { .. })
	}
}
