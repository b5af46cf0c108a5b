//! Text and adornment sequencing.
//!
//! Line layout asks a [`Sequencer`] for the elements making up a span of the
//! view's top buffer and receives a [`SequenceCollection`]: text runs mapped
//! back to the source buffer, interleaved with adornments, covering the span
//! without gaps or overlaps.
//!
//! ```ignore
//! let sequencer = sequencer_for_view(&view, |view| TagStore::new(view.buffer_graph().clone()));
//! let line = buffer.current_snapshot().line(0).unwrap();
//! let collection = sequencer.create_collection_for_line(&line, &buffer.current_snapshot())?;
//! for element in &collection {
//!     layout.push(element.span_in(sequencer.top_buffer()));
//! }
//! ```
//!
//! Adornments are not sequenced yet: a span intersecting any adornment tag
//! fails with [`SequencerError::AdornmentsNotImplemented`], and views whose
//! visual buffer projects a different edit buffer fail with
//! [`SequencerError::UnsupportedProjection`].

mod collection;
mod element;
mod error;
mod options;
mod provider;
mod sequencer;

pub use collection::SequenceCollection;
pub use element::{AdornmentElement, SequenceElement, SequenceElementKind, TextElement};
pub use error::SequencerError;
pub use options::SequencerOptions;
pub use provider::sequencer_for_view;
pub use sequencer::{AdornmentTagAggregator, LifecycleState, SequenceChangedArgs, Sequencer};
