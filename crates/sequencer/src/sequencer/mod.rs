//! The text and adornment sequencer.
//!
//! A [`Sequencer`] turns a span of a view's top buffer into the ordered run of
//! elements line layout consumes, and re-announces tag changes from its
//! aggregator as [`Sequencer::sequence_changed`] so layout can invalidate the
//! affected lines.
//!
//! # Lifecycle
//!
//! ```text
//!   new() ──► Attached ──view closed / detach()──► Detached
//!                                                     │
//!                                      detach() again: no-op
//! ```
//!
//! While attached the sequencer listens to the view's close notification and
//! the aggregator's tag changes. Detaching unsubscribes from both and disposes
//! the aggregator; it happens once, however many times it is requested.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use strata_primitives::SpanTrackingMode;
use strata_text::{
	BufferGraph, Event, MappingSpan, SnapshotLine, SnapshotSpan, SpaceNegotiatingAdornmentTag,
	SubscriptionId, TagAggregator, TagSpan, TagsChangedArgs, TextBuffer, TextSnapshot, TextView,
};
use tracing::{debug, trace, warn};

use crate::collection::{Elements, SequenceCollection};
use crate::element::{SequenceElement, TextElement};
use crate::error::SequencerError;
use crate::options::SequencerOptions;
use crate::provider;

/// The aggregator type a sequencer consumes.
pub type AdornmentTagAggregator = dyn TagAggregator<SpaceNegotiatingAdornmentTag>;

/// Whether a sequencer is still connected to its view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
	Attached,
	Detached,
}

/// Payload of [`Sequencer::sequence_changed`]: the span whose sequence may
/// differ, exactly as the tag aggregator reported it.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceChangedArgs {
	pub span: MappingSpan,
}

pub(crate) struct SequencerInner {
	view: TextView,
	options: SequencerOptions,
	aggregator: RefCell<Option<Box<AdornmentTagAggregator>>>,
	state: Cell<LifecycleState>,
	closed_subscription: Cell<Option<SubscriptionId>>,
	tags_subscription: Cell<Option<SubscriptionId>>,
	sequence_changed: Event<SequenceChangedArgs>,
}

/// Shared handle to a view's sequencer.
#[derive(Clone)]
pub struct Sequencer {
	inner: Rc<SequencerInner>,
}

impl Sequencer {
	/// Creates a sequencer for `view` with default options, taking ownership
	/// of `aggregator`.
	pub fn new(view: TextView, aggregator: impl TagAggregator<SpaceNegotiatingAdornmentTag> + 'static) -> Self {
		Self::with_options(view, aggregator, SequencerOptions::default())
	}

	/// Creates a sequencer for `view`, taking ownership of `aggregator`.
	///
	/// A view that is already closed yields a sequencer that starts detached,
	/// with the aggregator disposed.
	pub fn with_options(
		view: TextView,
		aggregator: impl TagAggregator<SpaceNegotiatingAdornmentTag> + 'static,
		options: SequencerOptions,
	) -> Self {
		let aggregator: Box<AdornmentTagAggregator> = Box::new(aggregator);

		let inner = Rc::new_cyclic(|weak: &Weak<SequencerInner>| {
			let w = weak.clone();
			let tags_subscription = aggregator.tags_changed().subscribe(move |args: &TagsChangedArgs| {
				if let Some(inner) = w.upgrade() {
					inner.forward_tags_changed(args);
				}
			});

			let w = weak.clone();
			let closed_subscription = view.closed().subscribe(move |_| {
				if let Some(inner) = w.upgrade() {
					inner.detach();
				}
			});

			SequencerInner {
				view: view.clone(),
				options,
				aggregator: RefCell::new(Some(aggregator)),
				state: Cell::new(LifecycleState::Attached),
				closed_subscription: Cell::new(Some(closed_subscription)),
				tags_subscription: Cell::new(Some(tags_subscription)),
				sequence_changed: Event::new(),
			}
		});

		debug!(view = view.id().0, "sequencer attached");
		if view.is_closed() {
			inner.detach();
		}
		Self { inner }
	}

	pub(crate) fn from_inner(inner: Rc<SequencerInner>) -> Self {
		Self { inner }
	}

	pub(crate) fn is_inner(&self, inner: &SequencerInner) -> bool {
		std::ptr::eq(Rc::as_ptr(&self.inner), inner)
	}

	pub fn view(&self) -> &TextView {
		&self.inner.view
	}

	pub fn options(&self) -> SequencerOptions {
		self.inner.options
	}

	pub fn buffer_graph(&self) -> &BufferGraph {
		self.inner.view.buffer_graph()
	}

	/// The buffer holding the content being sequenced: the view's edit buffer.
	pub fn source_buffer(&self) -> &TextBuffer {
		self.inner.source_buffer()
	}

	/// The buffer requests are expressed in: the view's visual buffer.
	pub fn top_buffer(&self) -> &TextBuffer {
		self.inner.top_buffer()
	}

	pub fn state(&self) -> LifecycleState {
		self.inner.state.get()
	}

	pub fn is_attached(&self) -> bool {
		self.inner.state.get() == LifecycleState::Attached
	}

	/// Raised, synchronously and once per aggregator notification, when tags
	/// change over some span.
	pub fn sequence_changed(&self) -> &Event<SequenceChangedArgs> {
		&self.inner.sequence_changed
	}

	/// Sequences a whole line of the top buffer, line break included.
	pub fn create_collection_for_line(
		&self,
		top_line: &SnapshotLine,
		source_snapshot: &TextSnapshot,
	) -> Result<SequenceCollection, SequencerError> {
		self.create_collection(&top_line.extent_including_line_break(), source_snapshot)
	}

	/// Sequences `top_span`, which must be expressed in a snapshot of the top
	/// buffer. `source_snapshot` must be a snapshot of the source buffer.
	pub fn create_collection(
		&self,
		top_span: &SnapshotSpan,
		source_snapshot: &TextSnapshot,
	) -> Result<SequenceCollection, SequencerError> {
		let inner = &self.inner;
		if inner.state.get() == LifecycleState::Detached {
			return Err(SequencerError::Detached);
		}

		let top = inner.top_buffer();
		let source = inner.source_buffer();
		if top_span.buffer_id() != top.id() {
			return Err(SequencerError::WrongTopBuffer {
				expected: top.id(),
				actual: top_span.buffer_id(),
			});
		}
		if source_snapshot.buffer_id() != source.id() {
			return Err(SequencerError::WrongSourceBuffer {
				expected: source.id(),
				actual: source_snapshot.buffer_id(),
			});
		}
		if source != top {
			warn!(source = %source.id(), top = %top.id(), "projection sequencing requested");
			return Err(SequencerError::UnsupportedProjection {
				source_buffer: source.id(),
				top_buffer: top.id(),
			});
		}

		let tags = {
			let aggregator = inner.aggregator.borrow();
			match aggregator.as_ref() {
				Some(aggregator) => aggregator.tags(top_span),
				None => return Err(SequencerError::Detached),
			}
		};
		// The view may have closed while the aggregator ran.
		if inner.state.get() == LifecycleState::Detached {
			inner.release_aggregator();
			return Err(SequencerError::Detached);
		}

		let elements = assemble(self.buffer_graph(), top_span, &tags, inner.options.text_tracking)?;
		trace!(span = %top_span, elements = elements.len(), "sequence built");
		Ok(SequenceCollection::new(
			Rc::downgrade(inner),
			top_span.clone(),
			elements,
		))
	}

	/// Detaches from the view and disposes the tag aggregator. Calling it
	/// again does nothing.
	pub fn detach(&self) {
		self.inner.detach();
	}
}

impl SequencerInner {
	fn source_buffer(&self) -> &TextBuffer {
		&self.view.model().edit_buffer
	}

	fn top_buffer(&self) -> &TextBuffer {
		&self.view.model().visual_buffer
	}

	fn forward_tags_changed(&self, args: &TagsChangedArgs) {
		if self.state.get() == LifecycleState::Detached {
			return;
		}
		trace!(span = %args.span.anchor(), "tags changed");
		self.sequence_changed.emit(&SequenceChangedArgs {
			span: args.span.clone(),
		});
	}

	pub(crate) fn detach(&self) {
		if self.state.replace(LifecycleState::Detached) == LifecycleState::Detached {
			trace!(view = self.view.id().0, "sequencer already detached");
			return;
		}

		if let Some(id) = self.closed_subscription.take() {
			self.view.closed().unsubscribe(id);
		}

		self.release_aggregator();
		provider::unregister(&self.view, self);
		debug!(view = self.view.id().0, "sequencer detached");
	}

	/// Unsubscribes from and disposes the aggregator, unless a tag query is
	/// still running on it. `create_collection` finishes the release once the
	/// query returns.
	fn release_aggregator(&self) {
		let Ok(mut slot) = self.aggregator.try_borrow_mut() else {
			trace!(view = self.view.id().0, "aggregator busy, release deferred");
			return;
		};
		let Some(mut aggregator) = slot.take() else {
			return;
		};
		drop(slot);

		if let Some(id) = self.tags_subscription.take() {
			aggregator.tags_changed().unsubscribe(id);
		}
		aggregator.dispose();
	}
}

/// Splits `top_span` into elements around the adornment `tags` intersecting it.
fn assemble(
	graph: &BufferGraph,
	top_span: &SnapshotSpan,
	tags: &[TagSpan<SpaceNegotiatingAdornmentTag>],
	tracking: SpanTrackingMode,
) -> Result<Elements, SequencerError> {
	if let Some(first) = tags.first() {
		// Splicing text around adornments needs space negotiation with line
		// layout, which does not exist yet. Dropping the tags would lay out
		// text where the adornment belongs.
		warn!(span = %top_span, count = tags.len(), "adornment tags in sequenced span");
		let first = first
			.span
			.span_in_snapshot(top_span.snapshot())
			.map_or_else(|| first.span.anchor().span(), |span| span.span());
		return Err(SequencerError::AdornmentsNotImplemented {
			count: tags.len(),
			first,
		});
	}

	let mut elements = Elements::new();
	elements.push(SequenceElement::Text(TextElement::new(
		graph.create_mapping_span(top_span.clone(), tracking),
	)));
	Ok(elements)
}

impl fmt::Debug for Sequencer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Sequencer")
			.field("view", &self.inner.view.id())
			.field("state", &self.inner.state.get())
			.field("options", &self.inner.options)
			.finish()
	}
}
