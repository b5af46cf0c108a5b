//! The set of buffers a view presents, rooted at its top buffer.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;
use strata_primitives::SpanTrackingMode;

use crate::buffer::{BufferId, TextBuffer};
use crate::mapping::MappingSpan;
use crate::snapshot::{SnapshotSpan, TextSnapshot};

struct GraphInner {
	top: TextBuffer,
	buffers: SmallVec<[TextBuffer; 2]>,
}

/// Buffers reachable from a top buffer.
///
/// Spans resolve only against the buffer they were taken from. Projection
/// buffers that splice several sources together are not modelled, so a span
/// asked for in any other buffer of the graph resolves to `None`, the same as
/// for a buffer outside the graph.
#[derive(Clone)]
pub struct BufferGraph {
	inner: Rc<GraphInner>,
}

impl BufferGraph {
	/// Creates a graph containing `top` and every buffer in `sources`.
	pub fn new(top: TextBuffer, sources: impl IntoIterator<Item = TextBuffer>) -> Self {
		let mut buffers: SmallVec<[TextBuffer; 2]> = SmallVec::new();
		buffers.push(top.clone());
		for buffer in sources {
			if !buffers.contains(&buffer) {
				buffers.push(buffer);
			}
		}
		Self {
			inner: Rc::new(GraphInner { top, buffers }),
		}
	}

	pub fn top_buffer(&self) -> &TextBuffer {
		&self.inner.top
	}

	pub fn buffers(&self) -> impl Iterator<Item = &TextBuffer> {
		self.inner.buffers.iter()
	}

	pub fn contains(&self, id: BufferId) -> bool {
		self.inner.buffers.iter().any(|b| b.id() == id)
	}

	/// Resolves `span` against `target`'s current snapshot.
	pub fn map_span_to_buffer(
		&self,
		span: &SnapshotSpan,
		target: &TextBuffer,
		mode: SpanTrackingMode,
	) -> Option<SnapshotSpan> {
		self.map_span_to_snapshot(span, &target.current_snapshot(), mode)
	}

	/// Resolves `span` against a specific snapshot.
	pub fn map_span_to_snapshot(
		&self,
		span: &SnapshotSpan,
		target: &TextSnapshot,
		mode: SpanTrackingMode,
	) -> Option<SnapshotSpan> {
		if !self.contains(span.buffer_id()) || !self.contains(target.buffer_id()) {
			return None;
		}
		span.translate_to(target, mode)
	}

	/// Wraps `span` in a [`MappingSpan`] that resolves through this graph.
	pub fn create_mapping_span(&self, span: SnapshotSpan, mode: SpanTrackingMode) -> MappingSpan {
		MappingSpan::new(span, mode, self.clone())
	}
}

impl PartialEq for BufferGraph {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl Eq for BufferGraph {}

impl fmt::Debug for BufferGraph {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BufferGraph")
			.field("top", &self.inner.top.id())
			.field("buffers", &self.inner.buffers.iter().map(TextBuffer::id).collect::<Vec<_>>())
			.finish()
	}
}
