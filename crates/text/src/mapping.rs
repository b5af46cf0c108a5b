use strata_primitives::SpanTrackingMode;

use crate::buffer::TextBuffer;
use crate::graph::BufferGraph;
use crate::snapshot::{SnapshotSpan, TextSnapshot};

/// A span that can be re-resolved against any buffer of its graph.
///
/// The anchor is the span as it was taken. Resolving maps it through every
/// edit between the anchor's snapshot and the target, backward if the target
/// is older, using the tracking mode for edits at its edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSpan {
	anchor: SnapshotSpan,
	mode: SpanTrackingMode,
	graph: BufferGraph,
}

impl MappingSpan {
	pub fn new(anchor: SnapshotSpan, mode: SpanTrackingMode, graph: BufferGraph) -> Self {
		Self {
			anchor,
			mode,
			graph,
		}
	}

	/// The span exactly as it was taken.
	pub fn anchor(&self) -> &SnapshotSpan {
		&self.anchor
	}

	pub fn tracking_mode(&self) -> SpanTrackingMode {
		self.mode
	}

	pub fn graph(&self) -> &BufferGraph {
		&self.graph
	}

	/// Resolves the span against `buffer`'s current snapshot.
	///
	/// `None` if the buffer is unrelated to the anchor in the graph.
	pub fn span_in(&self, buffer: &TextBuffer) -> Option<SnapshotSpan> {
		self.graph.map_span_to_buffer(&self.anchor, buffer, self.mode)
	}

	/// Resolves the span against a specific snapshot.
	pub fn span_in_snapshot(&self, snapshot: &TextSnapshot) -> Option<SnapshotSpan> {
		self.graph.map_span_to_snapshot(&self.anchor, snapshot, self.mode)
	}
}
