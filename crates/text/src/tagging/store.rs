use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use strata_primitives::SpanTrackingMode;
use tracing::trace;

use super::{TagAggregator, TagSpan, TagsChangedArgs};
use crate::event::Event;
use crate::graph::BufferGraph;
use crate::snapshot::SnapshotSpan;

struct StoreInner<T> {
	graph: BufferGraph,
	tags: RefCell<Vec<TagSpan<T>>>,
	tags_changed: Event<TagsChangedArgs>,
	disposed: Cell<bool>,
}

/// In-memory [`TagAggregator`].
///
/// Clones share the same tags, so a host can keep a handle for editing tags
/// after handing another to the component that consumes them. Tags track
/// buffer edits edge-exclusively.
pub struct TagStore<T> {
	inner: Rc<StoreInner<T>>,
}

impl<T> Clone for TagStore<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: Clone> TagStore<T> {
	pub fn new(graph: BufferGraph) -> Self {
		Self {
			inner: Rc::new(StoreInner {
				graph,
				tags: RefCell::new(Vec::new()),
				tags_changed: Event::new(),
				disposed: Cell::new(false),
			}),
		}
	}

	pub fn len(&self) -> usize {
		self.inner.tags.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.tags.borrow().is_empty()
	}

	pub fn is_disposed(&self) -> bool {
		self.inner.disposed.get()
	}

	/// Adds a tag over `span` and announces the change for that span.
	///
	/// Ignored once the store is disposed.
	pub fn insert(&self, span: SnapshotSpan, tag: T) {
		if self.is_disposed() {
			trace!(span = %span, "tag insert after dispose ignored");
			return;
		}

		let span = self
			.inner
			.graph
			.create_mapping_span(span, SpanTrackingMode::EdgeExclusive);
		self.inner.tags.borrow_mut().push(TagSpan {
			span: span.clone(),
			tag,
		});
		self.inner.tags_changed.emit(&TagsChangedArgs { span });
	}

	/// Removes every tag intersecting `span`, announcing one change for the
	/// span if anything was removed. Returns the number of tags removed.
	pub fn remove_intersecting(&self, span: &SnapshotSpan) -> usize {
		let removed = {
			let mut tags = self.inner.tags.borrow_mut();
			let before = tags.len();
			tags.retain(|tag| !intersects(tag, span));
			before - tags.len()
		};

		if removed > 0 {
			self.raise_tags_changed(span.clone());
		}
		removed
	}

	/// Announces that tags over `span` changed without altering the store.
	pub fn raise_tags_changed(&self, span: SnapshotSpan) {
		if self.is_disposed() {
			return;
		}
		let span = self
			.inner
			.graph
			.create_mapping_span(span, SpanTrackingMode::EdgeExclusive);
		self.inner.tags_changed.emit(&TagsChangedArgs { span });
	}
}

fn intersects<T>(tag: &TagSpan<T>, span: &SnapshotSpan) -> bool {
	tag.span
		.span_in_snapshot(span.snapshot())
		.is_some_and(|resolved| resolved.span().intersects(&span.span()))
}

impl<T: Clone> TagAggregator<T> for TagStore<T> {
	fn tags(&self, span: &SnapshotSpan) -> Vec<TagSpan<T>> {
		let mut found: Vec<(usize, TagSpan<T>)> = self
			.inner
			.tags
			.borrow()
			.iter()
			.filter_map(|tag| {
				let resolved = tag.span.span_in_snapshot(span.snapshot())?;
				resolved
					.span()
					.intersects(&span.span())
					.then(|| (resolved.start(), tag.clone()))
			})
			.collect();
		found.sort_by_key(|(start, _)| *start);
		found.into_iter().map(|(_, tag)| tag).collect()
	}

	fn tags_changed(&self) -> &Event<TagsChangedArgs> {
		&self.inner.tags_changed
	}

	fn dispose(&mut self) {
		if self.inner.disposed.replace(true) {
			return;
		}
		self.inner.tags.borrow_mut().clear();
		self.inner.tags_changed.clear();
	}
}

impl<T> fmt::Debug for TagStore<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TagStore")
			.field("tags", &self.inner.tags.borrow().len())
			.field("disposed", &self.inner.disposed.get())
			.finish()
	}
}
