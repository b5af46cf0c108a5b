//! Text views: the presentation of one or two buffers, with a close
//! notification and a property bag for per-view components.

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::buffer::TextBuffer;
use crate::event::Event;
use crate::graph::BufferGraph;

/// Counter for generating unique view IDs.
static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a text view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

impl ViewId {
	/// Generates a new unique view ID.
	pub fn next() -> Self {
		Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
	}
}

/// The buffers a view is built over.
///
/// The edit buffer holds the content users edit; the visual buffer is what
/// the view lays out. They are the same buffer unless the view presents a
/// projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextViewModel {
	pub edit_buffer: TextBuffer,
	pub visual_buffer: TextBuffer,
}

impl TextViewModel {
	/// A model presenting `buffer` directly.
	pub fn single(buffer: TextBuffer) -> Self {
		Self {
			edit_buffer: buffer.clone(),
			visual_buffer: buffer,
		}
	}

	/// A model whose visual buffer differs from its edit buffer.
	pub fn layered(edit_buffer: TextBuffer, visual_buffer: TextBuffer) -> Self {
		Self {
			edit_buffer,
			visual_buffer,
		}
	}

	pub fn is_projection(&self) -> bool {
		self.edit_buffer != self.visual_buffer
	}
}

/// Payload of [`TextView::closed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewClosed {
	pub view: ViewId,
}

struct ViewInner {
	id: ViewId,
	model: TextViewModel,
	graph: BufferGraph,
	closed: Event<ViewClosed>,
	is_closed: Cell<bool>,
	properties: RefCell<HashMap<TypeId, Rc<dyn Any>>>,
}

/// Shared handle to a text view.
///
/// Closing is a one-way transition: [`TextView::close`] raises
/// [`TextView::closed`] once and drops every closed handler.
#[derive(Clone)]
pub struct TextView {
	inner: Rc<ViewInner>,
}

impl TextView {
	pub fn new(model: TextViewModel) -> Self {
		let graph = BufferGraph::new(model.visual_buffer.clone(), [model.edit_buffer.clone()]);
		Self {
			inner: Rc::new(ViewInner {
				id: ViewId::next(),
				model,
				graph,
				closed: Event::new(),
				is_closed: Cell::new(false),
				properties: RefCell::new(HashMap::new()),
			}),
		}
	}

	pub fn id(&self) -> ViewId {
		self.inner.id
	}

	pub fn model(&self) -> &TextViewModel {
		&self.inner.model
	}

	pub fn buffer_graph(&self) -> &BufferGraph {
		&self.inner.graph
	}

	/// Raised once, when the view closes.
	pub fn closed(&self) -> &Event<ViewClosed> {
		&self.inner.closed
	}

	pub fn is_closed(&self) -> bool {
		self.inner.is_closed.get()
	}

	/// Closes the view. Repeated calls do nothing.
	pub fn close(&self) {
		if self.inner.is_closed.replace(true) {
			return;
		}
		debug!(view = self.inner.id.0, "text view closed");
		self.inner.closed.emit(&ViewClosed { view: self.inner.id });
		self.inner.closed.clear();
	}

	/// Returns the property of type `T`, if one is set.
	pub fn property<T: Any>(&self) -> Option<Rc<T>> {
		let value = self.inner.properties.borrow().get(&TypeId::of::<T>()).cloned()?;
		value.downcast::<T>().ok()
	}

	pub fn has_property<T: Any>(&self) -> bool {
		self.inner.properties.borrow().contains_key(&TypeId::of::<T>())
	}

	/// Stores `value` as the view's property of type `T`, returning the
	/// previous one.
	pub fn set_property<T: Any>(&self, value: Rc<T>) -> Option<Rc<T>> {
		let previous = self.inner.properties.borrow_mut().insert(TypeId::of::<T>(), value)?;
		previous.downcast::<T>().ok()
	}

	/// Removes the property of type `T`. Returns false if none was set.
	pub fn remove_property<T: Any>(&self) -> bool {
		let removed = self.inner.properties.borrow_mut().remove(&TypeId::of::<T>());
		removed.is_some()
	}
}

impl PartialEq for TextView {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl Eq for TextView {}

impl fmt::Debug for TextView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TextView")
			.field("id", &self.inner.id)
			.field("model", &self.inner.model)
			.field("closed", &self.inner.is_closed.get())
			.finish()
	}
}
