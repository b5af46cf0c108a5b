//! Synchronous, single-threaded publish/subscribe.
//!
//! [`Event::emit`] calls every subscribed handler on the caller's stack before
//! returning. There is no queue: one emit is one delivery per handler.
//!
//! Handlers may subscribe or unsubscribe (themselves or others) while an emit
//! is in progress. A handler unsubscribed mid-emit is not called afterwards;
//! a handler subscribed mid-emit first sees the next emit.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

/// Handle returned by [`Event::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<T> = Rc<dyn Fn(&T)>;

struct EventState<T> {
	next_id: u64,
	handlers: Vec<(SubscriptionId, Handler<T>)>,
}

pub struct Event<T> {
	state: RefCell<EventState<T>>,
}

impl<T> Default for Event<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Event<T> {
	pub fn new() -> Self {
		Self {
			state: RefCell::new(EventState {
				next_id: 0,
				handlers: Vec::new(),
			}),
		}
	}

	/// Registers `handler`, returning the id needed to remove it.
	pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> SubscriptionId {
		let handler: Handler<T> = Rc::new(handler);
		let mut state = self.state.borrow_mut();
		let id = SubscriptionId(state.next_id);
		state.next_id += 1;
		state.handlers.push((id, handler));
		id
	}

	/// Removes a handler. Returns false if it was not subscribed.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut state = self.state.borrow_mut();
		let before = state.handlers.len();
		state.handlers.retain(|(handler_id, _)| *handler_id != id);
		state.handlers.len() != before
	}

	pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
		self.state.borrow().handlers.iter().any(|(handler_id, _)| *handler_id == id)
	}

	pub fn subscriber_count(&self) -> usize {
		self.state.borrow().handlers.len()
	}

	/// Removes every handler.
	pub fn clear(&self) {
		self.state.borrow_mut().handlers.clear();
	}

	/// Delivers `args` to every handler subscribed when the emit starts.
	pub fn emit(&self, args: &T) {
		let handlers: SmallVec<[(SubscriptionId, Handler<T>); 4]> =
			self.state.borrow().handlers.iter().cloned().collect();

		for (id, handler) in handlers {
			if self.is_subscribed(id) {
				handler(args);
			}
		}
	}
}

impl<T> fmt::Debug for Event<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Event")
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}
