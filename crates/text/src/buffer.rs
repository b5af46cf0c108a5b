//! Text buffers and their version chain.
//!
//! A [`TextBuffer`] is the mutable owner of some text. Every successful edit
//! replaces its current [`TextSnapshot`] with a new one whose version number
//! is one higher. Versions are forward-linked: each records the [`ChangeSet`]
//! that produced its successor, so a span taken against any snapshot can be
//! translated into any other snapshot of the same buffer, in either direction.

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use strata_primitives::{Change, ChangeSet, EditError, Rope, Span};
use tracing::trace;

use crate::snapshot::TextSnapshot;

/// Counter for generating unique buffer IDs.
static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u64);

impl BufferId {
	/// Generates a new unique buffer ID.
	pub fn next() -> Self {
		Self(NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for BufferId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "buffer#{}", self.0)
	}
}

/// One node of a buffer's version chain.
pub(crate) struct TextVersion {
	number: u64,
	next: OnceCell<VersionLink>,
}

/// The edit leading from a version to its successor.
pub(crate) struct VersionLink {
	pub(crate) changes: ChangeSet,
	pub(crate) version: Rc<TextVersion>,
}

impl TextVersion {
	fn initial() -> Rc<Self> {
		Rc::new(Self {
			number: 0,
			next: OnceCell::new(),
		})
	}

	pub(crate) fn number(&self) -> u64 {
		self.number
	}

	pub(crate) fn next(&self) -> Option<&VersionLink> {
		self.next.get()
	}
}

struct BufferState {
	rope: Rope,
	version: Rc<TextVersion>,
}

struct BufferInner {
	id: BufferId,
	state: RefCell<BufferState>,
}

/// Shared handle to a mutable text buffer.
///
/// Cloning the handle does not copy the text; all clones observe the same
/// edits. Equality is buffer identity.
#[derive(Clone)]
pub struct TextBuffer {
	inner: Rc<BufferInner>,
}

impl TextBuffer {
	/// Creates a buffer holding `text` at version 0.
	pub fn new(text: &str) -> Self {
		Self {
			inner: Rc::new(BufferInner {
				id: BufferId::next(),
				state: RefCell::new(BufferState {
					rope: Rope::from_str(text),
					version: TextVersion::initial(),
				}),
			}),
		}
	}

	pub fn id(&self) -> BufferId {
		self.inner.id
	}

	/// Returns the snapshot of the buffer as it is now.
	pub fn current_snapshot(&self) -> TextSnapshot {
		let state = self.inner.state.borrow();
		TextSnapshot::new(self.inner.id, state.rope.clone(), Rc::clone(&state.version))
	}

	/// Applies a batch of sorted, non-overlapping changes as one edit.
	///
	/// Returns the resulting snapshot. A batch that changes nothing returns
	/// the current snapshot without creating a new version.
	pub fn apply(&self, changes: impl IntoIterator<Item = Change>) -> Result<TextSnapshot, EditError> {
		{
			let mut state = self.inner.state.borrow_mut();
			let changes = ChangeSet::from_changes(state.rope.len_chars(), changes)?;
			if !changes.is_identity() {
				let mut rope = state.rope.clone();
				changes.apply(&mut rope);

				let version = Rc::new(TextVersion {
					number: state.version.number + 1,
					next: OnceCell::new(),
				});
				let linked = state
					.version
					.next
					.set(VersionLink {
						changes,
						version: Rc::clone(&version),
					})
					.is_ok();
				debug_assert!(linked, "only the newest version is ever extended");

				trace!(buffer = %self.inner.id, version = version.number, len = rope.len_chars(), "buffer edited");
				state.rope = rope;
				state.version = version;
			}
		}
		Ok(self.current_snapshot())
	}

	/// Inserts `text` at `at`.
	pub fn insert(&self, at: usize, text: &str) -> Result<TextSnapshot, EditError> {
		self.apply([Change::insert(at, text)])
	}

	/// Deletes the characters covered by `span`.
	pub fn delete(&self, span: Span) -> Result<TextSnapshot, EditError> {
		self.apply([Change::delete(span)])
	}

	/// Replaces the characters covered by `span` with `text`.
	pub fn replace(&self, span: Span, text: &str) -> Result<TextSnapshot, EditError> {
		self.apply([Change::replace(span, text)])
	}
}

impl PartialEq for TextBuffer {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl Eq for TextBuffer {}

impl fmt::Debug for TextBuffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.inner.state.borrow();
		f.debug_struct("TextBuffer")
			.field("id", &self.inner.id)
			.field("version", &state.version.number)
			.field("len", &state.rope.len_chars())
			.finish()
	}
}
