//! Text substrate: buffers, immutable snapshots and the collaborators a
//! layout pipeline consumes.
//!
//! # Model
//!
//! ```text
//! TextBuffer ──edit──► TextSnapshot (v0) ─► TextSnapshot (v1) ─► ...
//!                          │ ChangeSet linking each version to the next
//!                          ▼
//! SnapshotSpan ──BufferGraph──► MappingSpan ──span_in(buffer)──► SnapshotSpan
//! ```
//!
//! Everything here is single-threaded: handles are `Rc`-based and events are
//! delivered synchronously on the caller's stack.

pub mod buffer;
pub mod event;
pub mod graph;
pub mod mapping;
pub mod snapshot;
pub mod tagging;
pub mod view;

pub use buffer::{BufferId, TextBuffer};
pub use event::{Event, SubscriptionId};
pub use graph::BufferGraph;
pub use mapping::MappingSpan;
pub use snapshot::{SnapshotLine, SnapshotSpan, TextSnapshot};
pub use strata_primitives::{Change, EditError, Span, SpanTrackingMode};
pub use tagging::{
	PositionAffinity, SpaceNegotiatingAdornmentTag, TagAggregator, TagSpan, TagStore,
	TagsChangedArgs,
};
pub use view::{TextView, TextViewModel, ViewClosed, ViewId};
