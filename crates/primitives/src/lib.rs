//! Core types for positional text work: spans, tracking modes and change sets.

/// Edit validation errors.
pub mod edit;
/// Rope utilities and extensions.
pub mod rope;
/// Half-open character spans.
pub mod span;
/// Span tracking policies for edits at span boundaries.
pub mod tracking;
/// Retain/delete/insert change sets.
pub mod transaction;

pub use edit::EditError;
pub use rope::{line_break_len, visible_line_count};
pub use ropey::{Rope, RopeSlice};
pub use span::{CharIdx, CharLen, Span};
pub use tracking::SpanTrackingMode;
pub use transaction::{Bias, Change, ChangeSet};
