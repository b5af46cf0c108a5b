//! Immutable, versioned views of a buffer's content.

use std::fmt;
use std::rc::Rc;

use strata_primitives::{
	ChangeSet, CharIdx, CharLen, Rope, RopeSlice, Span, SpanTrackingMode, line_break_len, visible_line_count,
};

use crate::buffer::{BufferId, TextVersion};

/// The content of one buffer at one version.
///
/// Snapshots never change. Cloning is cheap: the rope is shared.
#[derive(Clone)]
pub struct TextSnapshot {
	buffer: BufferId,
	rope: Rope,
	version: Rc<TextVersion>,
}

impl TextSnapshot {
	pub(crate) fn new(buffer: BufferId, rope: Rope, version: Rc<TextVersion>) -> Self {
		Self {
			buffer,
			rope,
			version,
		}
	}

	/// The buffer this snapshot was taken from.
	pub fn buffer_id(&self) -> BufferId {
		self.buffer
	}

	/// Version number, starting at zero and increasing by one per edit.
	pub fn version(&self) -> u64 {
		self.version.number()
	}

	/// Length in characters.
	pub fn len(&self) -> CharLen {
		self.rope.len_chars()
	}

	pub fn is_empty(&self) -> bool {
		self.rope.len_chars() == 0
	}

	pub fn text(&self) -> String {
		self.rope.to_string()
	}

	/// Borrows the text covered by `span`, or `None` if it exceeds the snapshot.
	pub fn slice(&self, span: Span) -> Option<RopeSlice<'_>> {
		(span.end <= self.len()).then(|| self.rope.slice(span.as_range()))
	}

	/// Returns the text covered by `span`, or `None` if it exceeds the snapshot.
	pub fn text_in(&self, span: Span) -> Option<String> {
		self.slice(span).map(|slice| slice.to_string())
	}

	/// Binds `span` to this snapshot, or `None` if it exceeds the snapshot.
	pub fn span(&self, span: Span) -> Option<SnapshotSpan> {
		(span.end <= self.len()).then(|| SnapshotSpan {
			snapshot: self.clone(),
			span,
		})
	}

	/// The span covering the whole snapshot.
	pub fn full_span(&self) -> SnapshotSpan {
		SnapshotSpan {
			snapshot: self.clone(),
			span: Span::new(0, self.len()),
		}
	}

	/// Number of lines, including the empty line after a trailing line break.
	pub fn line_count(&self) -> usize {
		visible_line_count(self.rope.slice(..))
	}

	/// Returns line `line_number` (zero-based).
	pub fn line(&self, line_number: usize) -> Option<SnapshotLine> {
		if line_number >= self.rope.len_lines() {
			return None;
		}

		let start = self.rope.line_to_char(line_number);
		let line = self.rope.line(line_number);
		let len_with_break = line.len_chars();
		let break_len = line_break_len(line);
		Some(SnapshotLine {
			snapshot: self.clone(),
			line_number,
			start,
			end: start + len_with_break - break_len,
			line_break_len: break_len,
		})
	}

	/// Returns the line containing `pos`. The end of the snapshot belongs to
	/// the last line.
	pub fn line_from_position(&self, pos: CharIdx) -> Option<SnapshotLine> {
		if pos > self.len() {
			return None;
		}
		self.line(self.rope.char_to_line(pos))
	}

	/// Iterates over every line of the snapshot.
	pub fn lines(&self) -> impl Iterator<Item = SnapshotLine> + '_ {
		(0..self.line_count()).filter_map(|n| self.line(n))
	}

	/// Translates `span`, expressed against this snapshot, into `target`.
	///
	/// Runs along the version chain in either direction: forward through each
	/// edit, or backward through each edit inverted when `target` is older.
	/// Returns `None` when `target` belongs to another buffer.
	pub fn translate_to(&self, span: Span, target: &TextSnapshot, mode: SpanTrackingMode) -> Option<Span> {
		if self.buffer != target.buffer {
			return None;
		}

		if target.version() >= self.version() {
			let changes = changes_between(&self.version, target.version())?;
			Some(changes.into_iter().fold(span, |span, cs| cs.map_span(span, mode)))
		} else {
			let changes = changes_between(&target.version, self.version())?;
			Some(changes.into_iter().rev().fold(span, |span, cs| cs.map_span_back(span, mode)))
		}
	}
}

/// Change sets leading from `from` up to version `to`, oldest first.
fn changes_between(from: &TextVersion, to: u64) -> Option<Vec<&ChangeSet>> {
	let mut changes = Vec::new();
	let mut version = from;
	while version.number() < to {
		let link = version.next()?;
		changes.push(&link.changes);
		version = &*link.version;
	}
	Some(changes)
}

impl PartialEq for TextSnapshot {
	fn eq(&self, other: &Self) -> bool {
		self.buffer == other.buffer && self.version() == other.version()
	}
}

impl Eq for TextSnapshot {}

impl fmt::Debug for TextSnapshot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TextSnapshot")
			.field("buffer", &self.buffer)
			.field("version", &self.version())
			.field("len", &self.len())
			.finish()
	}
}

/// A span bound to the snapshot whose coordinates it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSpan {
	snapshot: TextSnapshot,
	span: Span,
}

impl SnapshotSpan {
	pub fn snapshot(&self) -> &TextSnapshot {
		&self.snapshot
	}

	pub fn span(&self) -> Span {
		self.span
	}

	pub fn start(&self) -> CharIdx {
		self.span.start
	}

	pub fn end(&self) -> CharIdx {
		self.span.end
	}

	pub fn len(&self) -> CharLen {
		self.span.len()
	}

	pub fn is_empty(&self) -> bool {
		self.span.is_empty()
	}

	pub fn buffer_id(&self) -> BufferId {
		self.snapshot.buffer_id()
	}

	/// The covered text.
	pub fn text(&self) -> String {
		self.snapshot.rope.slice(self.span.as_range()).to_string()
	}

	/// Translates this span into `target`, older or newer, under `mode`.
	pub fn translate_to(&self, target: &TextSnapshot, mode: SpanTrackingMode) -> Option<SnapshotSpan> {
		let span = self.snapshot.translate_to(self.span, target, mode)?;
		Some(SnapshotSpan {
			snapshot: target.clone(),
			span,
		})
	}
}

impl fmt::Display for SnapshotSpan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}@v{}{}", self.snapshot.buffer, self.snapshot.version(), self.span)
	}
}

/// One line of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotLine {
	snapshot: TextSnapshot,
	line_number: usize,
	start: CharIdx,
	end: CharIdx,
	line_break_len: CharLen,
}

impl SnapshotLine {
	pub fn snapshot(&self) -> &TextSnapshot {
		&self.snapshot
	}

	/// Zero-based line number.
	pub fn line_number(&self) -> usize {
		self.line_number
	}

	/// The line's content, excluding its line break.
	pub fn extent(&self) -> SnapshotSpan {
		SnapshotSpan {
			snapshot: self.snapshot.clone(),
			span: Span::new(self.start, self.end),
		}
	}

	/// The line's content followed by its line break, if any.
	pub fn extent_including_line_break(&self) -> SnapshotSpan {
		SnapshotSpan {
			snapshot: self.snapshot.clone(),
			span: Span::new(self.start, self.end + self.line_break_len),
		}
	}

	/// Length of the terminating line break: 0 on the last line, 2 for `\r\n`.
	pub fn line_break_len(&self) -> CharLen {
		self.line_break_len
	}
}
