//! Rope utilities and extensions.

use ropey::RopeSlice;

use crate::span::CharLen;

/// Returns the number of lines, including the empty line after a trailing newline.
#[inline]
pub fn visible_line_count(text: RopeSlice) -> usize {
	text.len_lines()
}

/// Returns the length of the line break that terminates `line`, or zero.
///
/// Recognises the same breaks ropey splits lines on: `\r\n` counts as a
/// single two-character break.
pub fn line_break_len(line: RopeSlice) -> CharLen {
	let len = line.len_chars();
	if len == 0 {
		return 0;
	}

	match line.char(len - 1) {
		'\n' if len >= 2 && line.char(len - 2) == '\r' => 2,
		'\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => 1,
		_ => 0,
	}
}
