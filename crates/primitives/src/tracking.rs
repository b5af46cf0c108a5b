use crate::transaction::Bias;

/// How a span reacts to edits made exactly at its boundaries.
///
/// Edits strictly inside a span always grow or shrink it, and edits strictly
/// outside only shift it; the mode decides insertions that land on the start
/// or end offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SpanTrackingMode {
	/// Insertions at either edge stay outside the span.
	#[default]
	EdgeExclusive,
	/// Insertions at either edge become part of the span.
	EdgeInclusive,
	/// Both edges move right past insertions.
	EdgePositive,
	/// Both edges stay left of insertions.
	EdgeNegative,
}

impl SpanTrackingMode {
	/// Bias applied to the start of a span.
	pub fn start_bias(self) -> Bias {
		match self {
			Self::EdgeExclusive | Self::EdgePositive => Bias::Right,
			Self::EdgeInclusive | Self::EdgeNegative => Bias::Left,
		}
	}

	/// Bias applied to the end of a span.
	pub fn end_bias(self) -> Bias {
		match self {
			Self::EdgeExclusive | Self::EdgeNegative => Bias::Left,
			Self::EdgeInclusive | Self::EdgePositive => Bias::Right,
		}
	}
}
