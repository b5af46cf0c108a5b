use strata_primitives::SpanTrackingMode;

/// Per-sequencer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerOptions {
	/// Tracking mode for the mapping spans of text elements.
	pub text_tracking: SpanTrackingMode,
}

impl Default for SequencerOptions {
	fn default() -> Self {
		Self {
			text_tracking: SpanTrackingMode::EdgeExclusive,
		}
	}
}

impl SequencerOptions {
	pub fn with_text_tracking(mut self, mode: SpanTrackingMode) -> Self {
		self.text_tracking = mode;
		self
	}
}
