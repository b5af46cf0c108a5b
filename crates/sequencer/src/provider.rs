//! One sequencer per view.
//!
//! The view's property bag owns the registered sequencer. That keeps the
//! sequencer alive for as long as the view is open without any other owner;
//! the entry is removed when the sequencer detaches.

use std::rc::Rc;

use strata_text::{SpaceNegotiatingAdornmentTag, TagAggregator, TextView};

use crate::sequencer::{Sequencer, SequencerInner};

/// Returns the sequencer registered on `view`, creating and registering one
/// with an aggregator from `make_aggregator` on first use.
///
/// A closed view gets a detached sequencer that is not registered.
pub fn sequencer_for_view<A>(view: &TextView, make_aggregator: impl FnOnce(&TextView) -> A) -> Sequencer
where
	A: TagAggregator<SpaceNegotiatingAdornmentTag> + 'static,
{
	if let Some(existing) = view.property::<Sequencer>() {
		return Sequencer::clone(&existing);
	}

	let sequencer = Sequencer::new(view.clone(), make_aggregator(view));
	if sequencer.is_attached() {
		view.set_property(Rc::new(sequencer.clone()));
	}
	sequencer
}

/// Removes `inner`'s sequencer from the view's property bag, if it is the one
/// registered there.
pub(crate) fn unregister(view: &TextView, inner: &SequencerInner) {
	let registered = view
		.property::<Sequencer>()
		.is_some_and(|sequencer| sequencer.is_inner(inner));
	if registered {
		view.remove_property::<Sequencer>();
	}
}
