//! End-to-end sequencing through a view: buffer edits, tag changes and view
//! lifetime.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use strata_primitives::{Span, SpanTrackingMode};
use strata_sequencer::{
	SequenceChangedArgs, SequenceElementKind, Sequencer, SequencerError, SequencerOptions, sequencer_for_view,
};
use strata_text::{SpaceNegotiatingAdornmentTag, TagStore, TextBuffer, TextView, TextViewModel};

type Store = TagStore<SpaceNegotiatingAdornmentTag>;

struct Editor {
	buffer: TextBuffer,
	view: TextView,
	store: Store,
	sequencer: Sequencer,
}

fn editor_with(text: &str, options: SequencerOptions) -> Editor {
	let _ = tracing_subscriber::fmt::try_init();
	let buffer = TextBuffer::new(text);
	let view = TextView::new(TextViewModel::single(buffer.clone()));
	let store = Store::new(view.buffer_graph().clone());
	let sequencer = Sequencer::with_options(view.clone(), store.clone(), options);
	Editor {
		buffer,
		view,
		store,
		sequencer,
	}
}

#[fixture]
fn editor() -> Editor {
	editor_with("fn main() {\n\tprintln!(\"hi\");\n}\n", SequencerOptions::default())
}

fn line_texts(editor: &Editor, line: usize) -> Vec<String> {
	let snapshot = editor.buffer.current_snapshot();
	let line = snapshot.line(line).unwrap();
	editor
		.sequencer
		.create_collection_for_line(&line, &snapshot)
		.unwrap()
		.iter()
		.map(|element| element.span_in(&editor.buffer).unwrap().text())
		.collect()
}

#[rstest]
#[case::first(0, "fn main() {\n")]
#[case::indented(1, "\tprintln!(\"hi\");\n")]
#[case::closing(2, "}\n")]
#[case::trailing_empty(3, "")]
fn each_line_is_one_text_element(editor: Editor, #[case] line: usize, #[case] expected: &str) {
	assert_eq!(line_texts(&editor, line), vec![expected.to_string()]);
}

#[rstest]
#[case::crlf("a\r\nb", 0, Span::new(0, 3))]
#[case::cr("a\rb", 0, Span::new(0, 2))]
#[case::no_break("a\r\nb", 1, Span::new(3, 4))]
#[case::empty_buffer("", 0, Span::new(0, 0))]
fn line_spans_include_line_break(#[case] text: &str, #[case] line: usize, #[case] expected: Span) {
	let editor = editor_with(text, SequencerOptions::default());
	let snapshot = editor.buffer.current_snapshot();
	let line = snapshot.line(line).unwrap();
	let collection = editor.sequencer.create_collection_for_line(&line, &snapshot).unwrap();

	assert_eq!(collection.len(), 1);
	assert_eq!(collection.span().span(), expected);
	assert_eq!(collection.elements()[0].span_in(&editor.buffer).unwrap().span(), expected);
}

#[rstest]
#[case::exclusive(SpanTrackingMode::EdgeExclusive, "fn main() {\n")]
#[case::inclusive(SpanTrackingMode::EdgeInclusive, "fn main() {\n// added\n")]
#[case::positive(SpanTrackingMode::EdgePositive, "fn main() {\n// added\n")]
#[case::negative(SpanTrackingMode::EdgeNegative, "fn main() {\n")]
fn elements_follow_edits_at_the_right_edge(#[case] mode: SpanTrackingMode, #[case] expected: &str) {
	let editor = editor_with(
		"fn main() {\n}\n",
		SequencerOptions::default().with_text_tracking(mode),
	);
	let snapshot = editor.buffer.current_snapshot();
	let collection = editor
		.sequencer
		.create_collection_for_line(&snapshot.line(0).unwrap(), &snapshot)
		.unwrap();

	editor.buffer.insert(12, "// added\n").unwrap();
	let element = &collection.elements()[0];
	assert_eq!(element.span_in(&editor.buffer).unwrap().text(), expected);
	// The collection still describes the snapshot it was built against.
	assert_eq!(element.span_in_snapshot(&snapshot).unwrap().text(), "fn main() {\n");
}

#[rstest]
fn edits_inside_an_element_grow_it(editor: Editor) {
	let snapshot = editor.buffer.current_snapshot();
	let collection = editor
		.sequencer
		.create_collection_for_line(&snapshot.line(0).unwrap(), &snapshot)
		.unwrap();

	editor.buffer.replace(Span::new(3, 7), "entry").unwrap();
	assert_eq!(
		collection.elements()[0].span_in(&editor.buffer).unwrap().text(),
		"fn entry() {\n"
	);
}

#[rstest]
fn adornments_are_rejected_until_removed(editor: Editor) {
	let snapshot = editor.buffer.current_snapshot();
	let adorned = snapshot.span(Span::new(13, 21)).unwrap();
	editor
		.store
		.insert(adorned.clone(), SpaceNegotiatingAdornmentTag::new(12.0, 16.0));

	assert_eq!(line_texts(&editor, 0), vec!["fn main() {\n".to_string()]);

	let line = snapshot.line(1).unwrap();
	let err = editor.sequencer.create_collection_for_line(&line, &snapshot).unwrap_err();
	assert!(matches!(err, SequencerError::AdornmentsNotImplemented { count: 1, .. }));
	assert!(err.to_string().contains("not implemented"));

	assert_eq!(editor.store.remove_intersecting(&adorned), 1);
	assert_eq!(line_texts(&editor, 1), vec!["\tprintln!(\"hi\");\n".to_string()]);
}

#[rstest]
fn tag_changes_become_sequence_changes(editor: Editor) {
	let seen: Rc<RefCell<Vec<Span>>> = Rc::default();
	let s = Rc::clone(&seen);
	editor
		.sequencer
		.sequence_changed()
		.subscribe(move |args: &SequenceChangedArgs| s.borrow_mut().push(args.span.anchor().span()));

	let snapshot = editor.buffer.current_snapshot();
	let tagged = snapshot.span(Span::new(0, 2)).unwrap();
	editor.store.insert(tagged.clone(), SpaceNegotiatingAdornmentTag::new(4.0, 16.0));
	editor.store.remove_intersecting(&tagged);
	editor.store.raise_tags_changed(snapshot.span(Span::new(5, 9)).unwrap());

	assert_eq!(
		*seen.borrow(),
		vec![Span::new(0, 2), Span::new(0, 2), Span::new(5, 9)]
	);
}

#[rstest]
fn closing_the_view_ends_the_sequencer(editor: Editor) {
	let notified = Rc::new(RefCell::new(0));
	let n = Rc::clone(&notified);
	editor.sequencer.sequence_changed().subscribe(move |_| *n.borrow_mut() += 1);

	editor.view.close();
	assert!(!editor.sequencer.is_attached());
	assert!(editor.store.is_disposed());

	let snapshot = editor.buffer.current_snapshot();
	editor.store.raise_tags_changed(snapshot.full_span());
	assert_eq!(*notified.borrow(), 0);

	let line = snapshot.line(0).unwrap();
	assert_eq!(
		editor.sequencer.create_collection_for_line(&line, &snapshot),
		Err(SequencerError::Detached)
	);

	editor.sequencer.detach();
	editor.view.close();
	assert!(!editor.sequencer.is_attached());
}

#[test]
fn view_owns_its_sequencer() {
	let buffer = TextBuffer::new("text\n");
	let view = TextView::new(TextViewModel::single(buffer.clone()));

	let sequencer = sequencer_for_view(&view, |view| Store::new(view.buffer_graph().clone()));
	let again = sequencer_for_view(&view, |_| -> Store { unreachable!("sequencer already registered") });
	let snapshot = buffer.current_snapshot();
	let line = snapshot.line(0).unwrap();
	assert_eq!(
		sequencer.create_collection_for_line(&line, &snapshot),
		again.create_collection_for_line(&line, &snapshot)
	);

	drop((sequencer, again));
	let registered = view.property::<Sequencer>().unwrap();
	assert!(registered.is_attached());

	view.close();
	assert!(!registered.is_attached());
	assert!(view.property::<Sequencer>().is_none());
}

#[test]
fn closed_view_gets_a_detached_sequencer() {
	let view = TextView::new(TextViewModel::single(TextBuffer::new("text\n")));
	view.close();

	let store = Store::new(view.buffer_graph().clone());
	let sequencer = sequencer_for_view(&view, |_| store.clone());
	assert!(!sequencer.is_attached());
	assert!(store.is_disposed());
	assert!(view.property::<Sequencer>().is_none());
}

#[test]
fn collections_from_repeated_requests_are_equal() {
	let editor = editor_with("same\nlines\n", SequencerOptions::default());
	let snapshot = editor.buffer.current_snapshot();
	let line = snapshot.line(1).unwrap();
	let first = editor.sequencer.create_collection_for_line(&line, &snapshot).unwrap();
	let second = editor.sequencer.create_collection_for_line(&line, &snapshot).unwrap();

	assert_eq!(first, second);
	assert_eq!(first.elements()[0].kind(), SequenceElementKind::Text);
	assert!(first.elements()[0].should_render_text());
}
