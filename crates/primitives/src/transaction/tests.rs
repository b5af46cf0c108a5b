use proptest::prelude::*;

use super::{Bias, Change, ChangeSet, Operation};
use crate::{EditError, Rope, Span, SpanTrackingMode};

fn apply_to(text: &str, changes: Vec<Change>) -> String {
	let mut doc = Rope::from(text);
	let cs = ChangeSet::from_changes(doc.len_chars(), changes).unwrap();
	cs.apply(&mut doc);
	doc.to_string()
}

#[test]
fn test_identity() {
	let cs = ChangeSet::identity(5);
	assert!(cs.is_identity());
	assert_eq!(cs.len(), 5);
	assert_eq!(cs.len_after(), 5);
	assert_eq!(cs.map_pos(3, Bias::Left), 3);
}

#[test]
fn test_insert() {
	assert_eq!(apply_to("hello world", vec![Change::insert(5, ",")]), "hello, world");
}

#[test]
fn test_delete() {
	assert_eq!(apply_to("hello world", vec![Change::delete(Span::new(5, 6))]), "helloworld");
}

#[test]
fn test_replace_and_insert_after() {
	let changes = vec![
		Change::replace(Span::new(0, 5), "hi"),
		Change::insert(5, "!"),
	];
	assert_eq!(apply_to("hello world", changes), "hi! world");
}

#[test]
fn test_multiple_inserts_same_point_keep_order() {
	let changes = vec![Change::insert(2, "a"), Change::insert(2, "b")];
	assert_eq!(apply_to("xyz", changes), "xyabz");
}

#[test]
fn test_operations_are_merged() {
	let cs = ChangeSet::from_changes(4, vec![Change::insert(2, "a"), Change::insert(2, "b")]).unwrap();
	assert_eq!(
		cs.operations(),
		&[
			Operation::Retain(2),
			Operation::Insert("ab".into(), 2),
			Operation::Retain(2),
		]
	);
}

#[test]
fn test_rejects_out_of_bounds() {
	let err = ChangeSet::from_changes(3, vec![Change::delete(Span::new(2, 5))]).unwrap_err();
	assert_eq!(err, EditError::OutOfBounds { start: 2, end: 5, len: 3 });
}

#[test]
fn test_rejects_overlapping() {
	let changes = vec![Change::delete(Span::new(0, 3)), Change::delete(Span::new(2, 4))];
	let err = ChangeSet::from_changes(5, changes).unwrap_err();
	assert_eq!(err, EditError::Overlapping { start: 2, previous_end: 3 });
}

#[test]
fn test_rejects_inverted() {
	let change = Change {
		start: 3,
		end: 1,
		replacement: String::new(),
	};
	let err = ChangeSet::from_changes(5, vec![change]).unwrap_err();
	assert_eq!(err, EditError::Inverted { start: 3, end: 1 });
}

#[test]
fn test_map_pos_bias_at_insert() {
	let cs = ChangeSet::from_changes(10, vec![Change::insert(5, "abc")]).unwrap();
	assert_eq!(cs.map_pos(5, Bias::Left), 5);
	assert_eq!(cs.map_pos(5, Bias::Right), 8);
	assert_eq!(cs.map_pos(4, Bias::Right), 4);
	assert_eq!(cs.map_pos(6, Bias::Left), 9);
}

#[test]
fn test_map_pos_inside_deletion() {
	let cs = ChangeSet::from_changes(10, vec![Change::delete(Span::new(2, 6))]).unwrap();
	assert_eq!(cs.map_pos(4, Bias::Left), 2);
	assert_eq!(cs.map_pos(6, Bias::Left), 2);
	assert_eq!(cs.map_pos(8, Bias::Left), 4);
}

#[test]
fn test_map_span_edge_exclusive_right_edge() {
	let cs = ChangeSet::from_changes(11, vec![Change::insert(5, "XX")]).unwrap();
	let mapped = cs.map_span(Span::new(0, 5), SpanTrackingMode::EdgeExclusive);
	assert_eq!(mapped, Span::new(0, 5));
}

#[test]
fn test_map_span_edge_exclusive_left_edge() {
	let cs = ChangeSet::from_changes(11, vec![Change::insert(2, "XX")]).unwrap();
	let mapped = cs.map_span(Span::new(2, 5), SpanTrackingMode::EdgeExclusive);
	assert_eq!(mapped, Span::new(4, 7));
}

#[test]
fn test_map_span_edge_inclusive_grows() {
	let cs = ChangeSet::from_changes(11, vec![Change::insert(2, "X"), Change::insert(5, "Y")]).unwrap();
	let mapped = cs.map_span(Span::new(2, 5), SpanTrackingMode::EdgeInclusive);
	assert_eq!(mapped, Span::new(2, 7));
}

#[test]
fn test_map_span_edge_positive_and_negative() {
	let cs = ChangeSet::from_changes(11, vec![Change::insert(5, "XX")]).unwrap();
	assert_eq!(cs.map_span(Span::new(0, 5), SpanTrackingMode::EdgePositive), Span::new(0, 7));
	assert_eq!(cs.map_span(Span::new(5, 8), SpanTrackingMode::EdgeNegative), Span::new(5, 10));
}

#[test]
fn test_map_span_deleted_collapses() {
	let cs = ChangeSet::from_changes(10, vec![Change::replace(Span::new(1, 9), "ab")]).unwrap();
	let mapped = cs.map_span(Span::new(3, 5), SpanTrackingMode::EdgeExclusive);
	assert!(mapped.is_empty());
}

#[test]
fn test_map_back_through_insert() {
	let cs = ChangeSet::from_changes(6, vec![Change::insert(0, "X")]).unwrap();
	assert_eq!(cs.map_span_back(Span::new(2, 4), SpanTrackingMode::EdgeExclusive), Span::new(1, 3));
	assert_eq!(cs.map_pos_back(0, Bias::Right), 0);
	assert_eq!(cs.map_pos_back(7, Bias::Left), 6);
}

#[test]
fn test_map_back_inserted_text_collapses() {
	let cs = ChangeSet::from_changes(5, vec![Change::insert(5, "XYZ")]).unwrap();
	assert_eq!(cs.map_span_back(Span::new(5, 8), SpanTrackingMode::EdgeExclusive), Span::point(5));
}

#[test]
fn test_map_back_at_deletion_point_uses_bias() {
	let cs = ChangeSet::from_changes(6, vec![Change::delete(Span::new(2, 4))]).unwrap();
	assert_eq!(cs.map_pos_back(2, Bias::Left), 2);
	assert_eq!(cs.map_pos_back(2, Bias::Right), 4);
	assert_eq!(cs.map_pos_back(3, Bias::Left), 5);
}

fn arb_doc_and_change() -> impl Strategy<Value = (String, usize, usize, String)> {
	"[a-z\n]{0,40}".prop_flat_map(|doc| {
		let len = doc.chars().count();
		(Just(doc), 0..=len, 0..=len, "[a-z]{0,5}")
	})
}

proptest! {
	#[test]
	fn prop_apply_matches_string_splice((doc, a, b, text) in arb_doc_and_change()) {
		let span = Span::new(a, b);
		let mut expected: Vec<char> = doc.chars().collect();
		expected.splice(span.as_range(), text.chars());
		let expected: String = expected.into_iter().collect();
		prop_assert_eq!(apply_to(&doc, vec![Change::replace(span, text.clone())]), expected);
	}

	#[test]
	fn prop_edge_exclusive_never_grows_at_edges((doc, a, b, text) in arb_doc_and_change()) {
		let span = Span::new(a, b);
		let len = doc.chars().count();
		for at in [span.start, span.end] {
			let cs = ChangeSet::from_changes(len, vec![Change::insert(at, text.clone())]).unwrap();
			let mapped = cs.map_span(span, SpanTrackingMode::EdgeExclusive);
			prop_assert_eq!(mapped.len(), span.len());
		}
	}

	#[test]
	fn prop_mapped_positions_stay_in_bounds((doc, a, b, text) in arb_doc_and_change()) {
		let len = doc.chars().count();
		let cs = ChangeSet::from_changes(len, vec![Change::replace(Span::new(a, b), text)]).unwrap();
		for pos in 0..=len {
			prop_assert!(cs.map_pos(pos, Bias::Left) <= cs.len_after());
			prop_assert!(cs.map_pos(pos, Bias::Right) <= cs.len_after());
		}
	}

	#[test]
	fn prop_untouched_positions_map_back((doc, a, b, text) in arb_doc_and_change()) {
		let len = doc.chars().count();
		let span = Span::new(a, b);
		let cs = ChangeSet::from_changes(len, vec![Change::replace(span, text)]).unwrap();
		for pos in (0..span.start).chain(span.end + 1..=len) {
			let forward = cs.map_pos(pos, Bias::Right);
			prop_assert_eq!(cs.map_pos_back(forward, Bias::Right), pos);
		}
		for pos in 0..=cs.len_after() {
			prop_assert!(cs.map_pos_back(pos, Bias::Left) <= len);
			prop_assert!(cs.map_pos_back(pos, Bias::Right) <= len);
		}
	}
}
