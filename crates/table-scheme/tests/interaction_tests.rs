//! Tests for selection, row animation and batches against a simulated widget.

mod common;

use std::sync::Arc;

use common::{Call, SimulatedView, assert_in_sync, init_logging, label, sync, tap};
use parking_lot::Mutex;
use table_scheme::{
    AccordionScheme, ArrayScheme, BasicScheme, IndexPath, RadioScheme, RowAnimation, SchemeId,
    SchemeSet, SchemeSetId, TableScheme, TableView,
};

const OPTIONS: [&str; 4] = ["small", "medium", "large", "huge"];

type Items = ArrayScheme<SimulatedView, &'static str>;

fn basic(label: &'static str) -> table_scheme::BasicSchemeBuilder<SimulatedView> {
    BasicScheme::<SimulatedView>::builder()
        .reuse_identifier("basic")
        .configuration(move |row| row.lock().text = label.to_string())
}

fn items(labels: &[&'static str]) -> table_scheme::ArraySchemeBuilder<SimulatedView, &'static str> {
    Items::builder()
        .objects(labels.to_vec())
        .reuse_identifier("item")
        .configuration(|row, object| row.lock().text = object.to_string())
}

fn accordion(selected: usize) -> table_scheme::AccordionSchemeBuilder<SimulatedView> {
    AccordionScheme::<SimulatedView>::builder()
        .collapsed_reuse_identifier("choice")
        .collapsed_configuration(|row, selected| {
            row.lock().text = format!("size: {}", OPTIONS[selected]);
        })
        .options("option", OPTIONS.len())
        .configuration(|row, option| row.lock().text = OPTIONS[option].to_string())
        .selected_index(selected)
}

fn radio(selected: usize) -> table_scheme::RadioSchemeBuilder<SimulatedView> {
    RadioScheme::<SimulatedView>::builder()
        .options("option", OPTIONS.len())
        .configuration(|row, option| row.lock().text = OPTIONS[option].to_string())
        .state(|row, selected| row.lock().checked = selected)
        .selected_index(selected)
}

/// One section: a title row followed by `scheme`.
fn single<B>(scheme: B) -> (TableScheme<SimulatedView>, SchemeId, SimulatedView)
where
    B: table_scheme::SchemeBuilder<SimulatedView>,
{
    let mut set = SchemeSet::builder();
    set.add_scheme(basic("title"));
    let id = set.add_scheme(scheme).unwrap();
    let table = TableScheme::new(vec![set.build()]);
    let mut view = SimulatedView::new();
    sync(&table, &mut view);
    view.take_calls();
    (table, id, view)
}

fn checked_rows(view: &SimulatedView) -> Vec<String> {
    view.labels()
        .concat()
        .into_iter()
        .filter(|label| label.ends_with(" *"))
        .collect()
}

#[test]
fn test_accordion_round_trip() {
    init_logging();
    let (mut table, id, mut view) = single(accordion(1));
    assert_eq!(table.row_count(0), 2);
    assert_eq!(view.labels()[0], vec!["title", "size: medium"]);

    tap(&mut table, &mut view, IndexPath::new(0, 1));
    assert_in_sync(&table, &mut view);
    assert_eq!(table.row_count(0), 1 + OPTIONS.len());
    assert_eq!(
        view.labels()[0],
        vec!["title", "small", "medium", "large", "huge"]
    );
    assert!(table.scheme::<AccordionScheme<SimulatedView>>(id).is_expanded());
    let expand_calls = view.take_calls();

    tap(&mut table, &mut view, IndexPath::new(0, 2));
    assert_in_sync(&table, &mut view);
    assert_eq!(table.row_count(0), 2);
    assert_eq!(view.labels()[0], vec!["title", "size: medium"]);
    let collapse_calls = view.take_calls();

    // Collapsing onto the option that was selected removes exactly the rows
    // expanding added.
    let inserted = expand_calls.iter().find_map(|call| match call {
        Call::InsertRows(rows, RowAnimation::Fade) => Some(rows.clone()),
        _ => None,
    });
    let deleted = collapse_calls.iter().find_map(|call| match call {
        Call::DeleteRows(rows, RowAnimation::Fade) => Some(rows.clone()),
        _ => None,
    });
    assert_eq!(inserted, deleted);
    assert_eq!(
        inserted,
        Some(vec![
            IndexPath::new(0, 1),
            IndexPath::new(0, 3),
            IndexPath::new(0, 4)
        ])
    );
}

#[test]
fn test_accordion_collapses_onto_a_new_choice() {
    let (mut table, id, mut view) = single(accordion(0));

    tap(&mut table, &mut view, IndexPath::new(0, 1));
    tap(&mut table, &mut view, IndexPath::new(0, 4));
    assert_in_sync(&table, &mut view);

    let scheme = table.scheme::<AccordionScheme<SimulatedView>>(id);
    assert!(!scheme.is_expanded());
    assert_eq!(scheme.selected_index(), 3);
    assert_eq!(view.labels()[0], vec!["title", "size: huge"]);
}

#[test]
fn test_accordion_following_rows_keep_their_place() {
    let mut set = SchemeSet::builder();
    set.add_scheme(accordion(2));
    set.add_scheme(basic("footer"));
    let mut table = TableScheme::new(vec![set.build()]);
    let mut view = SimulatedView::new();
    sync(&table, &mut view);

    tap(&mut table, &mut view, IndexPath::new(0, 0));
    assert_in_sync(&table, &mut view);
    assert_eq!(view.labels()[0].last().map(String::as_str), Some("footer"));
    assert_eq!(table.row_count(0), 5);

    tap(&mut table, &mut view, IndexPath::new(0, 0));
    assert_in_sync(&table, &mut view);
    assert_eq!(view.labels()[0], vec!["size: small", "footer"]);
}

#[test]
fn test_radio_keeps_exactly_one_checked() {
    let (mut table, id, mut view) = single(radio(0));
    assert_eq!(checked_rows(&view), vec!["small *"]);

    for (row, expected) in [(3, "large *"), (4, "huge *"), (4, "huge *"), (1, "small *")] {
        tap(&mut table, &mut view, IndexPath::new(0, row));
        assert_eq!(checked_rows(&view), vec![expected]);
        assert_in_sync(&table, &mut view);
    }
    assert_eq!(
        table.scheme::<RadioScheme<SimulatedView>>(id).selected_index(),
        0
    );
}

#[test]
fn test_radio_reports_previous_and_tapped() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let (mut table, _, mut view) = single(radio(1).selection(move |_, _, previous, tapped| {
        recorder.lock().push((previous, tapped));
    }));

    tap(&mut table, &mut view, IndexPath::new(0, 3));
    tap(&mut table, &mut view, IndexPath::new(0, 3));
    assert_eq!(*seen.lock(), vec![(1, 2), (2, 2)]);
}

#[test]
fn test_explicit_row_changes() {
    let (mut table, id, mut view) = single(items(&["a", "b", "c"]));

    table.animate_changes::<Items, _>(&mut view, id, |scheme, animator| {
        let objects = scheme.objects_mut();
        objects.remove(0);
        objects.push("d");
        objects.swap(0, 1);
        animator
            .delete_row(0, RowAnimation::Left)
            .move_row(1, 1)
            .move_row(2, 0)
            .insert_row(2, RowAnimation::Right);
    });
    assert_in_sync(&table, &mut view);
    assert_eq!(view.labels()[0], vec!["title", "c", "b", "d"]);

    let calls = view.take_calls();
    assert_eq!(calls.first(), Some(&Call::Begin));
    assert_eq!(calls.last(), Some(&Call::End));
    assert!(calls.contains(&Call::DeleteRows(
        vec![IndexPath::new(0, 1)],
        RowAnimation::Left
    )));
    assert!(calls.contains(&Call::InsertRows(
        vec![IndexPath::new(0, 3)],
        RowAnimation::Right
    )));
}

#[test]
fn test_inferred_swap_is_one_move() {
    let (mut table, id, mut view) = single(items(&["a", "b", "c"]));

    table.animate_inferred::<Items, _>(&mut view, id, RowAnimation::Fade, |scheme| {
        scheme.set_objects(vec!["b", "a", "c"]);
    });
    let calls = view.take_calls();
    let moves = calls
        .iter()
        .filter(|call| matches!(call, Call::MoveRow(..)))
        .count();
    assert_eq!(moves, 1);
    assert!(
        !calls
            .iter()
            .any(|call| matches!(call, Call::InsertRows(..) | Call::DeleteRows(..)))
    );
    assert_in_sync(&table, &mut view);
    assert_eq!(view.labels()[0], vec!["title", "b", "a", "c"]);
}

#[test]
fn test_inferred_replacement_is_delete_and_insert() {
    let (mut table, id, mut view) = single(items(&["a", "b"]));

    table.animate_inferred::<Items, _>(&mut view, id, RowAnimation::Top, |scheme| {
        scheme.set_objects(vec!["a", "c"]);
    });
    assert_eq!(
        view.take_calls(),
        vec![
            Call::Begin,
            Call::InsertRows(vec![IndexPath::new(0, 2)], RowAnimation::Top),
            Call::DeleteRows(vec![IndexPath::new(0, 2)], RowAnimation::Top),
            Call::End,
        ]
    );
    assert_in_sync(&table, &mut view);
    assert_eq!(view.labels()[0], vec!["title", "a", "c"]);
}

#[test]
fn test_inferred_changes_keep_widget_in_sync() {
    let (mut table, id, mut view) = single(items(&["a", "b", "c", "d", "e"]));

    let steps: [&[&'static str]; 7] = [
        &["e", "d", "c", "b", "a"],
        &["d", "x", "e", "a"],
        &[],
        &["p", "q"],
        &["q", "r", "p", "s", "t"],
        &["t", "q", "u", "r", "p", "s"],
        &["s", "t"],
    ];
    for step in steps {
        table.animate_inferred::<Items, _>(&mut view, id, RowAnimation::Fade, |scheme| {
            scheme.set_objects(step.to_vec());
        });
        assert_in_sync(&table, &mut view);
        let mut expected = vec!["title"];
        expected.extend_from_slice(step);
        assert_eq!(view.labels()[0], expected);
    }
}

#[test]
fn test_inferred_change_while_hidden_sends_nothing() {
    let (mut table, id, mut view) = single(items(&["a", "b"]));
    table.hide_scheme(&mut view, id, RowAnimation::Fade);
    assert_in_sync(&table, &mut view);
    view.take_calls();

    table.animate_inferred::<Items, _>(&mut view, id, RowAnimation::Fade, |scheme| {
        scheme.set_objects(vec!["c", "b", "a"]);
    });
    assert!(view.take_calls().is_empty());

    table.show_scheme(&mut view, id, RowAnimation::Fade);
    assert_in_sync(&table, &mut view);
    assert_eq!(view.labels()[0], vec!["title", "c", "b", "a"]);
}

struct TwoSets {
    table: TableScheme<SimulatedView>,
    view: SimulatedView,
    top: SchemeSetId,
    bottom: SchemeSetId,
    details: SchemeId,
    list: SchemeId,
}

fn two_sets() -> TwoSets {
    let mut top = SchemeSet::builder();
    top.add_scheme(basic("name"));
    let details = top.add_hidden_scheme(items(&["street", "city"])).unwrap();
    let list = top.add_scheme(items(&["x", "y"])).unwrap();
    let top_id = top.id();

    let mut bottom = SchemeSet::builder();
    bottom.add_scheme(basic("delete account"));
    let bottom_id = bottom.id();

    let table = TableScheme::new(vec![top.build(), bottom.build()]);
    let mut view = SimulatedView::new();
    sync(&table, &mut view);
    view.take_calls();
    TwoSets {
        table,
        view,
        top: top_id,
        bottom: bottom_id,
        details,
        list,
    }
}

#[test]
fn test_batch_hide_and_reload_of_one_set() {
    let mut t = two_sets();
    let commits = Arc::new(Mutex::new(Vec::new()));
    let recorder = commits.clone();
    t.table
        .signals()
        .batch_committed
        .connect(move |applied| recorder.lock().push(*applied));

    t.table.batch_visibility_changes(&mut t.view, |batch| {
        batch
            .hide_scheme_set(t.bottom, RowAnimation::Fade)
            .reload_scheme_set(t.bottom, RowAnimation::Automatic);
    });
    assert_eq!(
        t.view.take_calls(),
        vec![
            Call::Begin,
            Call::DeleteSections(vec![1], RowAnimation::Fade),
            Call::End,
        ]
    );
    assert_eq!(*commits.lock(), vec![1]);
    assert_in_sync(&t.table, &mut t.view);
}

#[test]
fn test_batch_mixed_changes_keep_widget_in_sync() {
    let mut t = two_sets();

    t.table.batch_visibility_changes(&mut t.view, |batch| {
        batch
            .show_scheme(t.details, RowAnimation::Top)
            .reload_scheme(t.list, RowAnimation::Fade)
            .hide_scheme_set(t.bottom, RowAnimation::Bottom);
    });
    assert_in_sync(&t.table, &mut t.view);
    assert_eq!(
        t.view.labels(),
        vec![vec!["name", "street", "city", "x", "y"]]
    );

    t.table.batch_visibility_changes(&mut t.view, |batch| {
        batch
            .show_scheme_set(t.bottom, RowAnimation::Top)
            .hide_scheme(t.details, RowAnimation::Top)
            .hide_scheme_set(t.top, RowAnimation::Fade)
            .show_scheme_set(t.top, RowAnimation::Fade);
    });
    assert_in_sync(&t.table, &mut t.view);
    assert_eq!(
        t.view.labels(),
        vec![vec!["name", "x", "y"], vec!["delete account"]]
    );
}

#[test]
fn test_batch_section_change_swallows_row_changes() {
    let mut t = two_sets();

    t.table.batch_visibility_changes(&mut t.view, |batch| {
        batch
            .hide_scheme_set(t.top, RowAnimation::Fade)
            .show_scheme(t.details, RowAnimation::Fade);
    });
    let calls = t.view.take_calls();
    assert!(
        !calls
            .iter()
            .any(|call| matches!(call, Call::InsertRows(..) | Call::DeleteRows(..)))
    );
    assert_in_sync(&t.table, &mut t.view);
    assert!(!t.table.is_scheme_hidden(t.details));

    t.table.show_scheme_set(&mut t.view, t.top, RowAnimation::Fade);
    assert_in_sync(&t.table, &mut t.view);
    assert_eq!(t.view.labels()[0], vec!["name", "street", "city", "x", "y"]);
}

#[test]
fn test_visibility_signals() {
    let mut t = two_sets();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    t.table
        .signals()
        .scheme_visibility_changed
        .connect(move |(id, visible)| recorder.lock().push((*id, *visible)));

    t.table.show_scheme(&mut t.view, t.details, RowAnimation::Fade);
    t.table.show_scheme(&mut t.view, t.details, RowAnimation::Fade);
    t.table.hide_scheme(&mut t.view, t.list, RowAnimation::Fade);
    assert_eq!(*seen.lock(), vec![(t.details, true), (t.list, false)]);
    assert_in_sync(&t.table, &mut t.view);
}

#[test]
fn test_rejected_scheme_is_left_out() {
    let mut set = SchemeSet::<SimulatedView>::builder();
    set.add_scheme(basic("kept"));
    let missing_configuration = BasicScheme::<SimulatedView>::builder().reuse_identifier("basic");
    assert_eq!(set.add_scheme(missing_configuration), None);
    assert_eq!(set.add_scheme(radio(9)), None);

    let table = TableScheme::new(vec![set.build()]);
    let mut view = SimulatedView::new();
    assert_in_sync(&table, &mut view);
    assert_eq!(table.scheme_sets()[0].scheme_count(), 1);
    assert_eq!(view.labels(), vec![vec!["kept"]]);
}

#[test]
fn test_selection_of_off_screen_row() {
    let (mut table, id, mut view) = single(radio(0));
    let row = view.row_at(IndexPath::new(0, 4)).map(|row| label(&row));
    assert_eq!(row.as_deref(), Some("huge"));

    // Drop the live rows, as a widget does for rows scrolled away.
    let mut empty = SimulatedView::new();
    table.handle_selection(&mut empty, IndexPath::new(0, 4));
    assert_eq!(
        table.scheme::<RadioScheme<SimulatedView>>(id).selected_index(),
        3
    );
}
