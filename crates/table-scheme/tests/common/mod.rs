//! A simulated list widget for integration tests.
//!
//! [`SimulatedView`] keeps the arrangement of rows it displays and applies
//! every mutation the table scheme sends, batch semantics included. Rows it
//! has been told to insert or reload are left blank until [`sync`] fills
//! them from the table scheme, which is what a real widget does on its next
//! layout pass. [`assert_in_sync`] then checks every displayed row against a
//! freshly populated one.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use table_scheme::{IndexPath, RowAnimation, TableScheme, TableView};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Cell {
    pub reuse_identifier: String,
    pub text: String,
    pub checked: bool,
}

pub type Row = Arc<Mutex<Cell>>;

/// What a row shows on screen.
pub fn label(row: &Row) -> String {
    let cell = row.lock();
    if cell.checked {
        format!("{} *", cell.text)
    } else {
        cell.text.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Begin,
    End,
    InsertRows(Vec<IndexPath>, RowAnimation),
    DeleteRows(Vec<IndexPath>, RowAnimation),
    ReloadRows(Vec<IndexPath>, RowAnimation),
    MoveRow(IndexPath, IndexPath),
    InsertSections(Vec<usize>, RowAnimation),
    DeleteSections(Vec<usize>, RowAnimation),
    ReloadSections(Vec<usize>, RowAnimation),
}

#[derive(Debug, Default)]
struct Batch {
    deleted_rows: Vec<IndexPath>,
    inserted_rows: Vec<IndexPath>,
    reloaded_rows: Vec<IndexPath>,
    moves: Vec<(IndexPath, IndexPath)>,
    deleted_sections: Vec<usize>,
    inserted_sections: Vec<usize>,
    reloaded_sections: Vec<usize>,
}

/// A section is `None` until its rows are known.
type Section = Option<Vec<Option<Row>>>;

#[derive(Debug, Default)]
pub struct SimulatedView {
    pub calls: Vec<Call>,
    pub log: Vec<String>,
    sections: Vec<Section>,
    batch: Option<Batch>,
    depth: usize,
    loaded: bool,
}

impl SimulatedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    /// Labels of every displayed row, per section.
    pub fn labels(&self) -> Vec<Vec<String>> {
        self.sections
            .iter()
            .map(|section| {
                section
                    .iter()
                    .flatten()
                    .map(|row| row.as_ref().map(label).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    fn record(&mut self, call: Call, apply: impl FnOnce(&mut Batch)) {
        self.calls.push(call);
        match &mut self.batch {
            Some(batch) => apply(batch),
            None => {
                let mut batch = Batch::default();
                apply(&mut batch);
                self.apply(batch);
            }
        }
    }

    fn apply(&mut self, batch: Batch) {
        // Pre-batch coordinates: reloads, move sources, deletions.
        for at in &batch.reloaded_rows {
            *self.slot(*at) = None;
        }
        for section in &batch.reloaded_sections {
            self.sections[*section] = None;
        }

        let mut moved = Vec::new();
        for (from, to) in &batch.moves {
            moved.push((*to, self.slot(*from).clone()));
        }

        let mut survivors: Vec<Section> = Vec::new();
        for (index, section) in std::mem::take(&mut self.sections).into_iter().enumerate() {
            if batch.deleted_sections.contains(&index) {
                continue;
            }
            let kept = section.map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .filter(|(row, _)| {
                        let at = IndexPath::new(index, *row);
                        !batch.deleted_rows.contains(&at)
                            && !batch.moves.iter().any(|(from, _)| *from == at)
                    })
                    .map(|(_, row)| row)
                    .collect()
            });
            survivors.push(kept);
        }

        // Post-batch coordinates: new sections, then new rows and move
        // destinations in ascending order.
        let mut inserted_sections = batch.inserted_sections.clone();
        inserted_sections.sort_unstable();
        for section in inserted_sections {
            assert!(section <= survivors.len(), "inserted section {section} is past the end");
            survivors.insert(section, None);
        }

        let mut arrivals: Vec<(IndexPath, Option<Row>)> = batch
            .inserted_rows
            .iter()
            .map(|at| (*at, None))
            .chain(moved)
            .collect();
        arrivals.sort_by_key(|(at, _)| *at);
        for (at, row) in arrivals {
            if let Some(rows) = survivors[at.section].as_mut() {
                assert!(at.row <= rows.len(), "row {at:?} is past the end of its section");
                rows.insert(at.row, row);
            }
        }

        self.sections = survivors;
    }

    fn slot(&mut self, at: IndexPath) -> &mut Option<Row> {
        let section = self.sections[at.section]
            .as_mut()
            .unwrap_or_else(|| panic!("section {} is not laid out", at.section));
        &mut section[at.row]
    }
}

impl TableView for SimulatedView {
    type Row = Row;
    type SectionView = String;

    fn acquire_row(&mut self, reuse_identifier: &str, _at: IndexPath) -> Row {
        Arc::new(Mutex::new(Cell {
            reuse_identifier: reuse_identifier.to_string(),
            ..Default::default()
        }))
    }

    fn row_at(&self, at: IndexPath) -> Option<Row> {
        self.sections
            .get(at.section)?
            .as_ref()?
            .get(at.row)?
            .clone()
    }

    fn index_path_for_row(&self, row: &Row) -> Option<IndexPath> {
        self.sections.iter().enumerate().find_map(|(section, rows)| {
            rows.as_ref()?
                .iter()
                .position(|live| live.as_ref().is_some_and(|live| Arc::ptr_eq(live, row)))
                .map(|index| IndexPath::new(section, index))
        })
    }

    fn begin_updates(&mut self) {
        self.calls.push(Call::Begin);
        self.depth += 1;
        self.batch.get_or_insert_with(Batch::default);
    }

    fn end_updates(&mut self) {
        self.calls.push(Call::End);
        self.depth -= 1;
        if self.depth == 0
            && let Some(batch) = self.batch.take()
        {
            self.apply(batch);
        }
    }

    fn insert_rows(&mut self, rows: &[IndexPath], animation: RowAnimation) {
        self.record(Call::InsertRows(rows.to_vec(), animation), |batch| {
            batch.inserted_rows.extend_from_slice(rows)
        });
    }

    fn delete_rows(&mut self, rows: &[IndexPath], animation: RowAnimation) {
        self.record(Call::DeleteRows(rows.to_vec(), animation), |batch| {
            batch.deleted_rows.extend_from_slice(rows)
        });
    }

    fn reload_rows(&mut self, rows: &[IndexPath], animation: RowAnimation) {
        self.record(Call::ReloadRows(rows.to_vec(), animation), |batch| {
            batch.reloaded_rows.extend_from_slice(rows)
        });
    }

    fn move_row(&mut self, from: IndexPath, to: IndexPath) {
        self.record(Call::MoveRow(from, to), |batch| batch.moves.push((from, to)));
    }

    fn insert_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.record(Call::InsertSections(sections.to_vec(), animation), |batch| {
            batch.inserted_sections.extend_from_slice(sections)
        });
    }

    fn delete_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.record(Call::DeleteSections(sections.to_vec(), animation), |batch| {
            batch.deleted_sections.extend_from_slice(sections)
        });
    }

    fn reload_sections(&mut self, sections: &[usize], animation: RowAnimation) {
        self.record(Call::ReloadSections(sections.to_vec(), animation), |batch| {
            batch.reloaded_sections.extend_from_slice(sections)
        });
    }
}

/// Lays out unknown sections and rows from `table`, like a widget's layout
/// pass. The first call loads everything.
///
/// Panics if a known section's length disagrees with the table, which is the
/// inconsistency a real widget would reject.
pub fn sync(table: &TableScheme<SimulatedView>, view: &mut SimulatedView) {
    if !view.loaded {
        view.sections = vec![None; table.section_count()];
        view.loaded = true;
    }
    assert_eq!(
        view.sections.len(),
        table.section_count(),
        "section count out of sync"
    );

    for section in 0..view.sections.len() {
        let expected = table.row_count(section);
        match &view.sections[section] {
            Some(rows) => assert_eq!(
                rows.len(),
                expected,
                "section {section} has {} rows on screen but {expected} in the table",
                rows.len()
            ),
            None => view.sections[section] = Some(vec![None; expected]),
        }
        for row in 0..expected {
            let at = IndexPath::new(section, row);
            if view.row_at(at).is_none() {
                let populated = table.populate_row(view, at);
                *view.slot(at) = Some(populated);
            }
        }
    }
}

/// Syncs, then checks every displayed row against a freshly populated one.
pub fn assert_in_sync(table: &TableScheme<SimulatedView>, view: &mut SimulatedView) {
    sync(table, view);
    for section in 0..table.section_count() {
        for row in 0..table.row_count(section) {
            let at = IndexPath::new(section, row);
            let shown = view.row_at(at).map(|row| label(&row));
            let fresh = label(&table.populate_row(view, at));
            assert_eq!(shown.as_deref(), Some(fresh.as_str()), "row {at:?} is stale");
        }
    }
}

/// Taps the row at `at` and lets the widget catch up.
pub fn tap(table: &mut TableScheme<SimulatedView>, view: &mut SimulatedView, at: IndexPath) {
    table.handle_selection(view, at);
    sync(table, view);
}

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
