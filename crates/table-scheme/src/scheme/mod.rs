//! Schemes: the declarative units that produce rows.
//!
//! A [`Scheme`] stands for one or more consecutive logical rows of a section
//! and owns their behavior: which kind of visual row to use, how to
//! configure it, what happens on selection and how tall it is. Every row
//! index a scheme sees is *relative*: 0 is the scheme's own first row,
//! wherever the scheme currently sits in the table.
//!
//! # Provided Schemes
//!
//! - [`BasicScheme`]: one row built from closures
//! - [`StaticScheme`]: one pre-built row handed back as is
//! - [`ArrayScheme`]: one row per element of a list
//! - [`RadioScheme`]: mutually exclusive options
//! - [`AccordionScheme`]: one row that expands into several and back
//!
//! Custom schemes implement [`Scheme`] directly and are added with
//! [`SchemeSetBuilder::add_custom`](crate::SchemeSetBuilder::add_custom).

mod accordion;
mod array;
mod basic;
mod radio;
mod static_scheme;

use std::any::Any;
use std::sync::Arc;

use crate::error::Result;
use crate::height::RowHeight;
use crate::index::IndexPath;
use crate::view::TableView;

pub use accordion::{AccordionScheme, AccordionSchemeBuilder};
pub use array::{ArrayScheme, ArraySchemeBuilder};
pub use basic::{BasicScheme, BasicSchemeBuilder};
pub use radio::{RadioScheme, RadioSchemeBuilder};
pub use static_scheme::{StaticScheme, StaticSchemeBuilder};

/// Configures a single-row scheme's row.
pub type ConfigurationHandler<V> = Arc<dyn Fn(&mut <V as TableView>::Row) + Send + Sync>;

/// Configures the row for one index of a multi-row scheme.
pub type IndexedConfigurationHandler<V> =
    Arc<dyn Fn(&mut <V as TableView>::Row, usize) + Send + Sync>;

/// Reacts to the selection of a single-row scheme's row.
pub type SelectionHandler<V> = Arc<dyn Fn(&mut V, &mut <V as TableView>::Row) + Send + Sync>;

/// Applies the selected (`true`) or unselected (`false`) visual state to a row.
pub type StateHandler<V> = Arc<dyn Fn(&mut <V as TableView>::Row, bool) + Send + Sync>;

/// The unit of rows in a table scheme.
///
/// Implementations must keep [`row_count`](Scheme::row_count) in sync with
/// what the host has been told: a count change is only valid when it is
/// announced through a row animation or a reload.
pub trait Scheme<V: TableView>: Any + Send + Sync {
    /// Number of rows this scheme currently contributes.
    fn row_count(&self) -> usize;

    /// The kind of visual row to acquire for `relative`.
    fn reuse_identifier(&self, relative: usize) -> &str;

    /// Populates `row` for the logical row at `relative`.
    fn configure_row(&self, row: &mut V::Row, relative: usize);

    /// Produces the configured visual row for `relative`, displayed at `at`.
    ///
    /// The default acquires a row from the host and configures it.
    fn dequeue_row(&self, view: &mut V, at: IndexPath, relative: usize) -> V::Row {
        let mut row = view.acquire_row(self.reuse_identifier(relative), at);
        self.configure_row(&mut row, relative);
        row
    }

    /// Handles the selection of the row described by `ctx`.
    fn select_row(&mut self, ctx: &mut SelectionContext<'_, V>);

    /// Height requested for the row at `relative`.
    fn height_for_row(&self, _relative: usize) -> RowHeight {
        RowHeight::UseContainerDefault
    }

    /// Whether the user may drag this scheme's rows to reorder them.
    fn is_reorderable(&self) -> bool {
        false
    }

    /// Applies a drag-drop reorder the host has already shown on screen.
    ///
    /// Only called when [`is_reorderable`](Scheme::is_reorderable) is `true`.
    fn reorder_row(&mut self, _view: &mut V, _from: usize, _to: usize) {}

    /// Short name of the scheme kind, for logging and tree dumps.
    fn kind(&self) -> &'static str {
        "custom"
    }

    /// Returns `self` for downcasting to the concrete scheme type.
    fn as_any(&self) -> &dyn Any;

    /// Returns `self` for mutable downcasting to the concrete scheme type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Schemes whose rows carry comparable identities.
///
/// [`TableScheme::animate_inferred`](crate::TableScheme::animate_inferred)
/// compares the identities before and after a change to work out which rows
/// moved, appeared or disappeared.
pub trait InferrableIdentity {
    /// Identity of one row.
    type Identity: PartialEq;

    /// One identity per current row, in row order.
    fn row_identities(&self) -> Vec<Self::Identity>;
}

/// Builds a validated scheme.
///
/// Builders collect the pieces of a scheme and check them in
/// [`build`](SchemeBuilder::build). A scheme set rejects builders that fail.
pub trait SchemeBuilder<V: TableView> {
    /// The scheme this builder produces.
    type Output: Scheme<V>;

    /// Validates the collected fields and produces the scheme.
    fn build(self) -> Result<Self::Output>;
}

/// Everything a scheme needs to handle a selection.
///
/// Carries the host, the selected row, and where the scheme currently sits so
/// that schemes can animate their own rows.
pub struct SelectionContext<'a, V: TableView> {
    view: &'a mut V,
    row: V::Row,
    section: usize,
    row_offset: usize,
    relative: usize,
}

impl<'a, V: TableView> SelectionContext<'a, V> {
    pub(crate) fn new(
        view: &'a mut V,
        row: V::Row,
        section: usize,
        row_offset: usize,
        relative: usize,
    ) -> Self {
        Self {
            view,
            row,
            section,
            row_offset,
            relative,
        }
    }

    /// The host widget.
    pub fn view(&mut self) -> &mut V {
        self.view
    }

    /// The selected row.
    pub fn row(&self) -> &V::Row {
        &self.row
    }

    /// The host and the selected row, borrowed together.
    pub fn view_and_row(&mut self) -> (&mut V, &mut V::Row) {
        (&mut *self.view, &mut self.row)
    }

    /// Visible section of the selected row.
    pub fn section(&self) -> usize {
        self.section
    }

    /// Number of rows before the scheme's first row in its section.
    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// Relative index of the selected row.
    pub fn relative(&self) -> usize {
        self.relative
    }

    /// Flat coordinate of the selected row.
    pub fn index_path(&self) -> IndexPath {
        self.index_path_for(self.relative)
    }

    /// Flat coordinate of another row of the same scheme.
    pub fn index_path_for(&self, relative: usize) -> IndexPath {
        IndexPath::new(self.section, self.row_offset + relative)
    }
}

impl<V: TableView> std::fmt::Debug for SelectionContext<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionContext")
            .field("section", &self.section)
            .field("row_offset", &self.row_offset)
            .field("relative", &self.relative)
            .finish_non_exhaustive()
    }
}
