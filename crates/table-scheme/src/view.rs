//! The contract between table-scheme and the host list widget.

use crate::animation::RowAnimation;
use crate::index::IndexPath;

/// The host list widget, usually implemented by the screen that owns it.
///
/// table-scheme never creates or lays out visual rows itself. It asks the
/// host for rows through [`acquire_row`](TableView::acquire_row) and tells
/// the host how the layout changed through the mutation primitives.
///
/// Scheme callbacks receive `&mut` access to the implementor, which makes it
/// the natural place for the screen state those callbacks need.
///
/// # Batches
///
/// Calls between [`begin_updates`](TableView::begin_updates) and
/// [`end_updates`](TableView::end_updates) form one batch. Inside a batch:
///
/// - deletions, reloads and move sources refer to the layout *before* the batch
/// - insertions and move destinations refer to the layout *after* the batch
///
/// Mutation calls made outside a batch are applied one at a time.
///
/// # Row handles
///
/// [`Row`](TableView::Row) is a cheap handle to a visual row (an id, an
/// `Arc`, a retained widget pointer). Configuring a handle must update the row
/// it refers to.
pub trait TableView: 'static {
    /// Handle to a visual row.
    type Row: Clone + Send + Sync + 'static;

    /// Custom header or footer view for a section.
    type SectionView: Clone + Send + Sync + 'static;

    /// Produces a visual row of the given kind for `at`, recycling one if the
    /// host supports it. table-scheme configures the result.
    fn acquire_row(&mut self, reuse_identifier: &str, at: IndexPath) -> Self::Row;

    /// Returns the live row currently displayed at `at`, if any.
    fn row_at(&self, at: IndexPath) -> Option<Self::Row>;

    /// Returns the coordinate at which `row` is currently displayed, if any.
    fn index_path_for_row(&self, row: &Self::Row) -> Option<IndexPath>;

    /// Opens a batch.
    fn begin_updates(&mut self);

    /// Closes a batch and lets the host animate it.
    fn end_updates(&mut self);

    /// Inserts rows at post-batch coordinates.
    fn insert_rows(&mut self, rows: &[IndexPath], animation: RowAnimation);

    /// Deletes rows at pre-batch coordinates.
    fn delete_rows(&mut self, rows: &[IndexPath], animation: RowAnimation);

    /// Reloads rows at pre-batch coordinates.
    fn reload_rows(&mut self, rows: &[IndexPath], animation: RowAnimation);

    /// Moves one row from a pre-batch to a post-batch coordinate.
    fn move_row(&mut self, from: IndexPath, to: IndexPath);

    /// Inserts sections at post-batch indices.
    fn insert_sections(&mut self, sections: &[usize], animation: RowAnimation);

    /// Deletes sections at pre-batch indices.
    fn delete_sections(&mut self, sections: &[usize], animation: RowAnimation);

    /// Reloads sections at pre-batch indices.
    fn reload_sections(&mut self, sections: &[usize], animation: RowAnimation);

    /// Clears the highlight of the row at `at`.
    ///
    /// Never called by table-scheme itself; selection handlers may call it.
    fn deselect_row(&mut self, _at: IndexPath, _animated: bool) {}
}
