//! The pre-built single-row scheme.

use std::any::Any;
use std::sync::Arc;

use super::{Scheme, SchemeBuilder, SelectionContext, SelectionHandler};
use crate::error::{Result, SchemeError};
use crate::height::RowHeight;
use crate::index::IndexPath;
use crate::view::TableView;

const STATIC_REUSE_IDENTIFIER: &str = "static";

/// One row whose visual row is created up front and never recycled.
///
/// [`dequeue_row`](Scheme::dequeue_row) hands the same row back every time
/// instead of asking the host for one. Useful for rows holding live input
/// controls whose state must survive scrolling.
pub struct StaticScheme<V: TableView> {
    row: V::Row,
    selection: Option<SelectionHandler<V>>,
    height: RowHeight,
}

impl<V: TableView> StaticScheme<V> {
    /// Starts building a static scheme.
    pub fn builder() -> StaticSchemeBuilder<V> {
        StaticSchemeBuilder::new()
    }

    /// The pre-built row.
    pub fn row(&self) -> &V::Row {
        &self.row
    }
}

impl<V: TableView> Scheme<V> for StaticScheme<V> {
    fn row_count(&self) -> usize {
        1
    }

    fn reuse_identifier(&self, _relative: usize) -> &str {
        STATIC_REUSE_IDENTIFIER
    }

    fn configure_row(&self, _row: &mut V::Row, _relative: usize) {}

    fn dequeue_row(&self, _view: &mut V, _at: IndexPath, _relative: usize) -> V::Row {
        self.row.clone()
    }

    fn select_row(&mut self, ctx: &mut SelectionContext<'_, V>) {
        if let Some(selection) = &self.selection {
            let (view, row) = ctx.view_and_row();
            selection(view, row);
        }
    }

    fn height_for_row(&self, _relative: usize) -> RowHeight {
        self.height
    }

    fn kind(&self) -> &'static str {
        "static"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Builder for [`StaticScheme`].
pub struct StaticSchemeBuilder<V: TableView> {
    row: Option<V::Row>,
    selection: Option<SelectionHandler<V>>,
    height: RowHeight,
}

impl<V: TableView> Default for StaticSchemeBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: TableView> StaticSchemeBuilder<V> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            row: None,
            selection: None,
            height: RowHeight::default(),
        }
    }

    /// Sets the pre-built row. Required.
    pub fn row(mut self, row: V::Row) -> Self {
        self.row = Some(row);
        self
    }

    /// Sets the selection handler.
    pub fn selection<F>(mut self, selection: F) -> Self
    where
        F: Fn(&mut V, &mut V::Row) + Send + Sync + 'static,
    {
        self.selection = Some(Arc::new(selection));
        self
    }

    /// Sets the row height.
    pub fn height(mut self, height: RowHeight) -> Self {
        self.height = height;
        self
    }
}

impl<V: TableView> SchemeBuilder<V> for StaticSchemeBuilder<V> {
    type Output = StaticScheme<V>;

    fn build(self) -> Result<StaticScheme<V>> {
        let row = self.row.ok_or(SchemeError::MissingRow)?;
        Ok(StaticScheme {
            row,
            selection: self.selection,
            height: self.height,
        })
    }
}
