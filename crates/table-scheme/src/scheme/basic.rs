//! The single-row scheme.

use std::any::Any;
use std::sync::Arc;

use super::{ConfigurationHandler, Scheme, SchemeBuilder, SelectionContext, SelectionHandler};
use crate::error::{Result, SchemeError};
use crate::height::RowHeight;
use crate::view::TableView;

/// One row, configured and selected through closures.
///
/// # Example
///
/// ```ignore
/// use table_scheme::{BasicScheme, RowHeight};
///
/// let scheme = BasicScheme::<MyView>::builder()
///     .reuse_identifier("value")
///     .configuration(|row| row.set_text("Notifications"))
///     .selection(|view, _row| view.push_notification_settings())
///     .height(RowHeight::Custom(56.0));
/// ```
pub struct BasicScheme<V: TableView> {
    reuse_identifier: String,
    configuration: ConfigurationHandler<V>,
    selection: Option<SelectionHandler<V>>,
    height: RowHeight,
}

impl<V: TableView> BasicScheme<V> {
    /// Starts building a basic scheme.
    pub fn builder() -> BasicSchemeBuilder<V> {
        BasicSchemeBuilder::new()
    }

    /// The requested row height.
    pub fn height(&self) -> RowHeight {
        self.height
    }

    /// Changes the requested row height.
    ///
    /// The host only picks this up on its next height query, typically after
    /// a reload of the scheme.
    pub fn set_height(&mut self, height: RowHeight) {
        self.height = height;
    }
}

impl<V: TableView> Scheme<V> for BasicScheme<V> {
    fn row_count(&self) -> usize {
        1
    }

    fn reuse_identifier(&self, _relative: usize) -> &str {
        &self.reuse_identifier
    }

    fn configure_row(&self, row: &mut V::Row, _relative: usize) {
        (self.configuration)(row);
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
        "basic"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Builder for [`BasicScheme`].
pub struct BasicSchemeBuilder<V: TableView> {
    reuse_identifier: Option<String>,
    configuration: Option<ConfigurationHandler<V>>,
    selection: Option<SelectionHandler<V>>,
    height: RowHeight,
}

impl<V: TableView> Default for BasicSchemeBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: TableView> BasicSchemeBuilder<V> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            reuse_identifier: None,
            configuration: None,
            selection: None,
            height: RowHeight::default(),
        }
    }

    /// Sets the kind of visual row to acquire. Required.
    pub fn reuse_identifier(mut self, reuse_identifier: impl Into<String>) -> Self {
        self.reuse_identifier = Some(reuse_identifier.into());
        self
    }

    /// Sets the row configuration. Required.
    pub fn configuration<F>(mut self, configuration: F) -> Self
    where
        F: Fn(&mut V::Row) + Send + Sync + 'static,
    {
        self.configuration = Some(Arc::new(configuration));
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

impl<V: TableView> SchemeBuilder<V> for BasicSchemeBuilder<V> {
    type Output = BasicScheme<V>;

    fn build(self) -> Result<BasicScheme<V>> {
        let reuse_identifier = self
            .reuse_identifier
            .ok_or_else(|| SchemeError::missing_reuse_identifier("basic"))?;
        let configuration = self
            .configuration
            .ok_or_else(|| SchemeError::missing_configuration_handler("basic"))?;

        Ok(BasicScheme {
            reuse_identifier,
            configuration,
            selection: self.selection,
            height: self.height,
        })
    }
}
