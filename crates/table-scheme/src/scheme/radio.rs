//! The mutually-exclusive options scheme.

use std::any::Any;
use std::sync::Arc;

use table_scheme_core::logging::targets;

use super::{IndexedConfigurationHandler, Scheme, SchemeBuilder, SelectionContext, StateHandler};
use crate::error::{Result, SchemeError};
use crate::height::RowHeight;
use crate::view::TableView;

/// Reacts to a tap on an option.
///
/// Arguments: host, tapped row, the option selected *before* the tap, and the
/// tapped option.
pub type RadioSelectionHandler<V> =
    Arc<dyn Fn(&mut V, &mut <V as TableView>::Row, usize, usize) + Send + Sync>;

/// A group of rows of which exactly one is selected.
///
/// Tapping an option runs the selection handler first, while
/// [`selected_index`](RadioScheme::selected_index) still names the previous
/// option. If the tapped option is a different one, the selection moves and
/// the state handler marks the previous row (looked up live from the host)
/// unselected and the tapped row selected. Tapping the selected option only
/// runs the selection handler.
pub struct RadioScheme<V: TableView> {
    reuse_identifiers: Vec<String>,
    configuration: IndexedConfigurationHandler<V>,
    selection: Option<RadioSelectionHandler<V>>,
    state: StateHandler<V>,
    heights: Vec<RowHeight>,
    selected_index: usize,
}

impl<V: TableView> RadioScheme<V> {
    /// Starts building a radio scheme.
    pub fn builder() -> RadioSchemeBuilder<V> {
        RadioSchemeBuilder::new()
    }

    /// The currently selected option.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Moves the selection without touching any visual row.
    ///
    /// Reload the scheme afterwards so the host shows the new state.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not an option.
    pub fn set_selected_index(&mut self, index: usize) {
        assert!(
            index < self.reuse_identifiers.len(),
            "radio option {index} is out of range for {} options",
            self.reuse_identifiers.len()
        );
        self.selected_index = index;
    }
}

impl<V: TableView> Scheme<V> for RadioScheme<V> {
    fn row_count(&self) -> usize {
        self.reuse_identifiers.len()
    }

    fn reuse_identifier(&self, relative: usize) -> &str {
        &self.reuse_identifiers[relative]
    }

    fn configure_row(&self, row: &mut V::Row, relative: usize) {
        (self.configuration)(row, relative);
        (self.state)(row, relative == self.selected_index);
    }

    fn select_row(&mut self, ctx: &mut SelectionContext<'_, V>) {
        let tapped = ctx.relative();
        let previous = self.selected_index;

        if let Some(selection) = &self.selection {
            let (view, row) = ctx.view_and_row();
            selection(view, row, previous, tapped);
        }

        if tapped == previous {
            return;
        }

        self.selected_index = tapped;
        tracing::debug!(
            target: targets::SELECTION,
            previous,
            selected = tapped,
            "radio selection moved"
        );

        let previous_path = ctx.index_path_for(previous);
        if let Some(mut previous_row) = ctx.view().row_at(previous_path) {
            (self.state)(&mut previous_row, false);
        }
        let (_, row) = ctx.view_and_row();
        (self.state)(row, true);
    }

    fn height_for_row(&self, relative: usize) -> RowHeight {
        self.heights
            .get(relative)
            .copied()
            .unwrap_or(RowHeight::UseContainerDefault)
    }

    fn kind(&self) -> &'static str {
        "radio"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Builder for [`RadioScheme`].
pub struct RadioSchemeBuilder<V: TableView> {
    reuse_identifiers: Vec<String>,
    configuration: Option<IndexedConfigurationHandler<V>>,
    selection: Option<RadioSelectionHandler<V>>,
    state: Option<StateHandler<V>>,
    heights: Vec<RowHeight>,
    selected_index: usize,
}

impl<V: TableView> Default for RadioSchemeBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: TableView> RadioSchemeBuilder<V> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            reuse_identifiers: Vec::new(),
            configuration: None,
            selection: None,
            state: None,
            heights: Vec::new(),
            selected_index: 0,
        }
    }

    /// Sets one reuse identifier per option. Required, non-empty.
    pub fn reuse_identifiers<I, S>(mut self, reuse_identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reuse_identifiers = reuse_identifiers.into_iter().map(Into::into).collect();
        self
    }

    /// Sets `count` options sharing one reuse identifier.
    pub fn options(mut self, reuse_identifier: impl Into<String>, count: usize) -> Self {
        self.reuse_identifiers = vec![reuse_identifier.into(); count];
        self
    }

    /// Sets the per-option configuration. Required.
    pub fn configuration<F>(mut self, configuration: F) -> Self
    where
        F: Fn(&mut V::Row, usize) + Send + Sync + 'static,
    {
        self.configuration = Some(Arc::new(configuration));
        self
    }

    /// Sets the selection handler.
    pub fn selection<F>(mut self, selection: F) -> Self
    where
        F: Fn(&mut V, &mut V::Row, usize, usize) + Send + Sync + 'static,
    {
        self.selection = Some(Arc::new(selection));
        self
    }

    /// Sets how a row shows being selected or not. Required.
    pub fn state<F>(mut self, state: F) -> Self
    where
        F: Fn(&mut V::Row, bool) + Send + Sync + 'static,
    {
        self.state = Some(Arc::new(state));
        self
    }

    /// Sets per-option heights; options past the end use the container default.
    pub fn heights(mut self, heights: Vec<RowHeight>) -> Self {
        self.heights = heights;
        self
    }

    /// Sets the initially selected option. Defaults to 0.
    pub fn selected_index(mut self, selected_index: usize) -> Self {
        self.selected_index = selected_index;
        self
    }
}

impl<V: TableView> SchemeBuilder<V> for RadioSchemeBuilder<V> {
    type Output = RadioScheme<V>;

    fn build(self) -> Result<RadioScheme<V>> {
        if self.reuse_identifiers.is_empty() {
            return Err(SchemeError::EmptyOptions { kind: "radio" });
        }
        if self.selected_index >= self.reuse_identifiers.len() {
            return Err(SchemeError::SelectedIndexOutOfRange {
                index: self.selected_index,
                count: self.reuse_identifiers.len(),
            });
        }
        let configuration = self
            .configuration
            .ok_or_else(|| SchemeError::missing_configuration_handler("radio"))?;
        let state = self
            .state
            .ok_or(SchemeError::MissingStateHandler { kind: "radio" })?;

        Ok(RadioScheme {
            reuse_identifiers: self.reuse_identifiers,
            configuration,
            selection: self.selection,
            state,
            heights: self.heights,
            selected_index: self.selected_index,
        })
    }
}
