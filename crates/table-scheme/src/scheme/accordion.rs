//! The expand-on-tap options scheme.

use std::any::Any;
use std::sync::Arc;

use table_scheme_core::logging::targets;

use super::{IndexedConfigurationHandler, Scheme, SchemeBuilder, SelectionContext, SelectionHandler};
use crate::animation::RowAnimation;
use crate::error::{Result, SchemeError};
use crate::height::RowHeight;
use crate::index::IndexPath;
use crate::view::TableView;

/// Reacts to the selection of an expanded option; receives the option index.
pub type AccordionSelectionHandler<V> =
    Arc<dyn Fn(&mut V, &mut <V as TableView>::Row, usize) + Send + Sync>;

/// One row showing the current choice, expanding into all options on tap.
///
/// Collapsed, the scheme is a single row configured with the selected
/// option's index. Tapping it expands the scheme in place: every other
/// option's row is inserted around it and the tapped row is reloaded as the
/// selected option. Tapping any expanded option selects it and collapses the
/// scheme back to that one row.
///
/// Both transitions are animated by the scheme itself, inside one host batch,
/// using [`animation`](AccordionSchemeBuilder::animation) for the rows that
/// appear or disappear.
pub struct AccordionScheme<V: TableView> {
    collapsed_reuse_identifier: String,
    collapsed_configuration: IndexedConfigurationHandler<V>,
    collapsed_selection: Option<SelectionHandler<V>>,
    collapsed_height: RowHeight,
    reuse_identifiers: Vec<String>,
    configuration: IndexedConfigurationHandler<V>,
    selection: Option<AccordionSelectionHandler<V>>,
    heights: Vec<RowHeight>,
    animation: RowAnimation,
    expanded: bool,
    selected_index: usize,
}

impl<V: TableView> AccordionScheme<V> {
    /// Starts building an accordion scheme.
    pub fn builder() -> AccordionSchemeBuilder<V> {
        AccordionSchemeBuilder::new()
    }

    /// Whether all options are currently shown.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// The option the collapsed row stands for.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Number of options when expanded.
    pub fn option_count(&self) -> usize {
        self.reuse_identifiers.len()
    }

    /// Animation for appearing and disappearing options.
    pub fn animation(&self) -> RowAnimation {
        self.animation
    }

    fn expand(&mut self, ctx: &mut SelectionContext<'_, V>) {
        if let Some(selection) = &self.collapsed_selection {
            let (view, row) = ctx.view_and_row();
            selection(view, row);
        }
        self.expanded = true;

        let selected = self.selected_index;
        let inserted: Vec<IndexPath> = (0..self.option_count())
            .filter(|&option| option != selected)
            .map(|option| ctx.index_path_for(option))
            .collect();
        let anchor = ctx.index_path_for(0);

        tracing::debug!(
            target: targets::ANIMATION,
            ?anchor,
            inserted = inserted.len(),
            "accordion expanding"
        );

        let animation = self.animation;
        let view = ctx.view();
        view.begin_updates();
        if !inserted.is_empty() {
            view.insert_rows(&inserted, animation);
        }
        view.reload_rows(&[anchor], RowAnimation::Automatic);
        view.end_updates();
    }

    fn collapse(&mut self, ctx: &mut SelectionContext<'_, V>) {
        let tapped = ctx.relative();
        if let Some(selection) = &self.selection {
            let (view, row) = ctx.view_and_row();
            selection(view, row, tapped);
        }
        self.selected_index = tapped;
        self.expanded = false;

        let deleted: Vec<IndexPath> = (0..self.option_count())
            .filter(|&option| option != tapped)
            .map(|option| ctx.index_path_for(option))
            .collect();
        let anchor = ctx.index_path_for(tapped);

        tracing::debug!(
            target: targets::ANIMATION,
            ?anchor,
            deleted = deleted.len(),
            "accordion collapsing"
        );

        let animation = self.animation;
        let view = ctx.view();
        view.begin_updates();
        if !deleted.is_empty() {
            view.delete_rows(&deleted, animation);
        }
        view.reload_rows(&[anchor], RowAnimation::Automatic);
        view.end_updates();
    }
}

impl<V: TableView> Scheme<V> for AccordionScheme<V> {
    fn row_count(&self) -> usize {
        if self.expanded {
            self.reuse_identifiers.len()
        } else {
            1
        }
    }

    fn reuse_identifier(&self, relative: usize) -> &str {
        if self.expanded {
            &self.reuse_identifiers[relative]
        } else {
            &self.collapsed_reuse_identifier
        }
    }

    fn configure_row(&self, row: &mut V::Row, relative: usize) {
        if self.expanded {
            (self.configuration)(row, relative);
        } else {
            (self.collapsed_configuration)(row, self.selected_index);
        }
    }

    fn select_row(&mut self, ctx: &mut SelectionContext<'_, V>) {
        if self.expanded {
            self.collapse(ctx);
        } else {
            self.expand(ctx);
        }
    }

    fn height_for_row(&self, relative: usize) -> RowHeight {
        if self.expanded {
            self.heights
                .get(relative)
                .copied()
                .unwrap_or(RowHeight::UseContainerDefault)
        } else {
            self.collapsed_height
        }
    }

    fn kind(&self) -> &'static str {
        "accordion"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Builder for [`AccordionScheme`].
pub struct AccordionSchemeBuilder<V: TableView> {
    collapsed_reuse_identifier: Option<String>,
    collapsed_configuration: Option<IndexedConfigurationHandler<V>>,
    collapsed_selection: Option<SelectionHandler<V>>,
    collapsed_height: RowHeight,
    reuse_identifiers: Vec<String>,
    configuration: Option<IndexedConfigurationHandler<V>>,
    selection: Option<AccordionSelectionHandler<V>>,
    heights: Vec<RowHeight>,
    animation: RowAnimation,
    selected_index: usize,
}

impl<V: TableView> Default for AccordionSchemeBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: TableView> AccordionSchemeBuilder<V> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            collapsed_reuse_identifier: None,
            collapsed_configuration: None,
            collapsed_selection: None,
            collapsed_height: RowHeight::default(),
            reuse_identifiers: Vec::new(),
            configuration: None,
            selection: None,
            heights: Vec::new(),
            animation: RowAnimation::Fade,
            selected_index: 0,
        }
    }

    /// Sets the collapsed row's reuse identifier. Required.
    pub fn collapsed_reuse_identifier(mut self, reuse_identifier: impl Into<String>) -> Self {
        self.collapsed_reuse_identifier = Some(reuse_identifier.into());
        self
    }

    /// Sets the collapsed row's configuration, which receives the selected
    /// option. Required.
    pub fn collapsed_configuration<F>(mut self, configuration: F) -> Self
    where
        F: Fn(&mut V::Row, usize) + Send + Sync + 'static,
    {
        self.collapsed_configuration = Some(Arc::new(configuration));
        self
    }

    /// Runs before the scheme expands.
    pub fn collapsed_selection<F>(mut self, selection: F) -> Self
    where
        F: Fn(&mut V, &mut V::Row) + Send + Sync + 'static,
    {
        self.collapsed_selection = Some(Arc::new(selection));
        self
    }

    /// Sets the collapsed row's height.
    pub fn collapsed_height(mut self, height: RowHeight) -> Self {
        self.collapsed_height = height;
        self
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

    /// Sets the expanded option configuration. Required.
    pub fn configuration<F>(mut self, configuration: F) -> Self
    where
        F: Fn(&mut V::Row, usize) + Send + Sync + 'static,
    {
        self.configuration = Some(Arc::new(configuration));
        self
    }

    /// Runs before the scheme collapses onto the tapped option.
    pub fn selection<F>(mut self, selection: F) -> Self
    where
        F: Fn(&mut V, &mut V::Row, usize) + Send + Sync + 'static,
    {
        self.selection = Some(Arc::new(selection));
        self
    }

    /// Sets per-option heights; options past the end use the container default.
    pub fn heights(mut self, heights: Vec<RowHeight>) -> Self {
        self.heights = heights;
        self
    }

    /// Sets the animation for appearing and disappearing options. Defaults to
    /// [`RowAnimation::Fade`].
    pub fn animation(mut self, animation: RowAnimation) -> Self {
        self.animation = animation;
        self
    }

    /// Sets the initially selected option. Defaults to 0.
    pub fn selected_index(mut self, selected_index: usize) -> Self {
        self.selected_index = selected_index;
        self
    }
}

impl<V: TableView> SchemeBuilder<V> for AccordionSchemeBuilder<V> {
    type Output = AccordionScheme<V>;

    fn build(self) -> Result<AccordionScheme<V>> {
        let collapsed_reuse_identifier = self
            .collapsed_reuse_identifier
            .ok_or_else(|| SchemeError::missing_reuse_identifier("accordion"))?;
        let collapsed_configuration = self
            .collapsed_configuration
            .ok_or_else(|| SchemeError::missing_configuration_handler("accordion"))?;
        if self.reuse_identifiers.is_empty() {
            return Err(SchemeError::EmptyOptions { kind: "accordion" });
        }
        let configuration = self
            .configuration
            .ok_or_else(|| SchemeError::missing_configuration_handler("accordion"))?;
        if self.selected_index >= self.reuse_identifiers.len() {
            return Err(SchemeError::SelectedIndexOutOfRange {
                index: self.selected_index,
                count: self.reuse_identifiers.len(),
            });
        }

        Ok(AccordionScheme {
            collapsed_reuse_identifier,
            collapsed_configuration,
            collapsed_selection: self.collapsed_selection,
            collapsed_height: self.collapsed_height,
            reuse_identifiers: self.reuse_identifiers,
            configuration,
            selection: self.selection,
            heights: self.heights,
            animation: self.animation,
            expanded: false,
            selected_index: self.selected_index,
        })
    }
}
