//! The list-backed scheme.

use std::any::Any;
use std::sync::Arc;

use super::{InferrableIdentity, Scheme, SchemeBuilder, SelectionContext};
use crate::error::{Result, SchemeError};
use crate::height::RowHeight;
use crate::view::TableView;

/// Configures a row for one element.
pub type ObjectConfigurationHandler<V, T> =
    Arc<dyn Fn(&mut <V as TableView>::Row, &T) + Send + Sync>;

/// Reacts to the selection of one element's row.
pub type ObjectSelectionHandler<V, T> =
    Arc<dyn Fn(&mut V, &mut <V as TableView>::Row, &T) + Send + Sync>;

/// Height of one element's row.
pub type ObjectHeightHandler<T> = Arc<dyn Fn(&T) -> RowHeight + Send + Sync>;

/// Receives the list after a drag-drop reorder.
pub type ReorderHandler<V, T> = Arc<dyn Fn(&mut V, &[T]) + Send + Sync>;

/// One row per element of a list.
///
/// The elements double as row identities for
/// [`TableScheme::animate_inferred`](crate::TableScheme::animate_inferred),
/// which is the usual way to change the list:
///
/// ```ignore
/// table.animate_inferred::<ArrayScheme<MyView, Contact>, _>(
///     &mut view,
///     contacts_id,
///     RowAnimation::Fade,
///     |scheme| scheme.set_objects(fetch_contacts()),
/// );
/// ```
pub struct ArrayScheme<V: TableView, T> {
    objects: Vec<T>,
    reuse_identifier: String,
    configuration: ObjectConfigurationHandler<V, T>,
    selection: Option<ObjectSelectionHandler<V, T>>,
    height: Option<ObjectHeightHandler<T>>,
    reorder: Option<ReorderHandler<V, T>>,
}

impl<V, T> ArrayScheme<V, T>
where
    V: TableView,
    T: PartialEq + Clone + Send + Sync + 'static,
{
    /// Starts building an array scheme.
    pub fn builder() -> ArraySchemeBuilder<V, T> {
        ArraySchemeBuilder::new()
    }

    /// The backing list.
    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    /// Mutable access to the backing list.
    ///
    /// Changing the length outside a row animation desynchronizes the host.
    pub fn objects_mut(&mut self) -> &mut Vec<T> {
        &mut self.objects
    }

    /// Replaces the backing list.
    pub fn set_objects(&mut self, objects: Vec<T>) {
        self.objects = objects;
    }

    fn object(&self, relative: usize) -> &T {
        self.objects.get(relative).unwrap_or_else(|| {
            panic!(
                "array scheme row {relative} is out of range for {} objects",
                self.objects.len()
            )
        })
    }
}

impl<V, T> Scheme<V> for ArrayScheme<V, T>
where
    V: TableView,
    T: PartialEq + Clone + Send + Sync + 'static,
{
    fn row_count(&self) -> usize {
        self.objects.len()
    }

    fn reuse_identifier(&self, _relative: usize) -> &str {
        &self.reuse_identifier
    }

    fn configure_row(&self, row: &mut V::Row, relative: usize) {
        (self.configuration)(row, self.object(relative));
    }

    fn select_row(&mut self, ctx: &mut SelectionContext<'_, V>) {
        let Some(selection) = self.selection.clone() else {
            return;
        };
        let object = self.object(ctx.relative());
        let (view, row) = ctx.view_and_row();
        selection(view, row, object);
    }

    fn height_for_row(&self, relative: usize) -> RowHeight {
        match &self.height {
            Some(height) => height(self.object(relative)),
            None => RowHeight::UseContainerDefault,
        }
    }

    fn is_reorderable(&self) -> bool {
        self.reorder.is_some()
    }

    fn reorder_row(&mut self, view: &mut V, from: usize, to: usize) {
        let Some(reorder) = self.reorder.clone() else {
            return;
        };
        assert!(
            from < self.objects.len() && to < self.objects.len(),
            "reorder {from} -> {to} is out of range for {} objects",
            self.objects.len()
        );
        let object = self.objects.remove(from);
        self.objects.insert(to, object);
        reorder(view, &self.objects);
    }

    fn kind(&self) -> &'static str {
        "array"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<V, T> InferrableIdentity for ArrayScheme<V, T>
where
    V: TableView,
    T: PartialEq + Clone,
{
    type Identity = T;

    fn row_identities(&self) -> Vec<T> {
        self.objects.clone()
    }
}

/// Builder for [`ArrayScheme`].
pub struct ArraySchemeBuilder<V: TableView, T> {
    objects: Vec<T>,
    reuse_identifier: Option<String>,
    configuration: Option<ObjectConfigurationHandler<V, T>>,
    selection: Option<ObjectSelectionHandler<V, T>>,
    height: Option<ObjectHeightHandler<T>>,
    reorder: Option<ReorderHandler<V, T>>,
}

impl<V, T> Default for ArraySchemeBuilder<V, T>
where
    V: TableView,
    T: PartialEq + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, T> ArraySchemeBuilder<V, T>
where
    V: TableView,
    T: PartialEq + Clone + Send + Sync + 'static,
{
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            reuse_identifier: None,
            configuration: None,
            selection: None,
            height: None,
            reorder: None,
        }
    }

    /// Sets the initial list. An empty list is valid.
    pub fn objects(mut self, objects: Vec<T>) -> Self {
        self.objects = objects;
        self
    }

    /// Sets the kind of visual row to acquire. Required.
    pub fn reuse_identifier(mut self, reuse_identifier: impl Into<String>) -> Self {
        self.reuse_identifier = Some(reuse_identifier.into());
        self
    }

    /// Sets the per-element configuration. Required.
    pub fn configuration<F>(mut self, configuration: F) -> Self
    where
        F: Fn(&mut V::Row, &T) + Send + Sync + 'static,
    {
        self.configuration = Some(Arc::new(configuration));
        self
    }

    /// Sets the selection handler.
    pub fn selection<F>(mut self, selection: F) -> Self
    where
        F: Fn(&mut V, &mut V::Row, &T) + Send + Sync + 'static,
    {
        self.selection = Some(Arc::new(selection));
        self
    }

    /// Sets the per-element row height.
    pub fn height<F>(mut self, height: F) -> Self
    where
        F: Fn(&T) -> RowHeight + Send + Sync + 'static,
    {
        self.height = Some(Arc::new(height));
        self
    }

    /// Makes the rows reorderable; `reorder` receives the list after each move.
    pub fn reorder<F>(mut self, reorder: F) -> Self
    where
        F: Fn(&mut V, &[T]) + Send + Sync + 'static,
    {
        self.reorder = Some(Arc::new(reorder));
        self
    }
}

impl<V, T> SchemeBuilder<V> for ArraySchemeBuilder<V, T>
where
    V: TableView,
    T: PartialEq + Clone + Send + Sync + 'static,
{
    type Output = ArrayScheme<V, T>;

    fn build(self) -> Result<ArrayScheme<V, T>> {
        let reuse_identifier = self
            .reuse_identifier
            .ok_or_else(|| SchemeError::missing_reuse_identifier("array"))?;
        let configuration = self
            .configuration
            .ok_or_else(|| SchemeError::missing_configuration_handler("array"))?;

        Ok(ArrayScheme {
            objects: self.objects,
            reuse_identifier,
            configuration,
            selection: self.selection,
            height: self.height,
            reorder: self.reorder,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexPath;
    use crate::scheme::test_support::{RecordingView, text};

    fn scheme(objects: Vec<&'static str>) -> ArrayScheme<RecordingView, &'static str> {
        ArrayScheme::<RecordingView, &'static str>::builder()
            .objects(objects)
            .reuse_identifier("item")
            .configuration(|row, object| row.lock().text = object.to_string())
            .selection(|view, _row, object| {
                view.selections.push(object.to_string());
            })
            .height(|object| {
                if object.len() > 3 {
                    RowHeight::Custom(88.0)
                } else {
                    RowHeight::UseContainerDefault
                }
            })
            .reorder(|view, objects| {
                view.selections.push(objects.join(","));
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_rows_follow_objects() {
        let scheme = scheme(vec!["one", "two", "three"]);
        let mut view = RecordingView::new();

        assert_eq!(scheme.row_count(), 3);
        let row = scheme.dequeue_row(&mut view, IndexPath::new(0, 4), 2);
        assert_eq!(text(&row), "three");
        assert_eq!(scheme.height_for_row(0), RowHeight::UseContainerDefault);
        assert_eq!(scheme.height_for_row(2), RowHeight::Custom(88.0));
    }

    #[test]
    fn test_selection_passes_the_object() {
        let mut scheme = scheme(vec!["one", "two"]);
        let mut view = RecordingView::new();
        let row = view.show_row(IndexPath::new(0, 1));

        let mut ctx = SelectionContext::new(&mut view, row, 0, 0, 1);
        scheme.select_row(&mut ctx);

        assert_eq!(view.selections, vec!["two".to_string()]);
    }

    #[test]
    fn test_reorder_removes_then_reinserts() {
        let mut scheme = scheme(vec!["a", "b", "c", "d"]);
        let mut view = RecordingView::new();

        assert!(scheme.is_reorderable());
        scheme.reorder_row(&mut view, 0, 2);

        assert_eq!(scheme.objects(), &["b", "c", "a", "d"]);
        assert_eq!(view.selections, vec!["b,c,a,d".to_string()]);
    }

    #[test]
    fn test_identities_are_the_objects() {
        let scheme = scheme(vec!["x", "y"]);
        assert_eq!(scheme.row_identities(), vec!["x", "y"]);
    }

    #[test]
    fn test_not_reorderable_without_handler() {
        let scheme = ArrayScheme::<RecordingView, u32>::builder()
            .objects(vec![1, 2])
            .reuse_identifier("n")
            .configuration(|_, _| {})
            .build()
            .unwrap();
        assert!(!scheme.is_reorderable());
    }

    #[test]
    fn test_empty_list_is_valid() {
        let scheme = ArrayScheme::<RecordingView, u32>::builder()
            .reuse_identifier("n")
            .configuration(|_, _| {})
            .build()
            .unwrap();
        assert_eq!(scheme.row_count(), 0);
    }
}
