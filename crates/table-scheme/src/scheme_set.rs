//! Scheme sets: the schemes of one section.

use table_scheme_core::logging::targets;

use crate::index::{SchemeId, SchemeSetId};
use crate::scheme::{Scheme, SchemeBuilder};
use crate::view::TableView;

/// A scheme plus its visibility inside a set.
pub(crate) struct AttributedScheme<V: TableView> {
    pub(crate) id: SchemeId,
    pub(crate) scheme: Box<dyn Scheme<V>>,
    pub(crate) hidden: bool,
}

impl<V: TableView> AttributedScheme<V> {
    /// Rows this scheme contributes to its section right now.
    pub(crate) fn visible_row_count(&self) -> usize {
        if self.hidden {
            0
        } else {
            self.scheme.row_count()
        }
    }
}

/// An ordered group of schemes shown as one section.
///
/// The list of schemes is fixed once the set is built; only the visibility
/// of the set and of each scheme changes afterwards, through
/// [`TableScheme`](crate::TableScheme).
///
/// ```ignore
/// let mut builder = SchemeSet::builder();
/// builder.header_title("Account");
/// let name = builder.add_scheme(BasicScheme::builder()
///     .reuse_identifier("value")
///     .configuration(|row| row.set_text("Name")));
/// let set = builder.build();
/// ```
pub struct SchemeSet<V: TableView> {
    id: SchemeSetId,
    header_title: Option<String>,
    footer_text: Option<String>,
    header_view: Option<V::SectionView>,
    footer_view: Option<V::SectionView>,
    pub(crate) schemes: Vec<AttributedScheme<V>>,
    pub(crate) hidden: bool,
}

impl<V: TableView> SchemeSet<V> {
    /// Starts building a scheme set.
    pub fn builder() -> SchemeSetBuilder<V> {
        SchemeSetBuilder::new()
    }

    /// This set's handle.
    pub fn id(&self) -> SchemeSetId {
        self.id
    }

    /// Section header text.
    pub fn header_title(&self) -> Option<&str> {
        self.header_title.as_deref()
    }

    /// Section footer text.
    pub fn footer_text(&self) -> Option<&str> {
        self.footer_text.as_deref()
    }

    /// Custom section header view.
    pub fn header_view(&self) -> Option<&V::SectionView> {
        self.header_view.as_ref()
    }

    /// Custom section footer view.
    pub fn footer_view(&self) -> Option<&V::SectionView> {
        self.footer_view.as_ref()
    }

    /// Whether the whole set is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Number of schemes, hidden ones included.
    pub fn scheme_count(&self) -> usize {
        self.schemes.len()
    }

    /// Handles of all schemes, in order, hidden ones included.
    pub fn scheme_ids(&self) -> impl Iterator<Item = SchemeId> + '_ {
        self.schemes.iter().map(|attributed| attributed.id)
    }

    /// Whether `id` belongs to this set.
    pub fn contains(&self, id: SchemeId) -> bool {
        self.position_of(id).is_some()
    }

    /// Sum of the row counts of the non-hidden schemes.
    ///
    /// Does not look at the set's own hidden flag.
    pub fn visible_row_count(&self) -> usize {
        self.schemes
            .iter()
            .map(AttributedScheme::visible_row_count)
            .sum()
    }

    pub(crate) fn position_of(&self, id: SchemeId) -> Option<usize> {
        self.schemes.iter().position(|attributed| attributed.id == id)
    }

    /// Rows contributed by the visible schemes in front of `position`.
    pub(crate) fn rows_before(&self, position: usize) -> usize {
        self.schemes[..position]
            .iter()
            .map(AttributedScheme::visible_row_count)
            .sum()
    }

    /// Finds the scheme displaying `row` of this set's section.
    ///
    /// Returns the scheme's position and the row relative to that scheme.
    pub(crate) fn locate_row(&self, row: usize) -> Option<(usize, usize)> {
        let mut remaining = row;
        for (position, attributed) in self.schemes.iter().enumerate() {
            let count = attributed.visible_row_count();
            if remaining < count {
                return Some((position, remaining));
            }
            remaining -= count;
        }
        None
    }
}

impl<V: TableView> std::fmt::Debug for SchemeSet<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemeSet")
            .field("id", &self.id)
            .field("header_title", &self.header_title)
            .field("schemes", &self.schemes.len())
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

/// Builder for [`SchemeSet`].
///
/// Schemes are added through their builders. A builder that fails validation
/// is logged and left out of the set; the set itself is still built.
pub struct SchemeSetBuilder<V: TableView> {
    id: SchemeSetId,
    header_title: Option<String>,
    footer_text: Option<String>,
    header_view: Option<V::SectionView>,
    footer_view: Option<V::SectionView>,
    schemes: Vec<AttributedScheme<V>>,
    hidden: bool,
}

impl<V: TableView> Default for SchemeSetBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: TableView> SchemeSetBuilder<V> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            id: SchemeSetId::next(),
            header_title: None,
            footer_text: None,
            header_view: None,
            footer_view: None,
            schemes: Vec::new(),
            hidden: false,
        }
    }

    /// Handle the built set will carry.
    pub fn id(&self) -> SchemeSetId {
        self.id
    }

    /// Sets the section header text.
    pub fn header_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.header_title = Some(title.into());
        self
    }

    /// Sets the section footer text.
    pub fn footer_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.footer_text = Some(text.into());
        self
    }

    /// Sets a custom section header view.
    pub fn header_view(&mut self, view: V::SectionView) -> &mut Self {
        self.header_view = Some(view);
        self
    }

    /// Sets a custom section footer view.
    pub fn footer_view(&mut self, view: V::SectionView) -> &mut Self {
        self.footer_view = Some(view);
        self
    }

    /// Makes the set start out hidden.
    pub fn hidden(&mut self, hidden: bool) -> &mut Self {
        self.hidden = hidden;
        self
    }

    /// Builds and appends a visible scheme.
    ///
    /// Returns `None` if the builder failed validation; the failure is logged
    /// and the scheme is not part of the set.
    pub fn add_scheme<B>(&mut self, builder: B) -> Option<SchemeId>
    where
        B: SchemeBuilder<V>,
    {
        self.admit(builder, false)
    }

    /// Builds and appends a scheme that starts out hidden.
    pub fn add_hidden_scheme<B>(&mut self, builder: B) -> Option<SchemeId>
    where
        B: SchemeBuilder<V>,
    {
        self.admit(builder, true)
    }

    /// Appends an already built scheme, such as a custom [`Scheme`] impl.
    pub fn add_custom<S>(&mut self, scheme: S) -> SchemeId
    where
        S: Scheme<V>,
    {
        self.push(Box::new(scheme), false)
    }

    /// Appends an already built scheme that starts out hidden.
    pub fn add_hidden_custom<S>(&mut self, scheme: S) -> SchemeId
    where
        S: Scheme<V>,
    {
        self.push(Box::new(scheme), true)
    }

    /// Finishes the set.
    pub fn build(self) -> SchemeSet<V> {
        tracing::debug!(
            target: targets::BUILD,
            set = self.id.raw(),
            schemes = self.schemes.len(),
            hidden = self.hidden,
            "scheme set built"
        );
        SchemeSet {
            id: self.id,
            header_title: self.header_title,
            footer_text: self.footer_text,
            header_view: self.header_view,
            footer_view: self.footer_view,
            schemes: self.schemes,
            hidden: self.hidden,
        }
    }

    fn admit<B>(&mut self, builder: B, hidden: bool) -> Option<SchemeId>
    where
        B: SchemeBuilder<V>,
    {
        match builder.build() {
            Ok(scheme) => Some(self.push(Box::new(scheme), hidden)),
            Err(error) => {
                tracing::warn!(
                    target: targets::BUILD,
                    set = self.id.raw(),
                    %error,
                    "scheme rejected"
                );
                None
            }
        }
    }

    fn push(&mut self, scheme: Box<dyn Scheme<V>>, hidden: bool) -> SchemeId {
        let id = SchemeId::next();
        tracing::trace!(
            target: targets::BUILD,
            set = self.id.raw(),
            scheme = id.raw(),
            kind = scheme.kind(),
            hidden,
            "scheme admitted"
        );
        self.schemes.push(AttributedScheme { id, scheme, hidden });
        id
    }
}
