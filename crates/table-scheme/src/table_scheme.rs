//! The mediator between a scheme tree and the host widget.

use std::any::type_name;

use table_scheme_core::logging::{PerfSpan, span_names, targets};

use crate::animation::RowAnimation;
use crate::batch::BatchAnimator;
use crate::diff::infer_row_changes;
use crate::height::RowHeight;
use crate::index::{IndexPath, SchemeId, SchemeSetId};
use crate::row_animator::SchemeRowAnimator;
use crate::scheme::{InferrableIdentity, Scheme, SelectionContext};
use crate::scheme_set::SchemeSet;
use crate::signals::TableSchemeSignals;
use crate::view::TableView;

/// Where a flat coordinate lands in the scheme tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLocation {
    /// The set displayed as the coordinate's section.
    pub set: SchemeSetId,
    /// The scheme owning the row.
    pub scheme: SchemeId,
    /// Row index relative to the scheme.
    pub relative: usize,
}

/// Position of a scheme inside the tree: set index, then scheme index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SchemePosition {
    pub(crate) set: usize,
    pub(crate) scheme: usize,
}

/// Answers the host widget's questions from a tree of scheme sets and
/// animates changes to that tree.
///
/// Sections are the non-hidden scheme sets, in order. A section's rows are
/// the rows of its non-hidden schemes, in order. Every coordinate is computed
/// from the current hidden flags and row counts; nothing is cached.
///
/// # Visibility
///
/// Schemes and scheme sets are shown, hidden and reloaded one at a time with
/// [`show_scheme`](Self::show_scheme) and friends, or together with
/// [`batch_visibility_changes`](Self::batch_visibility_changes). Each single
/// call makes at most one host call.
///
/// # Row changes
///
/// A scheme whose row count changes must announce it through
/// [`animate_changes`](Self::animate_changes),
/// [`animate_inferred`](Self::animate_inferred) or a reload.
///
/// # Panics
///
/// Every method taking a coordinate panics if it is outside the current
/// layout. Every method taking a handle panics if the handle does not belong
/// to this table.
pub struct TableScheme<V: TableView> {
    sets: Vec<SchemeSet<V>>,
    signals: TableSchemeSignals,
}

impl<V: TableView> TableScheme<V> {
    /// Creates a table scheme displaying `sets` in order.
    pub fn new(sets: Vec<SchemeSet<V>>) -> Self {
        tracing::debug!(
            target: targets::BUILD,
            sets = sets.len(),
            schemes = sets.iter().map(SchemeSet::scheme_count).sum::<usize>(),
            "table scheme created"
        );
        Self {
            sets,
            signals: TableSchemeSignals::new(),
        }
    }

    /// Change notifications.
    pub fn signals(&self) -> &TableSchemeSignals {
        &self.signals
    }

    /// All scheme sets, hidden ones included.
    pub fn scheme_sets(&self) -> &[SchemeSet<V>] {
        &self.sets
    }

    // -------------------------------------------------------------------------
    // Layout queries
    // -------------------------------------------------------------------------

    /// Number of visible sections.
    pub fn section_count(&self) -> usize {
        self.sets.iter().filter(|set| !set.hidden).count()
    }

    /// Number of visible rows in `section`.
    pub fn row_count(&self, section: usize) -> usize {
        self.scheme_set_at(section).visible_row_count()
    }

    /// The scheme set displayed as `section`.
    pub fn scheme_set_at(&self, section: usize) -> &SchemeSet<V> {
        &self.sets[self.set_index_for_section(section)]
    }

    /// The scheme set with handle `id`.
    pub fn scheme_set(&self, id: SchemeSetId) -> &SchemeSet<V> {
        &self.sets[self.set_index(id)]
    }

    /// Header text of `section`.
    pub fn header_title(&self, section: usize) -> Option<&str> {
        self.scheme_set_at(section).header_title()
    }

    /// Footer text of `section`.
    pub fn footer_text(&self, section: usize) -> Option<&str> {
        self.scheme_set_at(section).footer_text()
    }

    /// Custom header view of `section`.
    pub fn header_view(&self, section: usize) -> Option<&V::SectionView> {
        self.scheme_set_at(section).header_view()
    }

    /// Custom footer view of `section`.
    pub fn footer_view(&self, section: usize) -> Option<&V::SectionView> {
        self.scheme_set_at(section).footer_view()
    }

    /// Resolves a flat coordinate to its set, scheme and relative row.
    pub fn resolve(&self, at: IndexPath) -> RowLocation {
        let (position, relative) = self.position_at(at);
        let set = &self.sets[position.set];
        RowLocation {
            set: set.id(),
            scheme: set.schemes[position.scheme].id,
            relative,
        }
    }

    /// The scheme displaying the row at `at`.
    pub fn scheme_at(&self, at: IndexPath) -> &dyn Scheme<V> {
        let (position, _) = self.position_at(at);
        self.attributed(position).scheme.as_ref()
    }

    /// Rows of the visible schemes in front of `id` within its set.
    pub fn rows_before(&self, id: SchemeId) -> usize {
        let position = self.locate(id);
        self.sets[position.set].rows_before(position.scheme)
    }

    /// The section displaying set `id`, or `None` while the set is hidden.
    pub fn section_for_set(&self, id: SchemeSetId) -> Option<usize> {
        self.section_of(self.set_index(id))
    }

    /// The section displaying the set that owns `id`, or `None` while that
    /// set is hidden.
    pub fn section_for_scheme(&self, id: SchemeId) -> Option<usize> {
        self.section_of(self.locate(id).set)
    }

    /// The coordinates the rows of `id` occupy right now.
    ///
    /// Empty while the scheme or its set is hidden.
    pub fn index_paths_for_scheme(&self, id: SchemeId) -> Vec<IndexPath> {
        self.index_paths_at(self.locate(id))
    }

    /// Whether scheme `id` itself is hidden.
    pub fn is_scheme_hidden(&self, id: SchemeId) -> bool {
        self.attributed(self.locate(id)).hidden
    }

    /// Whether scheme set `id` is hidden.
    pub fn is_scheme_set_hidden(&self, id: SchemeSetId) -> bool {
        self.sets[self.set_index(id)].hidden
    }

    /// Typed access to scheme `id`.
    ///
    /// # Panics
    ///
    /// Panics if the scheme is not an `S`.
    pub fn scheme<S: Scheme<V>>(&self, id: SchemeId) -> &S {
        self.attributed(self.locate(id))
            .scheme
            .as_any()
            .downcast_ref::<S>()
            .unwrap_or_else(|| panic!("scheme {id:?} is not a {}", type_name::<S>()))
    }

    /// Typed mutable access to scheme `id`.
    ///
    /// Changing the row count through this reference desynchronizes the
    /// host; use [`animate_changes`](Self::animate_changes) for that.
    ///
    /// # Panics
    ///
    /// Panics if the scheme is not an `S`.
    pub fn scheme_mut<S: Scheme<V>>(&mut self, id: SchemeId) -> &mut S {
        let position = self.locate(id);
        self.downcast_mut(position, id)
    }

    /// The scheme displaying `row`, if the host knows where `row` is.
    pub fn scheme_containing(&self, view: &V, row: &V::Row) -> Option<&dyn Scheme<V>> {
        self.scheme_with_index_containing(view, row)
            .map(|(scheme, _)| scheme)
    }

    /// The scheme displaying `row` and the row's index relative to it.
    pub fn scheme_with_index_containing(
        &self,
        view: &V,
        row: &V::Row,
    ) -> Option<(&dyn Scheme<V>, usize)> {
        let at = view.index_path_for_row(row)?;
        let (position, relative) = self.position_at(at);
        Some((self.attributed(position).scheme.as_ref(), relative))
    }

    // -------------------------------------------------------------------------
    // Host callbacks
    // -------------------------------------------------------------------------

    /// Produces the configured row for `at`.
    pub fn populate_row(&self, view: &mut V, at: IndexPath) -> V::Row {
        let (position, relative) = self.position_at(at);
        self.attributed(position)
            .scheme
            .dequeue_row(view, at, relative)
    }

    /// Routes a tap on the row at `at` to its scheme.
    ///
    /// The scheme receives the live row the host shows at `at`. If the host
    /// has none (the row is off screen), a freshly populated one is used.
    pub fn handle_selection(&mut self, view: &mut V, at: IndexPath) {
        let (position, relative) = self.position_at(at);
        let row_offset = self.sets[position.set].rows_before(position.scheme);
        let attributed = &mut self.sets[position.set].schemes[position.scheme];

        let row = match view.row_at(at) {
            Some(row) => row,
            None => attributed.scheme.dequeue_row(view, at, relative),
        };

        tracing::debug!(
            target: targets::SELECTION,
            ?at,
            scheme = attributed.id.raw(),
            kind = attributed.scheme.kind(),
            relative,
            "row selected"
        );

        let mut ctx = SelectionContext::new(view, row, at.section, row_offset, relative);
        attributed.scheme.select_row(&mut ctx);
    }

    /// Height of the row at `at`.
    pub fn height_for_row(&self, at: IndexPath) -> RowHeight {
        let (position, relative) = self.position_at(at);
        self.attributed(position).scheme.height_for_row(relative)
    }

    /// Whether the user may start dragging the row at `at`.
    pub fn can_move_row(&self, at: IndexPath) -> bool {
        let (position, _) = self.position_at(at);
        self.attributed(position).scheme.is_reorderable()
    }

    /// Where a row dragged from `from` may land when the user points at
    /// `proposed`.
    ///
    /// Rows never leave their scheme: proposals above the scheme snap to its
    /// first row, proposals below it to its last row.
    pub fn target_for_move(&self, from: IndexPath, proposed: IndexPath) -> IndexPath {
        let (position, _) = self.position_at(from);
        let first = self.sets[position.set].rows_before(position.scheme);
        let last = first + self.attributed(position).scheme.row_count() - 1;

        let row = if proposed.section < from.section {
            first
        } else if proposed.section > from.section {
            last
        } else {
            proposed.row.clamp(first, last)
        };
        IndexPath::new(from.section, row)
    }

    /// Applies a drag-drop reorder the host has already shown.
    ///
    /// # Panics
    ///
    /// Panics if `to` is not a row of the scheme displaying `from`.
    pub fn move_row(&mut self, view: &mut V, from: IndexPath, to: IndexPath) {
        let (position, relative_from) = self.position_at(from);
        let first = self.sets[position.set].rows_before(position.scheme);
        let attributed = &mut self.sets[position.set].schemes[position.scheme];
        let count = attributed.scheme.row_count();

        assert!(
            to.section == from.section && to.row >= first && to.row < first + count,
            "cannot move {from:?} to {to:?}: rows stay inside scheme {:?}",
            attributed.id
        );
        if from == to {
            return;
        }

        tracing::debug!(
            target: targets::ANIMATION,
            ?from,
            ?to,
            scheme = attributed.id.raw(),
            "row reordered"
        );
        attributed
            .scheme
            .reorder_row(view, relative_from, to.row - first);
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Shows a hidden scheme, inserting its rows.
    pub fn show_scheme(&mut self, view: &mut V, id: SchemeId, animation: RowAnimation) {
        let position = self.locate(id);
        if !self.attributed(position).hidden {
            return;
        }

        self.set_scheme_hidden(position, false);
        let rows = self.index_paths_at(position);
        if !rows.is_empty() {
            tracing::debug!(target: targets::VISIBILITY, scheme = id.raw(), ?rows, ?animation, "show scheme");
            view.insert_rows(&rows, animation);
        }
        self.signals.scheme_visibility_changed.emit((id, true));
    }

    /// Hides a visible scheme, deleting its rows.
    pub fn hide_scheme(&mut self, view: &mut V, id: SchemeId, animation: RowAnimation) {
        let position = self.locate(id);
        if self.attributed(position).hidden {
            return;
        }

        let rows = self.index_paths_at(position);
        self.set_scheme_hidden(position, true);
        if !rows.is_empty() {
            tracing::debug!(target: targets::VISIBILITY, scheme = id.raw(), ?rows, ?animation, "hide scheme");
            view.delete_rows(&rows, animation);
        }
        self.signals.scheme_visibility_changed.emit((id, false));
    }

    /// Reloads every row of a visible scheme.
    ///
    /// The scheme's row count must not have changed since the host last
    /// heard about it.
    pub fn reload_scheme(&mut self, view: &mut V, id: SchemeId, animation: RowAnimation) {
        let rows = self.index_paths_for_scheme(id);
        if !rows.is_empty() {
            tracing::debug!(target: targets::VISIBILITY, scheme = id.raw(), ?rows, ?animation, "reload scheme");
            view.reload_rows(&rows, animation);
        }
    }

    /// Shows a hidden scheme set, inserting its section.
    pub fn show_scheme_set(&mut self, view: &mut V, id: SchemeSetId, animation: RowAnimation) {
        let index = self.set_index(id);
        if !self.sets[index].hidden {
            return;
        }

        self.sets[index].hidden = false;
        if let Some(section) = self.section_of(index) {
            tracing::debug!(target: targets::VISIBILITY, set = id.raw(), section, ?animation, "show scheme set");
            view.insert_sections(&[section], animation);
        }
        self.signals.scheme_set_visibility_changed.emit((id, true));
    }

    /// Hides a visible scheme set, deleting its section.
    pub fn hide_scheme_set(&mut self, view: &mut V, id: SchemeSetId, animation: RowAnimation) {
        let index = self.set_index(id);
        let Some(section) = self.section_of(index) else {
            return;
        };

        self.sets[index].hidden = true;
        tracing::debug!(target: targets::VISIBILITY, set = id.raw(), section, ?animation, "hide scheme set");
        view.delete_sections(&[section], animation);
        self.signals.scheme_set_visibility_changed.emit((id, false));
    }

    /// Reloads the section of a visible scheme set.
    pub fn reload_scheme_set(&mut self, view: &mut V, id: SchemeSetId, animation: RowAnimation) {
        if let Some(section) = self.section_for_set(id) {
            tracing::debug!(target: targets::VISIBILITY, set = id.raw(), section, ?animation, "reload scheme set");
            view.reload_sections(&[section], animation);
        }
    }

    /// Records several visibility changes and sends them to the host as one
    /// batch.
    ///
    /// ```ignore
    /// table.batch_visibility_changes(&mut view, |batch| {
    ///     batch.hide_scheme(details, RowAnimation::Fade);
    ///     batch.show_scheme_set(advanced, RowAnimation::Top);
    /// });
    /// ```
    ///
    /// See [`BatchAnimator`] for how the requests are combined.
    pub fn batch_visibility_changes<R>(
        &mut self,
        view: &mut V,
        record: impl FnOnce(&mut BatchAnimator) -> R,
    ) -> R {
        let mut batch = BatchAnimator::new();
        let result = record(&mut batch);
        batch.commit(self, view);
        result
    }

    // -------------------------------------------------------------------------
    // Row animation
    // -------------------------------------------------------------------------

    /// Changes scheme `id` and animates the rows the change touched.
    ///
    /// `change` receives the scheme and a recorder for its row changes. The
    /// recorded changes are sent to the host as one batch: moves, then
    /// insertions, then deletions. Nothing is sent while the scheme or its
    /// set is hidden.
    ///
    /// # Panics
    ///
    /// Panics if the scheme is not an `S`.
    pub fn animate_changes<S, R>(
        &mut self,
        view: &mut V,
        id: SchemeId,
        change: impl FnOnce(&mut S, &mut SchemeRowAnimator) -> R,
    ) -> R
    where
        S: Scheme<V>,
    {
        let position = self.locate(id);
        let mut animator = SchemeRowAnimator::new();
        let result = change(self.downcast_mut::<S>(position, id), &mut animator);
        self.commit_row_animation(view, id, position, animator);
        result
    }

    /// Changes scheme `id` and animates the difference between its row
    /// identities before and after.
    ///
    /// Inserted and deleted rows use `animation`; moves have no style.
    ///
    /// # Panics
    ///
    /// Panics if the scheme is not an `S`, or if its identity count differs
    /// from its row count before or after `change`.
    pub fn animate_inferred<S, R>(
        &mut self,
        view: &mut V,
        id: SchemeId,
        animation: RowAnimation,
        change: impl FnOnce(&mut S) -> R,
    ) -> R
    where
        S: Scheme<V> + InferrableIdentity,
    {
        let position = self.locate(id);
        let scheme = self.downcast_mut::<S>(position, id);

        let before = scheme.row_identities();
        assert_eq!(
            before.len(),
            scheme.row_count(),
            "scheme {id:?} has {} identities for {} rows",
            before.len(),
            scheme.row_count()
        );
        let result = change(&mut *scheme);
        let after = scheme.row_identities();
        assert_eq!(
            after.len(),
            scheme.row_count(),
            "scheme {id:?} has {} identities for {} rows after the change",
            after.len(),
            scheme.row_count()
        );

        let changes = infer_row_changes(&before, &after);
        let animator = SchemeRowAnimator::from_changes(&changes, animation);
        self.commit_row_animation(view, id, position, animator);
        result
    }

    fn commit_row_animation(
        &self,
        view: &mut V,
        id: SchemeId,
        position: SchemePosition,
        animator: SchemeRowAnimator,
    ) {
        if animator.is_empty() {
            return;
        }
        let Some(section) = self.visible_section_of(position) else {
            tracing::trace!(target: targets::ANIMATION, scheme = id.raw(), "scheme hidden, row changes not sent");
            return;
        };

        let _span = PerfSpan::new(span_names::ROW_ANIMATION);
        let offset = self.sets[position.set].rows_before(position.scheme);
        let path = |row: usize| IndexPath::new(section, offset + row);
        let (moves, insertions, deletions) = animator.into_parts();

        tracing::debug!(
            target: targets::ANIMATION,
            scheme = id.raw(),
            section,
            offset,
            moves = moves.len(),
            insertions = insertions.len(),
            deletions = deletions.len(),
            "committing row changes"
        );

        view.begin_updates();
        for row_move in &moves {
            view.move_row(path(row_move.from), path(row_move.to));
        }
        for (animation, rows) in insertions.map(path).iter() {
            view.insert_rows(rows, animation);
        }
        for (animation, rows) in deletions.map(path).iter() {
            view.delete_rows(rows, animation);
        }
        view.end_updates();

        self.signals.rows_animated.emit(id);
    }

    // -------------------------------------------------------------------------
    // Tree navigation
    // -------------------------------------------------------------------------

    /// Finds the one scheme with handle `id`.
    pub(crate) fn locate(&self, id: SchemeId) -> SchemePosition {
        let mut found = None;
        for (set, scheme_set) in self.sets.iter().enumerate() {
            if let Some(scheme) = scheme_set.position_of(id) {
                assert!(found.is_none(), "scheme {id:?} is owned by more than one set");
                found = Some(SchemePosition { set, scheme });
            }
        }
        found.unwrap_or_else(|| panic!("scheme {id:?} does not belong to this table"))
    }

    pub(crate) fn set_index(&self, id: SchemeSetId) -> usize {
        self.sets
            .iter()
            .position(|set| set.id() == id)
            .unwrap_or_else(|| panic!("scheme set {id:?} does not belong to this table"))
    }

    pub(crate) fn is_hidden_at(&self, position: SchemePosition) -> bool {
        self.attributed(position).hidden
    }

    pub(crate) fn is_set_hidden_at(&self, index: usize) -> bool {
        self.sets[index].hidden
    }

    pub(crate) fn set_scheme_hidden(&mut self, position: SchemePosition, hidden: bool) {
        self.sets[position.set].schemes[position.scheme].hidden = hidden;
    }

    pub(crate) fn set_set_hidden(&mut self, index: usize, hidden: bool) {
        self.sets[index].hidden = hidden;
    }

    /// Section of the set at `index`, `None` while it is hidden.
    pub(crate) fn section_of(&self, index: usize) -> Option<usize> {
        if self.sets[index].hidden {
            return None;
        }
        Some(self.sets[..index].iter().filter(|set| !set.hidden).count())
    }

    /// Section of a scheme's rows, `None` while the scheme or its set is
    /// hidden.
    pub(crate) fn visible_section_of(&self, position: SchemePosition) -> Option<usize> {
        if self.attributed(position).hidden {
            return None;
        }
        self.section_of(position.set)
    }

    pub(crate) fn index_paths_at(&self, position: SchemePosition) -> Vec<IndexPath> {
        let Some(section) = self.visible_section_of(position) else {
            return Vec::new();
        };
        let offset = self.sets[position.set].rows_before(position.scheme);
        let count = self.attributed(position).scheme.row_count();
        (offset..offset + count)
            .map(|row| IndexPath::new(section, row))
            .collect()
    }

    fn attributed(&self, position: SchemePosition) -> &crate::scheme_set::AttributedScheme<V> {
        &self.sets[position.set].schemes[position.scheme]
    }

    fn downcast_mut<S: Scheme<V>>(&mut self, position: SchemePosition, id: SchemeId) -> &mut S {
        self.sets[position.set].schemes[position.scheme]
            .scheme
            .as_any_mut()
            .downcast_mut::<S>()
            .unwrap_or_else(|| panic!("scheme {id:?} is not a {}", type_name::<S>()))
    }

    fn set_index_for_section(&self, section: usize) -> usize {
        self.sets
            .iter()
            .enumerate()
            .filter(|(_, set)| !set.hidden)
            .nth(section)
            .map(|(index, _)| index)
            .unwrap_or_else(|| {
                panic!(
                    "section {section} is out of range for {} sections",
                    self.section_count()
                )
            })
    }

    fn position_at(&self, at: IndexPath) -> (SchemePosition, usize) {
        let set = self.set_index_for_section(at.section);
        let (scheme, relative) = self.sets[set].locate_row(at.row).unwrap_or_else(|| {
            panic!(
                "row {at:?} is out of range for {} rows",
                self.sets[set].visible_row_count()
            )
        });
        (SchemePosition { set, scheme }, relative)
    }
}

impl<V: TableView> std::fmt::Debug for TableScheme<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableScheme")
            .field("sets", &self.sets)
            .field("sections", &self.section_count())
            .finish_non_exhaustive()
    }
}
