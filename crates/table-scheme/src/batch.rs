//! Batched visibility changes.
//!
//! A batch collects show, hide and reload requests for schemes and scheme
//! sets and sends the host a single `begin_updates`/`end_updates` bracket
//! when it commits:
//!
//! 1. Shows and hides are kept apart. Flags change shows first, then hides,
//!    so a target both shown and hidden in one batch ends up hidden.
//!    Requests that would not change a flag are dropped.
//! 2. Section operations win over row operations. Row changes for schemes
//!    whose set is shown, hidden or reloaded in the same batch are not sent;
//!    a reload of a set or scheme that is also shown or hidden is dropped.
//! 3. Deletions and reloads are computed against the layout before the
//!    batch. Then all flags change, shows first. Insertions are computed
//!    against the layout after the batch.
//! 4. Items are grouped by animation, one host call per kind and animation.

use table_scheme_core::logging::{PerfSpan, span_names, targets};

use crate::animation::{AnimationGroups, RowAnimation};
use crate::index::{IndexPath, SchemeId, SchemeSetId};
use crate::table_scheme::{SchemePosition, TableScheme};
use crate::view::TableView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Scheme(SchemeId),
    SchemeSet(SchemeSetId),
}

#[derive(Debug, Clone, Copy)]
struct Request {
    target: Target,
    animation: RowAnimation,
}

/// One request per target; a repeated request only updates the animation.
fn record(requests: &mut Vec<Request>, target: Target, animation: RowAnimation) {
    match requests.iter_mut().find(|r| r.target == target) {
        Some(existing) => existing.animation = animation,
        None => requests.push(Request { target, animation }),
    }
}

/// Records visibility changes for
/// [`TableScheme::batch_visibility_changes`].
#[derive(Debug, Default)]
pub struct BatchAnimator {
    shows: Vec<Request>,
    hides: Vec<Request>,
    reloads: Vec<Request>,
}

impl BatchAnimator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Shows scheme `id`.
    pub fn show_scheme(&mut self, id: SchemeId, animation: RowAnimation) -> &mut Self {
        record(&mut self.shows, Target::Scheme(id), animation);
        self
    }

    /// Hides scheme `id`.
    pub fn hide_scheme(&mut self, id: SchemeId, animation: RowAnimation) -> &mut Self {
        record(&mut self.hides, Target::Scheme(id), animation);
        self
    }

    /// Reloads the rows of scheme `id`.
    pub fn reload_scheme(&mut self, id: SchemeId, animation: RowAnimation) -> &mut Self {
        record(&mut self.reloads, Target::Scheme(id), animation);
        self
    }

    /// Shows scheme set `id`.
    pub fn show_scheme_set(&mut self, id: SchemeSetId, animation: RowAnimation) -> &mut Self {
        record(&mut self.shows, Target::SchemeSet(id), animation);
        self
    }

    /// Hides scheme set `id`.
    pub fn hide_scheme_set(&mut self, id: SchemeSetId, animation: RowAnimation) -> &mut Self {
        record(&mut self.hides, Target::SchemeSet(id), animation);
        self
    }

    /// Reloads the section of scheme set `id`.
    pub fn reload_scheme_set(&mut self, id: SchemeSetId, animation: RowAnimation) -> &mut Self {
        record(&mut self.reloads, Target::SchemeSet(id), animation);
        self
    }

    /// Whether nothing was requested.
    pub fn is_empty(&self) -> bool {
        self.shows.is_empty() && self.hides.is_empty() && self.reloads.is_empty()
    }

    /// Applies the recorded changes to `table` and tells `view`.
    ///
    /// Returns the number of requests that took effect.
    pub(crate) fn commit<V: TableView>(self, table: &mut TableScheme<V>, view: &mut V) -> usize {
        if self.is_empty() {
            return 0;
        }
        let _span = PerfSpan::new(span_names::BATCH);

        // Resolve handles and keep the flag flips. Hides are applied after
        // shows, so a target with both ends hidden.
        let hidden_later = |target: Target| self.hides.iter().any(|r| r.target == target);
        let mut scheme_changes: Vec<(SchemeId, SchemePosition, bool, RowAnimation)> = Vec::new();
        let mut set_changes: Vec<(SchemeSetId, usize, bool, RowAnimation)> = Vec::new();
        let requests = self
            .shows
            .iter()
            .filter(|request| !hidden_later(request.target))
            .map(|request| (request, true))
            .chain(self.hides.iter().map(|request| (request, false)));
        for (request, visible) in requests {
            match request.target {
                Target::Scheme(id) => {
                    let position = table.locate(id);
                    if table.is_hidden_at(position) == visible {
                        scheme_changes.push((id, position, visible, request.animation));
                    }
                }
                Target::SchemeSet(id) => {
                    let index = table.set_index(id);
                    if table.is_set_hidden_at(index) == visible {
                        set_changes.push((id, index, visible, request.animation));
                    }
                }
            }
        }

        let mut set_reloads: Vec<(usize, RowAnimation)> = Vec::new();
        let mut scheme_reloads: Vec<(SchemePosition, RowAnimation)> = Vec::new();
        for request in &self.reloads {
            match request.target {
                Target::SchemeSet(id) => {
                    let index = table.set_index(id);
                    if !set_changes.iter().any(|(_, changed, _, _)| *changed == index) {
                        set_reloads.push((index, request.animation));
                    }
                }
                Target::Scheme(id) => {
                    let position = table.locate(id);
                    if !scheme_changes.iter().any(|(changed, _, _, _)| *changed == id) {
                        scheme_reloads.push((position, request.animation));
                    }
                }
            }
        }

        let covered_by_section = |set: usize| {
            set_changes.iter().any(|(_, index, _, _)| *index == set)
                || set_reloads.iter().any(|(index, _)| *index == set)
        };
        let row_changes: Vec<(SchemePosition, bool, RowAnimation)> = scheme_changes
            .iter()
            .filter(|(_, position, _, _)| !covered_by_section(position.set))
            .map(|(_, position, visible, animation)| (*position, *visible, *animation))
            .collect();
        scheme_reloads.retain(|(position, _)| !covered_by_section(position.set));

        // Before the flags change.
        let mut deleted_sections = AnimationGroups::new();
        let mut reloaded_sections = AnimationGroups::new();
        let mut deleted_rows: AnimationGroups<IndexPath> = AnimationGroups::new();
        let mut reloaded_rows: AnimationGroups<IndexPath> = AnimationGroups::new();

        for (_, index, visible, animation) in &set_changes {
            if !visible {
                deleted_sections.extend(*animation, table.section_of(*index));
            }
        }
        for (index, animation) in &set_reloads {
            reloaded_sections.extend(*animation, table.section_of(*index));
        }
        for (position, visible, animation) in &row_changes {
            if !visible {
                deleted_rows.extend(*animation, table.index_paths_at(*position));
            }
        }
        for (position, animation) in &scheme_reloads {
            reloaded_rows.extend(*animation, table.index_paths_at(*position));
        }

        // Shows first, then hides.
        for showing in [true, false] {
            for (_, position, visible, _) in &scheme_changes {
                if *visible == showing {
                    table.set_scheme_hidden(*position, !visible);
                }
            }
            for (_, index, visible, _) in &set_changes {
                if *visible == showing {
                    table.set_set_hidden(*index, !visible);
                }
            }
        }

        // After the flags change.
        let mut inserted_sections = AnimationGroups::new();
        let mut inserted_rows: AnimationGroups<IndexPath> = AnimationGroups::new();
        for (_, index, visible, animation) in &set_changes {
            if *visible {
                inserted_sections.extend(*animation, table.section_of(*index));
            }
        }
        for (position, visible, animation) in &row_changes {
            if *visible {
                inserted_rows.extend(*animation, table.index_paths_at(*position));
            }
        }

        let has_host_changes = !(deleted_sections.is_empty()
            && inserted_sections.is_empty()
            && reloaded_sections.is_empty()
            && deleted_rows.is_empty()
            && inserted_rows.is_empty()
            && reloaded_rows.is_empty());

        if has_host_changes {
            tracing::debug!(
                target: targets::VISIBILITY,
                deleted_sections = deleted_sections.len(),
                inserted_sections = inserted_sections.len(),
                reloaded_sections = reloaded_sections.len(),
                deleted_rows = deleted_rows.len(),
                inserted_rows = inserted_rows.len(),
                reloaded_rows = reloaded_rows.len(),
                "committing visibility batch"
            );

            view.begin_updates();
            for (animation, sections) in deleted_sections.iter() {
                view.delete_sections(sections, animation);
            }
            for (animation, sections) in inserted_sections.iter() {
                view.insert_sections(sections, animation);
            }
            for (animation, sections) in reloaded_sections.iter() {
                view.reload_sections(sections, animation);
            }
            for (animation, rows) in deleted_rows.iter() {
                view.delete_rows(rows, animation);
            }
            for (animation, rows) in inserted_rows.iter() {
                view.insert_rows(rows, animation);
            }
            for (animation, rows) in reloaded_rows.iter() {
                view.reload_rows(rows, animation);
            }
            view.end_updates();
        }

        let signals = table.signals();
        for (id, _, visible, _) in &scheme_changes {
            signals.scheme_visibility_changed.emit((*id, *visible));
        }
        for (id, _, visible, _) in &set_changes {
            signals.scheme_set_visibility_changed.emit((*id, *visible));
        }

        let applied = scheme_changes.len()
            + set_changes.len()
            + reloaded_sections.len()
            + scheme_reloads
                .iter()
                .filter(|(position, _)| table.visible_section_of(*position).is_some())
                .count();
        if applied > 0 {
            signals.batch_committed.emit(applied);
        }
        applied
    }
}
