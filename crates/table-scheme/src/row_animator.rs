//! Recording of row changes inside one scheme.

use std::ops::Range;

use crate::animation::{AnimationGroups, RowAnimation};
use crate::diff::{RowChanges, RowMove};

/// Records row moves, insertions and deletions for one scheme.
///
/// Handed out by [`TableScheme::animate_changes`](crate::TableScheme::animate_changes)
/// together with the scheme itself. All indices are relative to the scheme:
/// deletions and move sources use positions before the change, insertions
/// and move destinations positions after it.
///
/// ```ignore
/// table.animate_changes::<ArrayScheme<MyView, String>, _>(&mut view, id, |scheme, animator| {
///     scheme.objects_mut().insert(0, "new".into());
///     animator.insert_row(0, RowAnimation::Top);
/// });
/// ```
#[derive(Debug, Default)]
pub struct SchemeRowAnimator {
    moves: Vec<RowMove>,
    insertions: AnimationGroups<usize>,
    deletions: AnimationGroups<usize>,
}

impl SchemeRowAnimator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Builds a recorder from inferred changes.
    pub(crate) fn from_changes(changes: &RowChanges, animation: RowAnimation) -> Self {
        let mut animator = Self::new();
        animator.moves.extend_from_slice(&changes.moves);
        animator
            .insertions
            .extend(animation, changes.insertions.iter().copied());
        animator
            .deletions
            .extend(animation, changes.deletions.iter().copied());
        animator
    }

    /// Records a row moving from `from` to `to`.
    pub fn move_row(&mut self, from: usize, to: usize) -> &mut Self {
        self.moves.push(RowMove { from, to });
        self
    }

    /// Records an inserted row.
    pub fn insert_row(&mut self, at: usize, animation: RowAnimation) -> &mut Self {
        self.insertions.push(animation, at);
        self
    }

    /// Records a run of inserted rows.
    pub fn insert_rows(&mut self, rows: Range<usize>, animation: RowAnimation) -> &mut Self {
        self.insertions.extend(animation, rows);
        self
    }

    /// Records a deleted row.
    pub fn delete_row(&mut self, at: usize, animation: RowAnimation) -> &mut Self {
        self.deletions.push(animation, at);
        self
    }

    /// Records a run of deleted rows.
    pub fn delete_rows(&mut self, rows: Range<usize>, animation: RowAnimation) -> &mut Self {
        self.deletions.extend(animation, rows);
        self
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.insertions.is_empty() && self.deletions.is_empty()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (Vec<RowMove>, AnimationGroups<usize>, AnimationGroups<usize>) {
        (self.moves, self.insertions, self.deletions)
    }
}
