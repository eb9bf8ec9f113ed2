//! Row change inference from two ordered identity lists.
//!
//! [`infer_row_changes`] turns "the rows used to be these, now they are
//! those" into the moves, insertions and deletions a list widget needs:
//!
//! 1. **Matching**: each old identity, in old order, claims the first
//!    unclaimed equal identity in the new list. Old rows with no match are
//!    deleted, new rows nobody claimed are inserted.
//! 2. **Anchor chain**: the longest run of matches whose new positions are
//!    increasing in old order keeps its relative order and does not move.
//! 3. **Moves**: every other match is a move.
//!
//! Deletions use old positions and insertions new positions, which is what a
//! host batch expects.

/// One row moving from an old to a new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMove {
    /// Position before the change.
    pub from: usize,
    /// Position after the change.
    pub to: usize,
}

/// The row operations that turn one ordered list into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowChanges {
    /// Moved rows, in old order.
    pub moves: Vec<RowMove>,
    /// New positions of added rows, ascending.
    pub insertions: Vec<usize>,
    /// Old positions of removed rows, ascending.
    pub deletions: Vec<usize>,
}

impl RowChanges {
    /// Whether the two lists were identical.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.insertions.is_empty() && self.deletions.is_empty()
    }
}

/// Works out how `before` became `after`.
///
/// Duplicate identities are matched first-come first-served: the n-th
/// occurrence in `before` pairs with the n-th occurrence in `after`.
///
/// ```
/// use table_scheme::{RowMove, infer_row_changes};
///
/// let changes = infer_row_changes(&["a", "b", "c"], &["b", "a", "c"]);
/// assert_eq!(changes.moves, vec![RowMove { from: 0, to: 1 }]);
/// assert!(changes.insertions.is_empty());
/// assert!(changes.deletions.is_empty());
/// ```
pub fn infer_row_changes<T: PartialEq>(before: &[T], after: &[T]) -> RowChanges {
    let mut claimed = vec![false; after.len()];
    let mut matches: Vec<RowMove> = Vec::new();
    let mut deletions = Vec::new();

    for (from, identity) in before.iter().enumerate() {
        let found = after
            .iter()
            .enumerate()
            .position(|(to, candidate)| !claimed[to] && candidate == identity);
        match found {
            Some(to) => {
                claimed[to] = true;
                matches.push(RowMove { from, to });
            }
            None => deletions.push(from),
        }
    }

    let insertions = claimed
        .iter()
        .enumerate()
        .filter(|(_, claimed)| !**claimed)
        .map(|(to, _)| to)
        .collect();

    let targets: Vec<usize> = matches.iter().map(|m| m.to).collect();
    let mut anchored = vec![false; matches.len()];
    for index in longest_increasing_subsequence(&targets) {
        anchored[index] = true;
    }
    let moves = matches
        .into_iter()
        .zip(anchored)
        .filter(|(_, anchored)| !anchored)
        .map(|(row_move, _)| row_move)
        .collect();

    RowChanges {
        moves,
        insertions,
        deletions,
    }
}

/// Indices into `values` of one longest strictly increasing subsequence.
///
/// Patience sorting with predecessor links, rebuilt from the last pile.
fn longest_increasing_subsequence(values: &[usize]) -> Vec<usize> {
    // tails[k]: index of the smallest value ending an increasing run of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessors: Vec<Option<usize>> = vec![None; values.len()];

    for (index, &value) in values.iter().enumerate() {
        let pile = tails.partition_point(|&tail| values[tail] < value);
        if pile > 0 {
            predecessors[index] = Some(tails[pile - 1]);
        }
        if pile == tails.len() {
            tails.push(index);
        } else {
            tails[pile] = index;
        }
    }

    let mut chain = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(index) = cursor {
        chain.push(index);
        cursor = predecessors[index];
    }
    chain.reverse();
    chain
}
