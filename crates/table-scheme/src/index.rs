//! Coordinates and handles for addressing the scheme tree.
//!
//! [`IndexPath`] is the flat `(section, row)` coordinate the host widget
//! speaks. [`SchemeId`] and [`SchemeSetId`] are stable handles for nodes of
//! the scheme tree; unlike index paths they survive visibility changes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A global counter for generating unique scheme and scheme set handles.
static HANDLE_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_handle() -> u64 {
    HANDLE_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A flat `(section, row)` coordinate as seen by the host widget.
///
/// Index paths describe the *current* visible layout. They are only
/// meaningful until the next visibility or row change.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    /// Visible section index.
    pub section: usize,
    /// Row index within the visible section.
    pub row: usize,
}

impl IndexPath {
    /// Creates an index path.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Returns the index path `rows` rows further down in the same section.
    #[inline]
    pub const fn offset(self, rows: usize) -> Self {
        Self::new(self.section, self.row + rows)
    }
}

impl fmt::Debug for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

/// Handle of a scheme admitted to a [`SchemeSet`](crate::SchemeSet).
///
/// Returned by the scheme set builder and accepted by every
/// [`TableScheme`](crate::TableScheme) operation that targets one scheme.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemeId(u64);

impl SchemeId {
    pub(crate) fn next() -> Self {
        Self(next_handle())
    }

    /// Raw numeric value, for logging.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemeId({})", self.0)
    }
}

/// Handle of a [`SchemeSet`](crate::SchemeSet).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemeSetId(u64);

impl SchemeSetId {
    pub(crate) fn next() -> Self {
        Self(next_handle())
    }

    /// Raw numeric value, for logging.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SchemeSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemeSetId({})", self.0)
    }
}
