//! Change notifications emitted by [`TableScheme`](crate::TableScheme).

use table_scheme_core::Signal;

use crate::index::{SchemeId, SchemeSetId};

/// Signals emitted after a table scheme has told its host about a change.
///
/// Every signal fires once the host calls for the change have been made, so
/// slots observe the new layout. Requests that change nothing fire nothing.
#[derive(Debug)]
pub struct TableSchemeSignals {
    // -------------------------------------------------------------------------
    // Visibility signals
    // -------------------------------------------------------------------------
    /// Emitted when a scheme is shown or hidden.
    /// Args: (scheme, now visible)
    pub scheme_visibility_changed: Signal<(SchemeId, bool)>,

    /// Emitted when a scheme set is shown or hidden.
    /// Args: (scheme set, now visible)
    pub scheme_set_visibility_changed: Signal<(SchemeSetId, bool)>,

    // -------------------------------------------------------------------------
    // Row signals
    // -------------------------------------------------------------------------
    /// Emitted after an explicit or inferred row animation was committed.
    pub rows_animated: Signal<SchemeId>,

    /// Emitted after a batch of visibility changes was committed.
    /// Args: number of requests that took effect
    pub batch_committed: Signal<usize>,
}

impl Default for TableSchemeSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSchemeSignals {
    /// Creates a new set of signals with no connections.
    pub fn new() -> Self {
        Self {
            scheme_visibility_changed: Signal::new(),
            scheme_set_visibility_changed: Signal::new(),
            rows_animated: Signal::new(),
            batch_committed: Signal::new(),
        }
    }

    /// Blocks or unblocks every signal at once.
    pub fn set_blocked(&self, blocked: bool) {
        self.scheme_visibility_changed.set_blocked(blocked);
        self.scheme_set_visibility_changed.set_blocked(blocked);
        self.rows_animated.set_blocked(blocked);
        self.batch_committed.set_blocked(blocked);
    }
}
