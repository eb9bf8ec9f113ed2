//! Error types for scheme construction.
//!
//! Only configuration problems are reported as errors. Misuse of a built
//! tree (unknown handles, coordinates outside the layout) is a programming
//! error and panics.

/// Result type alias for scheme construction.
pub type Result<T> = std::result::Result<T, SchemeError>;

/// A scheme builder was missing something the scheme cannot work without.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemeError {
    /// No reuse identifier was given.
    #[error("{kind} scheme has no reuse identifier")]
    MissingReuseIdentifier { kind: &'static str },

    /// No configuration handler was given.
    #[error("{kind} scheme has no configuration handler")]
    MissingConfigurationHandler { kind: &'static str },

    /// No handler for the selected/unselected visual state was given.
    #[error("{kind} scheme has no state handler")]
    MissingStateHandler { kind: &'static str },

    /// A static scheme was built without its row.
    #[error("static scheme has no row")]
    MissingRow,

    /// A scheme that needs at least one option was given none.
    #[error("{kind} scheme has no options")]
    EmptyOptions { kind: &'static str },

    /// The initially selected option does not exist.
    #[error("selected index {index} is out of range for {count} options")]
    SelectedIndexOutOfRange { index: usize, count: usize },
}

impl SchemeError {
    pub(crate) fn missing_reuse_identifier(kind: &'static str) -> Self {
        Self::MissingReuseIdentifier { kind }
    }

    pub(crate) fn missing_configuration_handler(kind: &'static str) -> Self {
        Self::MissingConfigurationHandler { kind }
    }
}

static_assertions::assert_impl_all!(SchemeError: Send, Sync, std::error::Error);
