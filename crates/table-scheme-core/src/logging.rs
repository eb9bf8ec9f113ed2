//! Logging and debugging facilities for table-scheme.
//!
//! This module provides:
//! - Target and span names used with the `tracing` crate
//! - Tree layout options shared by the scheme tree debugger
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! table-scheme emits `tracing` events but never installs a subscriber.
//! Install one in the host application to see them:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("table_scheme::animation=debug")
//!     .init();
//! ```

/// Span names used throughout table-scheme for tracing.
pub mod span_names {
    /// Batch visibility commit span.
    pub const BATCH: &str = "table_scheme::batch";
    /// Row animation commit span.
    pub const ROW_ANIMATION: &str = "table_scheme::row_animation";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "table_scheme_core::signal";
    /// Scheme and scheme set construction (validation, rejection).
    pub const BUILD: &str = "table_scheme::build";
    /// Show/hide/reload of schemes and scheme sets.
    pub const VISIBILITY: &str = "table_scheme::visibility";
    /// Row insert/delete/move animations.
    pub const ANIMATION: &str = "table_scheme::animation";
    /// Selection dispatch.
    pub const SELECTION: &str = "table_scheme::selection";
    /// Performance spans.
    pub const PERF: &str = "table_scheme::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact representation with dashes.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node IDs.
    pub show_ids: bool,
    /// Whether to list hidden nodes at all.
    pub show_hidden: bool,
    /// Whether to show the flat coordinates each node occupies.
    pub show_coordinates: bool,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_hidden: true,
            show_coordinates: true,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self::default()
    }

    /// Options for minimal output: visible nodes only, no IDs or coordinates.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_hidden: false,
            show_coordinates: false,
            ..Default::default()
        }
    }

    /// Build the prefix string for a child node.
    ///
    /// `ancestors` holds, for each ancestor below the root, whether it was
    /// the last child of its parent. Closed ancestors get blank space instead
    /// of a branch line. `is_last` selects the closing connector for the node
    /// itself.
    pub fn prefix(&self, ancestors: &[bool], is_last: bool) -> String {
        let (branch, corner, last) = match self.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for &closed in ancestors {
            if closed {
                prefix.extend(std::iter::repeat_n(' ', branch.chars().count()));
            } else {
                prefix.push_str(branch);
            }
            prefix.extend(std::iter::repeat_n(' ', self.indent_size));
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used around batch and row-animation commits to time them.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
