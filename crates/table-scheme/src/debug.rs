//! Text dumps of a scheme tree.
//!
//! ```ignore
//! use table_scheme::SchemeTreeDebug;
//!
//! tracing::debug!("\n{}", SchemeTreeDebug::new().format(&table));
//! ```
//!
//! produces something like
//!
//! ```text
//! Table Scheme (2 sections, 3 sets):
//! ├── set #1 "Account" [section 0, 3 rows]
//! │  ├── basic #2 [rows 0..1]
//! │  └── array #3 [rows 1..3]
//! ├── set #4 (hidden)
//! │  └── radio #5 [3 rows]
//! └── set #6 [section 1, 1 rows]
//!    └── basic #7 [rows 0..1]
//! ```

use std::fmt::{self, Write};

use table_scheme_core::logging::TreeFormatOptions;

use crate::scheme_set::SchemeSet;
use crate::table_scheme::TableScheme;
use crate::view::TableView;

/// Formats the set and scheme tree of a [`TableScheme`] with visibility and
/// flat coordinates.
#[derive(Debug, Clone, Default)]
pub struct SchemeTreeDebug {
    options: TreeFormatOptions,
}

impl SchemeTreeDebug {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Formats the whole tree.
    pub fn format<V: TableView>(&self, table: &TableScheme<V>) -> String {
        let mut output = String::new();
        // fmt::Write for String never fails
        let _ = self.format_into(table, &mut output);
        output
    }

    /// Formats the whole tree into `output`.
    pub fn format_into<V: TableView>(
        &self,
        table: &TableScheme<V>,
        output: &mut impl Write,
    ) -> fmt::Result {
        writeln!(
            output,
            "Table Scheme ({} sections, {} sets):",
            table.section_count(),
            table.scheme_sets().len()
        )?;

        let sets: Vec<&SchemeSet<V>> = table
            .scheme_sets()
            .iter()
            .filter(|set| self.options.show_hidden || !set.is_hidden())
            .collect();
        if sets.is_empty() {
            return writeln!(output, "  (empty)");
        }

        let mut section = 0;
        for (index, set) in sets.iter().enumerate() {
            let visible_section = (!set.is_hidden()).then_some(section);
            self.format_set(set, visible_section, index + 1 == sets.len(), output)?;
            if visible_section.is_some() {
                section += 1;
            }
        }
        Ok(())
    }

    fn format_set<V: TableView>(
        &self,
        set: &SchemeSet<V>,
        section: Option<usize>,
        is_last: bool,
        output: &mut impl Write,
    ) -> fmt::Result {
        write!(output, "{}set", self.options.prefix(&[], is_last))?;
        if self.options.show_ids {
            write!(output, " #{}", set.id().raw())?;
        }
        if let Some(title) = set.header_title() {
            write!(output, " {title:?}")?;
        }
        match section {
            Some(section) if self.options.show_coordinates => write!(
                output,
                " [section {section}, {} rows]",
                set.visible_row_count()
            )?,
            Some(_) => {}
            None => write!(output, " (hidden)")?,
        }
        writeln!(output)?;

        let schemes: Vec<_> = set
            .schemes
            .iter()
            .filter(|attributed| self.options.show_hidden || !attributed.hidden)
            .collect();
        let mut offset = 0;
        for (index, attributed) in schemes.iter().enumerate() {
            let count = attributed.scheme.row_count();
            let prefix = self.options.prefix(&[is_last], index + 1 == schemes.len());
            write!(output, "{prefix}{}", attributed.scheme.kind())?;
            if self.options.show_ids {
                write!(output, " #{}", attributed.id.raw())?;
            }
            if attributed.hidden {
                write!(output, " (hidden)")?;
            } else if section.is_some() && self.options.show_coordinates {
                write!(output, " [rows {offset}..{}]", offset + count)?;
            } else {
                write!(output, " [{count} rows]")?;
            }
            writeln!(output)?;
            if !attributed.hidden {
                offset += count;
            }
        }
        Ok(())
    }
}
