//! table-scheme - Declarative sections and rows for list widgets.
//!
//! A screen describes its list as scheme sets (sections) holding schemes
//! (runs of rows). A [`TableScheme`] answers the host widget's index-based
//! questions from that tree and turns visibility and content changes into
//! animated row and section operations.
//!
//! # Example
//!
//! ```ignore
//! use table_scheme::{BasicScheme, RadioScheme, RowAnimation, SchemeSet, TableScheme};
//!
//! let mut account = SchemeSet::builder();
//! account.header_title("Account");
//! let sign_out = account.add_scheme(
//!     BasicScheme::builder()
//!         .reuse_identifier("button")
//!         .configuration(|row| row.set_text("Sign out"))
//!         .selection(|screen, _row| screen.sign_out()),
//! );
//!
//! let mut table = TableScheme::new(vec![account.build()]);
//!
//! // host widget callbacks
//! let rows = table.row_count(0);
//! let row = table.populate_row(&mut screen, IndexPath::new(0, 0));
//! table.handle_selection(&mut screen, IndexPath::new(0, 0));
//!
//! // animated visibility changes
//! table.batch_visibility_changes(&mut screen, |batch| {
//!     batch.hide_scheme(sign_out.unwrap(), RowAnimation::Fade);
//! });
//! ```
//!
//! # Modules
//!
//! - [`scheme`]: the [`Scheme`] trait and the provided scheme kinds
//! - [`TableScheme`]: coordinate mapping, host callbacks, visibility
//! - [`BatchAnimator`]: several visibility changes in one host batch
//! - [`SchemeRowAnimator`] and [`infer_row_changes`]: row changes inside a scheme
//! - [`TableView`]: what the host widget has to provide

mod animation;
mod batch;
mod debug;
mod diff;
mod error;
mod height;
mod index;
mod row_animator;
pub mod scheme;
mod scheme_set;
mod signals;
mod table_scheme;
mod view;

pub use animation::RowAnimation;
pub use batch::BatchAnimator;
pub use debug::SchemeTreeDebug;
pub use diff::{RowChanges, RowMove, infer_row_changes};
pub use error::{Result, SchemeError};
pub use height::RowHeight;
pub use index::{IndexPath, SchemeId, SchemeSetId};
pub use row_animator::SchemeRowAnimator;
pub use scheme::{
    AccordionScheme, AccordionSchemeBuilder, ArrayScheme, ArraySchemeBuilder, BasicScheme,
    BasicSchemeBuilder, InferrableIdentity, RadioScheme, RadioSchemeBuilder, Scheme,
    SchemeBuilder, SelectionContext, StaticScheme, StaticSchemeBuilder,
};
pub use scheme_set::{SchemeSet, SchemeSetBuilder};
pub use signals::TableSchemeSignals;
pub use table_scheme::{RowLocation, TableScheme};
pub use view::TableView;

pub use table_scheme_core::logging::{TreeFormatOptions, TreeStyle};
pub use table_scheme_core::{ConnectionGuard, ConnectionId, Signal};

static_assertions::assert_impl_all!(IndexPath: Send, Sync, Copy);
static_assertions::assert_impl_all!(BatchAnimator: Send, Sync);
static_assertions::assert_impl_all!(SchemeRowAnimator: Send, Sync);
static_assertions::assert_impl_all!(TableSchemeSignals: Send, Sync);
