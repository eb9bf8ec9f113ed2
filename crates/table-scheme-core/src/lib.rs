//! Core systems for table-scheme.
//!
//! This crate provides the infrastructure the `table-scheme` crate builds on:
//!
//! - **Signal/Slot System**: Observer notifications for visibility and row changes
//! - **Logging**: `tracing` targets, span names and tree layout options
//!
//! # Signal/Slot Example
//!
//! ```
//! use table_scheme_core::Signal;
//!
//! let visibility_changed = Signal::<bool>::new();
//!
//! let conn_id = visibility_changed.connect(|hidden| {
//!     println!("hidden: {}", hidden);
//! });
//!
//! visibility_changed.emit(true);
//! visibility_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
