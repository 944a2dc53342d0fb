//! # handles
//!
//! Fixed-capacity resource tables addressed by opaque, generation-tagged
//! handles. A HAL keeps one table per resource kind and hands the handles to
//! callers instead of pointers into its own state.
//!
//! ## Module Overview
//! - [`handle`] – Handle layout (kind tag, generation, slot index).
//! - [`table`]  – The per-slot locked table and its allocation errors.
//! - [`stats`]  – Occupancy snapshots.

pub mod handle;
pub mod stats;
mod sync;
pub mod table;

pub use handle::{Handle, HandleKind, MAX_INDEX};
pub use stats::TableStats;
pub use table::{HandleError, HandleTable};
