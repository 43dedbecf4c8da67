//! Caret Pipeline
//!
//! The work a scheduled frame performs for one caret input.
//!
//! ```text
//! trigger ─> UpdateScheduler ─> (next frame) ─> update_caret ─> CaretSurface
//! ```
//!
//! ## Key Design Principles
//!
//! - **Deferred**: never runs inside the triggering event handler
//! - **Cheap first**: visibility is decided before any layout read
//! - **One write**: only the caret's visibility and transform change

pub mod update;

pub use update::{update_caret, update_caret_or_hide, CaretUpdate};
