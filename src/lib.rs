//! # stylable-caret
//!
//! A stylable overlay caret for single-line text inputs.
//!
//! The native caret of an input cannot be styled beyond its color. This
//! crate keeps a separate caret element glued to where the native caret
//! would be: hidden whenever the native one would not blink, translated to
//! the native caret's position otherwise, and recomputed at most once per
//! rendering tick.
//!
//! ## Architecture
//!
//! ```text
//! InputEvent ─> CaretInput::dispatch ─> UpdateScheduler ─(frame)─> update_caret
//!                                                                    │
//!                         visibility::decide ─> position::compute ─> CaretSurface
//! ```
//!
//! The host supplies the elements through the traits in [`host`]; the crate
//! ships in-memory, Taffy and terminal implementations of them.
//!
//! ## Modules
//!
//! - [`types`] - Geometry, lengths, input snapshot, trigger flags
//! - [`config`] - Alignment, document focus policy, offset adjustment
//! - [`state`] - Visibility decider, position calculator, update scheduler
//! - [`pipeline`] - One caret update, end to end
//! - [`primitives`] - The `CaretInput` component and its input handle
//! - [`host`] - Element contracts and in-memory hosts
//! - [`layout`] - Cell-grid text measurement, Taffy wrapper layout
//! - [`renderer`] - Retained caret element, terminal cursor painter

pub mod config;
pub mod error;
pub mod host;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{CaretAlign, CaretConfig, DocumentFocusPolicy, VerticalAlign};
pub use error::CaretError;

pub use host::{
    blur_element, focus_element, shared, CaretSurface, ContainerElement, DocumentFocus, Elements,
    InputElement, MeasureSurface, Shared,
};

pub use layout::{string_width, BoxStyle, CellMeasure, TaffyContainer};

pub use pipeline::{update_caret, update_caret_or_hide, CaretUpdate};

pub use primitives::{CaretInput, CaretInputProps, CaretStats, InputHandle};

pub use renderer::{CaretElement, TerminalCaret};

pub use state::{
    // Scheduling
    FrameCallback, FrameQueue, FrameScheduler, UpdateScheduler,
    // Events
    EventHandler, EventHandlers, InputEvent,
    // Animation
    Animated, Animation, BlinkAnimation,
    // Focus
    allocate_element_id, blur, document_has_focus, focus, focused_element, is_focused,
    register_callbacks, reset_focus_state, set_document_focus, ElementId, FocusCallbacks,
    // Position
    CaretLayout,
};
