//! State Module - the caret synchronization engine
//!
//! - **Visibility** - should the caret be drawn (cheap, runs first)
//! - **Position** - where to draw it (measures text, forces layout)
//! - **Scheduler** - one update per rendering tick
//! - **Animate** - rewind/pause/play of the caret's animations
//! - **Focus** - element and document focus, focus callbacks
//! - **Events** - trigger events and caller handlers

pub mod animate;
pub mod events;
pub mod focus;
pub mod position;
pub mod scheduler;
pub mod visibility;

pub use animate::{Animated, Animation, BlinkAnimation};
pub use events::{EventHandler, EventHandlers, InputEvent};
pub use focus::{
    allocate_element_id, blur, document_has_focus, focus, focused_element, is_focused,
    register_callbacks, reset_focus_state, set_document_focus, ElementId, FocusCallbacks,
};
pub use position::CaretLayout;
pub use scheduler::{FrameCallback, FrameQueue, FrameScheduler, UpdateScheduler};
