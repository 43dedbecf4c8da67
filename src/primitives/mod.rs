//! Primitives - the caret input component.
//!
//! - [`CaretInput`] - input + overlay caret, wired to the update pipeline
//! - [`InputHandle`] - imperative access to the mounted native input
//!
//! # Lifecycle
//!
//! ```ignore
//! let caret_input = CaretInput::new(props, frames);
//! caret_input.mount(elements);   // wires focus callbacks, fills the handle
//! caret_input.dispatch(&event);  // schedule + caller handler
//! caret_input.unmount();         // pending frames become no-ops
//! ```

mod caret_input;
mod handle;

pub use caret_input::{
    compose_class, CaretInput, CaretInputProps, CaretStats, CARET_CLASS, WRAPPER_CLASS,
};
pub use handle::InputHandle;
