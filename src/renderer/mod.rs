//! Renderers - presentation objects the engine writes the caret into.
//!
//! - [`CaretElement`] - retained caret: visibility, transform, animations
//! - [`TerminalCaret`] - paints a `CaretElement` as the terminal cursor

mod retained;
mod terminal;

pub use retained::CaretElement;
pub use terminal::TerminalCaret;
