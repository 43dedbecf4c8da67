//! Layout Module - geometry sources for hosts without a browser.
//!
//! A browser host reads padding, border and bounding boxes straight from
//! computed style. Everyone else gets them here:
//!
//! - [`CellMeasure`] measures text on a cell grid via `unicode-width`
//! - [`TaffyContainer`] lays the wrapper out with
//!   [Taffy](https://github.com/DioxusLabs/taffy)
//!
//! # Example
//!
//! ```ignore
//! use stylable_caret::layout::{BoxStyle, TaffyContainer};
//! use stylable_caret::types::Edges;
//!
//! let wrapper = TaffyContainer::new(BoxStyle {
//!     height: Some(250.0),
//!     padding: Edges::new(7.0, 5.0, 25.0, 5.0),
//!     border: Edges::all(1.0),
//!     ..Default::default()
//! });
//! ```

mod taffy_bridge;
mod text_measure;

pub use taffy_bridge::{BoxStyle, TaffyContainer};
pub use text_measure::{string_width, CellMeasure};
