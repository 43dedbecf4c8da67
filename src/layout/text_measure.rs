//! Text Measurement
//!
//! Measurement surface for hosts that lay text out on a cell grid.
//!
//! Terminal text width depends on Unicode character widths:
//! - ASCII characters: 1 cell
//! - CJK characters: 2 cells (fullwidth)
//! - Emoji: 2 cells (most)
//! - Zero-width characters: 0 cells
//!
//! Widths come from `unicode-width`, the same table terminals use.

use unicode_width::UnicodeWidthStr;

use crate::host::MeasureSurface;
use crate::types::Rect;

/// Measure the display width of a string in terminal cells.
pub fn string_width(s: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(s)).unwrap_or(u16::MAX)
}

/// Measurement surface on a fixed cell grid.
///
/// Holds the last text written to it; its box is one cell tall and as wide
/// as the text's display width.
#[derive(Debug, Clone, PartialEq)]
pub struct CellMeasure {
    cell_width: f32,
    cell_height: f32,
    text: String,
}

impl CellMeasure {
    /// `cell_width`/`cell_height` are the pixel size of one cell.
    pub fn new(cell_width: f32, cell_height: f32) -> Self {
        Self {
            cell_width,
            cell_height,
            text: String::new(),
        }
    }

    /// Last text written by the engine.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl MeasureSurface for CellMeasure {
    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    fn bounding_box(&self) -> Rect {
        let cells = f32::from(string_width(&self.text));
        let height = if self.text.is_empty() { 0.0 } else { self.cell_height };
        Rect::sized(cells * self.cell_width, height)
    }
}
