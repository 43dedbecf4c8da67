//! Terminal caret renderer.
//!
//! Paints a [`CaretElement`] as the terminal's own cursor: the pixel offset
//! computed by the engine is mapped to a cell, the cursor shape follows the
//! configured style, and it blinks only while the caret's animation runs.
//!
//! Tracks what was last painted so an unchanged caret emits nothing.

use std::io::Write;

use crossterm::cursor::{Hide, MoveTo, SetCursorStyle, Show};
use crossterm::queue;

use crate::config::{CaretAlign, CaretConfig};
use crate::error::CaretError;
use crate::host::CaretSurface;
use crate::renderer::CaretElement;
use crate::types::CursorStyle;

/// What the terminal currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Painted {
    Hidden,
    At { column: u16, row: u16, blinking: bool },
}

/// Renders a caret element onto a terminal.
#[derive(Debug, Clone)]
pub struct TerminalCaret {
    /// Cell of the wrapper's top-left corner.
    origin: (u16, u16),
    /// Pixel size of one cell (width, height).
    cell: (f32, f32),
    align: CaretAlign,
    style: CursorStyle,
    last: Option<Painted>,
}

impl TerminalCaret {
    pub fn new(origin: (u16, u16), cell: (f32, f32), align: CaretAlign, style: CursorStyle) -> Self {
        Self {
            origin,
            cell,
            align,
            style,
            last: None,
        }
    }

    /// Alignment and cursor shape taken from the input's config.
    pub fn from_config(origin: (u16, u16), cell: (f32, f32), config: &CaretConfig) -> Self {
        Self::new(origin, cell, config.align, config.cursor_style)
    }

    /// Move the wrapper (e.g. after a terminal resize).
    pub fn set_origin(&mut self, origin: (u16, u16)) {
        self.origin = origin;
    }

    /// Cell under the caret anchor.
    ///
    /// The anchor is the native caret column, recovered by undoing the
    /// alignment shift, and the vertical middle of the caret box.
    pub fn cell_position(&self, caret: &CaretElement) -> (u16, u16) {
        let rect = caret.bounding_box();
        let (cell_width, cell_height) = self.cell;

        let anchor_x = rect.x + rect.width * self.align.shift_factor();
        let anchor_y = rect.y + rect.height / 2.0;

        let column = to_cell(anchor_x / cell_width, f32::round);
        let row = to_cell(anchor_y / cell_height, f32::floor);

        (
            self.origin.0.saturating_add(column),
            self.origin.1.saturating_add(row),
        )
    }

    /// Queue the commands that bring the terminal cursor in line with the caret.
    ///
    /// Nothing is written when the caret looks the same as last paint.
    pub fn paint<W: Write>(&mut self, out: &mut W, caret: &CaretElement) -> Result<(), CaretError> {
        let next = if caret.visibility().is_visible() {
            let (column, row) = self.cell_position(caret);
            Painted::At {
                column,
                row,
                blinking: caret.is_blinking(),
            }
        } else {
            Painted::Hidden
        };

        if self.last == Some(next) {
            return Ok(());
        }

        match next {
            Painted::Hidden => queue!(out, Hide)?,
            Painted::At { column, row, blinking } => queue!(
                out,
                MoveTo(column, row),
                cursor_shape(self.style, blinking),
                Show
            )?,
        }

        self.last = Some(next);
        Ok(())
    }

    /// Forget the last paint (the terminal was cleared or redrawn).
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

fn to_cell(value: f32, snap: fn(f32) -> f32) -> u16 {
    let snapped = snap(value);
    if snapped <= 0.0 {
        0
    } else if snapped >= f32::from(u16::MAX) {
        u16::MAX
    } else {
        snapped as u16
    }
}

fn cursor_shape(style: CursorStyle, blinking: bool) -> SetCursorStyle {
    match (style, blinking) {
        (CursorStyle::Block, true) => SetCursorStyle::BlinkingBlock,
        (CursorStyle::Block, false) => SetCursorStyle::SteadyBlock,
        (CursorStyle::Bar, true) => SetCursorStyle::BlinkingBar,
        (CursorStyle::Bar, false) => SetCursorStyle::SteadyBar,
        (CursorStyle::Underline, true) => SetCursorStyle::BlinkingUnderScore,
        (CursorStyle::Underline, false) => SetCursorStyle::SteadyUnderScore,
    }
}
