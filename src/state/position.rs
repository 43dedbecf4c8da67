//! Position Calculator - where the native caret is, in wrapper pixels.
//!
//! The text in front of the caret is rendered into the measurement surface,
//! which shares the input's font, and its width is read back. That width is
//! the authoritative character-to-pixel mapping; no font-metric arithmetic.
//!
//! ```text
//! x = padding.left + border.left + text_width - scroll_left - caret.width * k + adjust.x
//!     k = 0.5 (CaretAlign::Center) | 1.0 (CaretAlign::Start)
//!
//! y = padding.top + border.top + (content_height - caret.height) / 2 + adjust.y   (Center)
//! y = padding.top + border.top + adjust.y                                        (Top)
//! ```
//!
//! Only called once the caret is known to be visible: measuring forces layout.

use tracing::trace;

use crate::config::{CaretAlign, VerticalAlign};
use crate::host::{CaretSurface, MeasureSurface};
use crate::state::animate;
use crate::types::{CaretOffset, ContainerGeometry, InputState, OffsetAdjust, Rect};

/// Everything the offset formula reads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CaretLayout {
    /// Rendered width of the text before the caret.
    pub text_width: f32,
    pub scroll_left: f32,
    pub container: ContainerGeometry,
    /// The overlay caret's own box.
    pub caret: Rect,
    pub adjust: OffsetAdjust,
    pub align: CaretAlign,
    pub vertical_align: VerticalAlign,
}

/// Compute the caret translation. Pure and deterministic.
pub fn compute(layout: &CaretLayout) -> CaretOffset {
    let padding = layout.container.padding;
    let border = layout.container.border;

    let x = padding.left + border.left + layout.text_width
        - layout.scroll_left
        - layout.caret.width * layout.align.shift_factor()
        + layout.adjust.x_px();

    let centering = match layout.vertical_align {
        VerticalAlign::Center => (layout.container.content_height() - layout.caret.height) / 2.0,
        VerticalAlign::Top => 0.0,
    };
    let y = padding.top + border.top + centering + layout.adjust.y_px();

    CaretOffset::new(x, y)
}

/// Render the text before the caret into the measurement surface and
/// return its width.
///
/// With a `mask` (password inputs) the prefix is replaced by one mask
/// character per character, which is what the input actually draws.
pub fn measure_text_before_caret(
    measure: &mut dyn MeasureSurface,
    input: &InputState,
    mask: Option<char>,
) -> f32 {
    let prefix = input.text_before_caret();
    let chars = prefix.chars().count();

    match mask {
        Some(mask) => measure.set_text(&mask.to_string().repeat(chars)),
        None => measure.set_text(prefix),
    }

    let width = measure.bounding_box().width;
    trace!(chars, width, "measured caret prefix");
    width
}

/// Write the offset as a transform, then restart the caret's animations
/// from time zero.
pub fn apply(caret: &mut dyn CaretSurface, offset: CaretOffset) {
    caret.set_transform(offset);
    animate::rewind_and_play(caret);
}
