//! Caret update - decide, measure, compute, write.
//!
//! ```text
//! InputState::capture ─> visibility::decide ─┬─ Hidden  ─> hide, rewind + pause
//!                                            └─ Visible ─> show
//!                                                          measure prefix
//!                                                          wrapper geometry
//!                                                          position::compute
//!                                                          transform, rewind + play
//! ```
//!
//! The only externally visible effect is the visibility/transform pair
//! written to the caret surface.

use tracing::{trace, warn};

use crate::config::CaretConfig;
use crate::error::CaretError;
use crate::host::Elements;
use crate::state::{position, visibility};
use crate::state::position::CaretLayout;
use crate::types::{CaretOffset, InputState, Visibility};

/// Result of one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaretUpdate {
    Hidden,
    Positioned(CaretOffset),
}

/// Run the full pipeline against mounted elements.
///
/// Geometry is only read once the caret is known to be visible. `mask` is
/// the input's mask character (see [`crate::types::InputType::mask`]).
pub fn update_caret(
    elements: &Elements,
    config: &CaretConfig,
    mask: Option<char>,
) -> Result<CaretUpdate, CaretError> {
    let state = {
        let input = elements.input.borrow();
        InputState::capture(&*input, &*elements.document)
    };

    let decision = visibility::decide(&state, config.document_focus);
    visibility::apply(&mut *elements.caret.borrow_mut(), decision);

    if decision == Visibility::Hidden {
        return Ok(CaretUpdate::Hidden);
    }

    let text_width =
        position::measure_text_before_caret(&mut *elements.measure.borrow_mut(), &state, mask);
    let container = elements.wrapper.borrow().geometry()?;
    let caret_box = elements.caret.borrow().bounding_box();

    let offset = position::compute(&CaretLayout {
        text_width,
        scroll_left: state.scroll_left,
        container,
        caret: caret_box,
        adjust: config.offset,
        align: config.align,
        vertical_align: config.vertical_align,
    });

    trace!(x = offset.x, y = offset.y, "caret positioned");
    position::apply(&mut *elements.caret.borrow_mut(), offset);

    Ok(CaretUpdate::Positioned(offset))
}

/// Run the pipeline; on failure hide the caret and log instead of failing.
///
/// A skipped update is superseded by the next trigger.
pub fn update_caret_or_hide(
    elements: &Elements,
    config: &CaretConfig,
    mask: Option<char>,
) -> CaretUpdate {
    match update_caret(elements, config, mask) {
        Ok(update) => update,
        Err(err) => {
            warn!(error = %err, "caret update skipped");
            visibility::apply(&mut *elements.caret.borrow_mut(), Visibility::Hidden);
            CaretUpdate::Hidden
        }
    }
}
