//! Visibility Decider - should the overlay caret be drawn at all?
//!
//! Runs first on every update and short-circuits the pipeline: most
//! keystrokes that reach a hidden caret cost a few comparisons instead of a
//! layout reflow.
//!
//! The caret is hidden when any of:
//! 1. the input is not the focused element
//! 2. the selection is a range (start != end)
//! 3. the document is in the background (policy [`DocumentFocusPolicy::Hide`])

use tracing::trace;

use crate::config::DocumentFocusPolicy;
use crate::host::CaretSurface;
use crate::state::animate;
use crate::types::{InputState, Visibility};

/// Decide caret visibility from an input snapshot. Pure.
pub fn decide(input: &InputState, policy: DocumentFocusPolicy) -> Visibility {
    if !input.has_focus || !input.is_collapsed() {
        return Visibility::Hidden;
    }

    if policy == DocumentFocusPolicy::Hide && !input.document_has_focus {
        return Visibility::Hidden;
    }

    Visibility::Visible
}

/// Write a decision to the caret.
///
/// Hiding also rewinds and pauses the caret's animations so it reappears at
/// a consistent phase.
pub fn apply(caret: &mut dyn CaretSurface, visibility: Visibility) {
    trace!(?visibility, "caret visibility");
    caret.set_visibility(visibility);

    if visibility == Visibility::Hidden {
        animate::rewind_and_pause(caret);
    }
}
