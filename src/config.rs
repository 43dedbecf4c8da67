//! Caret configuration.
//!
//! Every policy the two historical caret layouts disagreed on is a field
//! here rather than a hard-coded choice. `CaretConfig::default()` is the
//! centered layout that hides the caret while the document is in the
//! background.
//!
//! # Example
//!
//! ```ignore
//! use stylable_caret::config::{CaretConfig, CaretAlign};
//!
//! let config = CaretConfig {
//!     align: CaretAlign::Start,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{CursorStyle, OffsetAdjust};

/// Horizontal placement of the caret relative to the native caret column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaretAlign {
    /// Centered on the column: shift left by half the caret width.
    #[default]
    Center,
    /// Flush against the column: shift left by the full caret width.
    Start,
}

impl CaretAlign {
    /// Fraction of the caret width subtracted from the column position.
    pub fn shift_factor(self) -> f32 {
        match self {
            CaretAlign::Center => 0.5,
            CaretAlign::Start => 1.0,
        }
    }
}

/// Vertical placement of the caret inside the wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAlign {
    /// Centered in the content box, independent of line height.
    #[default]
    Center,
    /// Pinned to the top of the content box.
    Top,
}

/// What to do when the element is focused but its document is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFocusPolicy {
    /// Hide the caret while the window is in the background.
    #[default]
    Hide,
    /// Element focus alone decides.
    Ignore,
}

/// Configuration for a caret input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CaretConfig {
    pub align: CaretAlign,
    pub vertical_align: VerticalAlign,
    pub document_focus: DocumentFocusPolicy,
    /// Constant correction added to every computed offset.
    pub offset: OffsetAdjust,
    /// Shape for cursor-drawing hosts (default: Bar)
    pub cursor_style: CursorStyle,
    /// Blink FPS - 2 = 500ms on/off cycle, 0 = steady (default: 2)
    pub blink_fps: u8,
}

impl Default for CaretConfig {
    fn default() -> Self {
        Self {
            align: CaretAlign::Center,
            vertical_align: VerticalAlign::Center,
            document_focus: DocumentFocusPolicy::Hide,
            offset: OffsetAdjust::default(),
            cursor_style: CursorStyle::Bar,
            blink_fps: 2,
        }
    }
}
