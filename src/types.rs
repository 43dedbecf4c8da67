//! Core types for the caret engine.
//!
//! Geometry is in CSS pixels (`f32`). Hosts on a cell grid convert at their
//! own boundary (see [`crate::renderer::TerminalCaret`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CaretError;

// =============================================================================
// Length
// =============================================================================

/// A pixel length, written the CSS way (`"2px"`).
///
/// Unitless values are accepted (`"0"`, `"3"`) and read as pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Length(f32);

impl Length {
    pub const ZERO: Length = Length(0.0);

    pub const fn px(value: f32) -> Self {
        Self(value)
    }

    pub const fn as_px(self) -> f32 {
        self.0
    }
}

impl FromStr for Length {
    type Err = CaretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();

        match number.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(Length(value)),
            _ => Err(CaretError::InvalidLength(s.to_string())),
        }
    }
}

impl TryFrom<String> for Length {
    type Error = CaretError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Length> for String {
    fn from(length: Length) -> Self {
        length.to_string()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Bounding box of an element, as reported by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// A zero-origin rect with the given size.
    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// Per-side widths (padding or border).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const ZERO: Edges = Edges::all(0.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// CSS two-value shorthand: vertical, horizontal.
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

/// Wrapper geometry consumed by the position calculator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerGeometry {
    pub padding: Edges,
    pub border: Edges,
    pub bounding_box: Rect,
}

impl ContainerGeometry {
    /// Height of the content box: bounding height minus vertical padding and border.
    pub fn content_height(&self) -> f32 {
        self.bounding_box.height
            - self.padding.top
            - self.border.top
            - self.padding.bottom
            - self.border.bottom
    }
}

/// Translation applied to the overlay caret, relative to the wrapper origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CaretOffset {
    pub x: f32,
    pub y: f32,
}

impl CaretOffset {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CaretOffset {
    /// Formats as a CSS transform value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({}px, {}px)", self.x, self.y)
    }
}

/// Caller-supplied constant correction added on top of the computed offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetAdjust {
    pub x: Option<Length>,
    pub y: Option<Length>,
}

impl OffsetAdjust {
    pub fn new(x: Length, y: Length) -> Self {
        Self { x: Some(x), y: Some(y) }
    }

    /// Horizontal correction in pixels (missing = 0).
    pub fn x_px(&self) -> f32 {
        self.x.unwrap_or(Length::ZERO).as_px()
    }

    /// Vertical correction in pixels (missing = 0).
    pub fn y_px(&self) -> f32 {
        self.y.unwrap_or(Length::ZERO).as_px()
    }
}

// =============================================================================
// Input State
// =============================================================================

/// Read-only snapshot of the host input, taken once per update.
///
/// Selection offsets count characters, not bytes. The caret only exists
/// when the selection is collapsed (`selection_start == selection_end`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputState {
    pub text: String,
    pub selection_start: Option<usize>,
    pub selection_end: Option<usize>,
    pub scroll_left: f32,
    pub has_focus: bool,
    pub document_has_focus: bool,
}

impl InputState {
    pub fn is_collapsed(&self) -> bool {
        self.selection_start == self.selection_end
    }

    /// Text in front of the caret: characters `0..selection_start`.
    ///
    /// A missing start counts as 0; a start past the end is clamped.
    pub fn text_before_caret(&self) -> &str {
        let start = self.selection_start.unwrap_or(0);
        match self.text.char_indices().nth(start) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }
}

// =============================================================================
// Presentation
// =============================================================================

/// Whether the overlay caret is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Visible,
    #[default]
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

/// Shape used by hosts that draw the caret as a terminal cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum CursorStyle {
    Block = 0,
    #[default]
    Bar = 1,
    Underline = 2,
}

// =============================================================================
// Input Type
// =============================================================================

/// Single-line text-like input types the overlay caret supports.
///
/// Other native types (number, date, ...) draw their own editing chrome and
/// are rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Search,
    Url,
    Tel,
    Password,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Search => "search",
            InputType::Url => "url",
            InputType::Tel => "tel",
            InputType::Password => "password",
        }
    }

    /// Character the input draws in place of each typed character, if any.
    ///
    /// The measurement surface must see what the input renders, so a
    /// password prefix is measured as a run of mask characters rather than
    /// the raw prefix of the value. Measuring the raw text would place the
    /// caret by glyphs that are never drawn.
    pub fn mask(self) -> Option<char> {
        match self {
            InputType::Password => Some(PASSWORD_MASK),
            _ => None,
        }
    }
}

/// Mask character drawn by password inputs.
pub const PASSWORD_MASK: char = '\u{2022}';

impl FromStr for InputType {
    type Err = CaretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(InputType::Text),
            "search" => Ok(InputType::Search),
            "url" => Ok(InputType::Url),
            "tel" => Ok(InputType::Tel),
            "password" => Ok(InputType::Password),
            other => Err(CaretError::UnsupportedInputType(other.to_string())),
        }
    }
}

// =============================================================================
// Triggers (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Events that schedule a caret update.
    ///
    /// The scheduler ORs every trigger of a tick together so the coalesced
    /// set can be logged when the frame runs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Triggers: u8 {
        const CLICK = 1 << 0;
        const FOCUS = 1 << 1;
        const KEY_DOWN = 1 << 2;
        const SELECT = 1 << 3;
        const SCROLL = 1 << 4;
        const BLUR = 1 << 5;
    }
}

// =============================================================================
// Tests
// =============================================================================
