//! Input events that move or reveal the caret, and caller handlers for them.
//!
//! Every event here schedules a caret update. The caller's own handler for
//! the same event still runs: the component wraps handlers, it never
//! replaces them.

use std::fmt;

use crate::types::Triggers;

// =============================================================================
// INPUT EVENT
// =============================================================================

/// Event delivered to the native input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer click, in element coordinates.
    Click { x: f32, y: f32 },
    Focus,
    /// Focus lost. Still schedules an update so the caret hides promptly.
    Blur,
    /// Key press, with the key name ("a", "ArrowLeft", "Home", ...)
    KeyDown { key: String },
    /// Selection changed.
    Select,
    /// The input's content scrolled horizontally.
    Scroll { scroll_left: f32 },
}

impl InputEvent {
    pub fn key(key: impl Into<String>) -> Self {
        InputEvent::KeyDown { key: key.into() }
    }

    /// The trigger flag this event raises.
    pub fn trigger(&self) -> Triggers {
        match self {
            InputEvent::Click { .. } => Triggers::CLICK,
            InputEvent::Focus => Triggers::FOCUS,
            InputEvent::Blur => Triggers::BLUR,
            InputEvent::KeyDown { .. } => Triggers::KEY_DOWN,
            InputEvent::Select => Triggers::SELECT,
            InputEvent::Scroll { .. } => Triggers::SCROLL,
        }
    }
}

// =============================================================================
// EVENT HANDLERS
// =============================================================================

/// Caller handler for an input event.
pub type EventHandler = Box<dyn Fn(&InputEvent)>;

/// Caller-supplied handlers, one optional slot per trigger event.
#[derive(Default)]
pub struct EventHandlers {
    pub on_click: Option<EventHandler>,
    pub on_focus: Option<EventHandler>,
    pub on_blur: Option<EventHandler>,
    pub on_key_down: Option<EventHandler>,
    pub on_select: Option<EventHandler>,
    pub on_scroll: Option<EventHandler>,
}

impl EventHandlers {
    fn slot(&self, event: &InputEvent) -> Option<&EventHandler> {
        match event {
            InputEvent::Click { .. } => self.on_click.as_ref(),
            InputEvent::Focus => self.on_focus.as_ref(),
            InputEvent::Blur => self.on_blur.as_ref(),
            InputEvent::KeyDown { .. } => self.on_key_down.as_ref(),
            InputEvent::Select => self.on_select.as_ref(),
            InputEvent::Scroll { .. } => self.on_scroll.as_ref(),
        }
    }

    /// Invoke the caller's handler for `event`, if any. Returns whether one ran.
    pub fn call(&self, event: &InputEvent) -> bool {
        match self.slot(event) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("on_click", &self.on_click.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .field("on_key_down", &self.on_key_down.is_some())
            .field("on_select", &self.on_select.is_some())
            .field("on_scroll", &self.on_scroll.is_some())
            .finish()
    }
}
