//! Host Collaborators - the elements the caret engine reads and writes.
//!
//! The engine never talks to a concrete UI toolkit. Each owned element is a
//! trait object, so a browser binding, a terminal host and the in-memory
//! hosts in [`memory`] all drive the same pipeline.
//!
//! | Element            | Read                                  | Written            |
//! |--------------------|---------------------------------------|--------------------|
//! | input              | value, selection, scroll, focus       | attributes         |
//! | wrapper            | padding, border, bounding box         | class, style       |
//! | measurement        | bounding box                          | text               |
//! | caret              | bounding box, animations              | visibility, transform |
//!
//! Elements are shared as `Rc<RefCell<_>>`: the host keeps its own handle to
//! mutate them (typing moves the selection) while the component reads them
//! from its scheduled callback.

pub mod memory;

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::CaretError;
use crate::state::animate::Animated;
use crate::state::focus::{self, ElementId};
use crate::types::{CaretOffset, ContainerGeometry, InputState, Rect, Visibility};

/// Shared, interior-mutable element handle.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap an element for sharing between host and component.
pub fn shared<T>(element: T) -> Shared<T> {
    Rc::new(RefCell::new(element))
}

// =============================================================================
// Element Contracts
// =============================================================================

/// The native single-line input.
pub trait InputElement {
    fn value(&self) -> &str;
    /// Selection start in characters (None when the input has no selection API)
    fn selection_start(&self) -> Option<usize>;
    fn selection_end(&self) -> Option<usize>;
    /// Horizontal scroll of the input's content, in pixels.
    fn scroll_left(&self) -> f32;
    /// Is this the focused element (regardless of document focus).
    fn has_focus(&self) -> bool;
    /// Focus changes fire focus/blur handlers synchronously, and those may
    /// read the element, so they take `&self`.
    fn focus(&self);
    fn blur(&self);

    /// Focus identity, if the host tracks focus through [`crate::state::focus`].
    fn element_id(&self) -> Option<ElementId> {
        None
    }

    /// Forward a native attribute unmodified.
    fn set_attribute(&mut self, _name: &str, _value: &str) {}
}

/// The document owning the input.
pub trait DocumentFocus {
    fn has_focus(&self) -> bool;
}

/// The wrapper around input, caret and measurement surface.
pub trait ContainerElement {
    /// Computed padding/border and bounding box. Forces layout.
    fn geometry(&self) -> Result<ContainerGeometry, CaretError>;

    fn set_class(&mut self, _class: &str) {}
    fn set_style(&mut self, _style: &str) {}
}

/// Invisible, font-matched element used to measure text width.
pub trait MeasureSurface {
    fn set_text(&mut self, text: &str);
    fn bounding_box(&self) -> Rect;
}

/// The overlay caret. Visibility and transform are its only outputs.
pub trait CaretSurface: Animated {
    fn bounding_box(&self) -> Rect;
    fn set_visibility(&mut self, visibility: Visibility);
    /// Apply the offset as a translation (never as left/top).
    fn set_transform(&mut self, offset: CaretOffset);

    fn set_class(&mut self, _class: &str) {}
    fn set_style(&mut self, _style: &str) {}
}

impl InputState {
    /// Snapshot the input and its document.
    pub fn capture(input: &dyn InputElement, document: &dyn DocumentFocus) -> Self {
        Self {
            text: input.value().to_string(),
            selection_start: input.selection_start(),
            selection_end: input.selection_end(),
            scroll_left: input.scroll_left(),
            has_focus: input.has_focus(),
            document_has_focus: document.has_focus(),
        }
    }
}

/// Focus `input`. Returns whether focus moved to it.
///
/// Inputs tracked by [`crate::state::focus`] are focused by id, so no borrow
/// of the element is held while focus callbacks run.
pub fn focus_element(input: &Shared<dyn InputElement>) -> bool {
    let (was_focused, id) = {
        let input = input.borrow();
        (input.has_focus(), input.element_id())
    };
    if was_focused {
        return false;
    }

    match id {
        Some(id) => focus::focus(id),
        None => input.borrow().focus(),
    }

    input.borrow().has_focus()
}

/// Blur `input` if it is focused. Returns whether it lost focus.
pub fn blur_element(input: &Shared<dyn InputElement>) -> bool {
    let (was_focused, tracked) = {
        let input = input.borrow();
        (input.has_focus(), input.element_id().is_some())
    };
    if !was_focused {
        return false;
    }

    if tracked {
        focus::blur();
    } else {
        input.borrow().blur();
    }

    !input.borrow().has_focus()
}

// =============================================================================
// Mounted Elements
// =============================================================================

/// The four owned elements plus the owning document, handed over at mount.
#[derive(Clone)]
pub struct Elements {
    pub wrapper: Shared<dyn ContainerElement>,
    pub input: Shared<dyn InputElement>,
    pub caret: Shared<dyn CaretSurface>,
    pub measure: Shared<dyn MeasureSurface>,
    pub document: Rc<dyn DocumentFocus>,
}

impl std::fmt::Debug for Elements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Elements").finish_non_exhaustive()
    }
}
