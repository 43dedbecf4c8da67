//! In-memory host elements.
//!
//! Used by hosts that keep the text field state themselves (terminal UIs)
//! and by tests. Focus goes through [`crate::state::focus`], so focusing a
//! `MemoryInput` fires the same focus/blur callbacks a browser would.

use std::collections::BTreeMap;

use crate::error::CaretError;
use crate::host::{ContainerElement, DocumentFocus, InputElement};
use crate::state::focus::{self, ElementId};
use crate::types::ContainerGeometry;

// =============================================================================
// MemoryInput
// =============================================================================

/// Text field state held in memory.
#[derive(Debug, Clone)]
pub struct MemoryInput {
    id: ElementId,
    value: String,
    selection_start: Option<usize>,
    selection_end: Option<usize>,
    scroll_left: f32,
    attributes: BTreeMap<String, String>,
}

impl MemoryInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: focus::allocate_element_id(),
            value: value.into(),
            selection_start: Some(0),
            selection_end: Some(0),
            scroll_left: 0.0,
            attributes: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Collapse the selection at `position` (in characters).
    pub fn set_caret(&mut self, position: usize) {
        self.set_selection(Some(position), Some(position));
    }

    pub fn set_selection(&mut self, start: Option<usize>, end: Option<usize>) {
        self.selection_start = start;
        self.selection_end = end;
    }

    pub fn set_scroll_left(&mut self, scroll_left: f32) {
        self.scroll_left = scroll_left;
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

impl InputElement for MemoryInput {
    fn value(&self) -> &str {
        &self.value
    }

    fn selection_start(&self) -> Option<usize> {
        self.selection_start
    }

    fn selection_end(&self) -> Option<usize> {
        self.selection_end
    }

    fn scroll_left(&self) -> f32 {
        self.scroll_left
    }

    fn has_focus(&self) -> bool {
        focus::is_focused(self.id)
    }

    fn focus(&self) {
        focus::focus(self.id);
    }

    fn blur(&self) {
        if self.has_focus() {
            focus::blur();
        }
    }

    fn element_id(&self) -> Option<ElementId> {
        Some(self.id)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }
}

// =============================================================================
// MemoryDocument
// =============================================================================

/// Document whose focus is the thread's document focus signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryDocument;

impl DocumentFocus for MemoryDocument {
    fn has_focus(&self) -> bool {
        focus::document_has_focus()
    }
}

// =============================================================================
// StaticContainer
// =============================================================================

/// Wrapper with fixed, precomputed geometry.
#[derive(Debug, Clone, Default)]
pub struct StaticContainer {
    pub geometry: ContainerGeometry,
    pub class: String,
    pub style: String,
}

impl StaticContainer {
    pub fn new(geometry: ContainerGeometry) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }
}

impl ContainerElement for StaticContainer {
    fn geometry(&self) -> Result<ContainerGeometry, CaretError> {
        Ok(self.geometry)
    }

    fn set_class(&mut self, class: &str) {
        self.class = class.to_string();
    }

    fn set_style(&mut self, style: &str) {
        self.style = style.to_string();
    }
}
