//! Focus System - Element and document focus state
//!
//! Plays the part the browser plays for a DOM input: it knows which element
//! is focused, whether the owning document (window) has focus, and fires
//! focus/blur callbacks at the source of every change.
//!
//! - `FOCUSED_ELEMENT` signal (currently focused element)
//! - `DOCUMENT_FOCUSED` signal (window in the foreground)
//! - Focus callbacks (on_focus/on_blur), several per element
//!
//! Backgrounding the document blurs the focused element without changing
//! which element is focused, and bringing it back fires focus again. That is
//! what lets the caret disappear while the window is inactive.
//!
//! # Example
//!
//! ```ignore
//! use stylable_caret::state::focus::{self, FocusCallbacks};
//!
//! let id = focus::allocate_element_id();
//! let cleanup = focus::register_callbacks(id, FocusCallbacks {
//!     on_focus: Some(Box::new(|| println!("Focused!"))),
//!     on_blur: Some(Box::new(|| println!("Blurred!"))),
//! });
//!
//! focus::focus(id);
//! focus::set_document_focus(false); // fires on_blur
//! cleanup();
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{signal, Signal};

// =============================================================================
// ELEMENT IDS
// =============================================================================

/// Identity of a focusable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

thread_local! {
    static NEXT_ELEMENT_ID: Cell<usize> = const { Cell::new(0) };
}

/// Allocate a fresh element id.
pub fn allocate_element_id() -> ElementId {
    NEXT_ELEMENT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        ElementId(id)
    })
}

// =============================================================================
// FOCUS SIGNALS
// =============================================================================

thread_local! {
    static FOCUSED_ELEMENT: Signal<Option<ElementId>> = signal(None);
    static DOCUMENT_FOCUSED: Signal<bool> = signal(true);
}

/// Get the currently focused element (None if nothing is focused)
pub fn focused_element() -> Option<ElementId> {
    FOCUSED_ELEMENT.with(|s| s.get())
}

/// Check if specific element is the focused element.
///
/// Element focus survives the document going to the background.
pub fn is_focused(id: ElementId) -> bool {
    focused_element() == Some(id)
}

/// Check whether the document (window) has focus
pub fn document_has_focus() -> bool {
    DOCUMENT_FOCUSED.with(|s| s.get())
}

// =============================================================================
// FOCUS CALLBACKS
// =============================================================================

/// Callbacks fired when focus changes
#[derive(Default)]
pub struct FocusCallbacks {
    pub on_focus: Option<Box<dyn Fn()>>,
    pub on_blur: Option<Box<dyn Fn()>>,
}

thread_local! {
    // Multiple callbacks per element (caret scheduling + host callbacks)
    static FOCUS_CALLBACK_REGISTRY: RefCell<HashMap<ElementId, Vec<Option<Rc<FocusCallbacks>>>>> =
        RefCell::new(HashMap::new());
}

/// Register focus callbacks for an element.
/// Returns cleanup function to unregister.
///
/// Slots freed by earlier cleanups are reused, so mount/unmount cycles do
/// not grow the list.
pub fn register_callbacks(id: ElementId, callbacks: FocusCallbacks) -> impl FnOnce() {
    let callbacks = Rc::new(callbacks);
    let registered = Rc::downgrade(&callbacks);

    FOCUS_CALLBACK_REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let list = reg.entry(id).or_default();
        match list.iter_mut().find(|slot| slot.is_none()) {
            Some(free) => *free = Some(callbacks),
            None => list.push(Some(callbacks)),
        }
    });

    move || {
        let Some(target) = registered.upgrade() else {
            return;
        };

        let removed = FOCUS_CALLBACK_REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            let list = reg.get_mut(&id)?;
            // Match by identity: slot positions are reused
            let removed = list
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|cb| Rc::ptr_eq(cb, &target)))
                .and_then(Option::take);
            if list.iter().all(Option::is_none) {
                reg.remove(&id);
            }
            removed
        });

        // Callbacks may own components; drop them outside the registry borrow
        drop(removed);
        drop(target);
    }
}

/// Number of callback slots held for an element, live or free.
#[cfg(test)]
fn callback_slots(id: ElementId) -> usize {
    FOCUS_CALLBACK_REGISTRY.with(|reg| reg.borrow().get(&id).map_or(0, Vec::len))
}

#[derive(Clone, Copy)]
enum FocusChange {
    Focus,
    Blur,
}

/// Fire callbacks for one element. The list is cloned out first so a
/// callback may register or unregister without a re-entrant borrow.
fn fire(id: ElementId, change: FocusChange) {
    let callbacks: Vec<Rc<FocusCallbacks>> = FOCUS_CALLBACK_REGISTRY.with(|reg| {
        reg.borrow()
            .get(&id)
            .map(|list| list.iter().flatten().cloned().collect())
            .unwrap_or_default()
    });

    for cb in callbacks {
        let handler = match change {
            FocusChange::Focus => &cb.on_focus,
            FocusChange::Blur => &cb.on_blur,
        };
        if let Some(handler) = handler {
            handler();
        }
    }
}

/// Internal: Set focus and fire callbacks at the source
fn set_focus_with_callbacks(new: Option<ElementId>) {
    let old = focused_element();

    // No change, no callbacks
    if old == new {
        return;
    }

    let document_focused = document_has_focus();

    // A backgrounded document already delivered blur to the old element
    if let Some(old) = old {
        if document_focused {
            fire(old, FocusChange::Blur);
        }
    }

    FOCUSED_ELEMENT.with(|s| s.set(new));

    if let Some(new) = new {
        if document_focused {
            fire(new, FocusChange::Focus);
        }
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Focus a specific element
pub fn focus(id: ElementId) {
    set_focus_with_callbacks(Some(id));
}

/// Blur the focused element
pub fn blur() {
    set_focus_with_callbacks(None);
}

/// Set whether the document has focus (window activated / deactivated).
///
/// The focused element stays focused but receives blur when the document
/// goes to the background and focus when it comes back.
pub fn set_document_focus(focused: bool) {
    if document_has_focus() == focused {
        return;
    }

    DOCUMENT_FOCUSED.with(|s| s.set(focused));

    if let Some(id) = focused_element() {
        fire(id, if focused { FocusChange::Focus } else { FocusChange::Blur });
    }
}

/// Reset all focus state (for testing)
pub fn reset_focus_state() {
    FOCUSED_ELEMENT.with(|s| s.set(None));
    DOCUMENT_FOCUSED.with(|s| s.set(true));
    FOCUS_CALLBACK_REGISTRY.with(|reg| reg.borrow_mut().clear());
}

// =============================================================================
// TESTS
// =============================================================================
