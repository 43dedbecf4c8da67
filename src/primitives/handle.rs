//! Input Handle - imperative access to the mounted native input.
//!
//! Callers holding a reference to a caret input expect to reach the input
//! element itself (to focus it, read its value, move the selection). The
//! handle is an aliasing indirection: a stable slot the component fills at
//! mount and clears at unmount. Clones share the slot.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::host::{self, InputElement, Shared};

/// Stable reference to the input element of a [`super::CaretInput`].
#[derive(Clone, Default)]
pub struct InputHandle {
    slot: Rc<RefCell<Option<Shared<dyn InputElement>>>>,
}

impl InputHandle {
    pub(crate) fn attach(&self, input: Shared<dyn InputElement>) {
        *self.slot.borrow_mut() = Some(input);
    }

    pub(crate) fn detach(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn is_mounted(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// The input element, while mounted.
    pub fn get(&self) -> Option<Shared<dyn InputElement>> {
        self.slot.borrow().clone()
    }

    /// Read the input element (None when unmounted).
    pub fn with<R>(&self, f: impl FnOnce(&dyn InputElement) -> R) -> Option<R> {
        let input = self.get()?;
        let input = input.borrow();
        Some(f(&*input))
    }

    /// Mutate the input element (None when unmounted).
    ///
    /// Holds the element mutably for the duration of `f`; focus changes go
    /// through [`InputHandle::focus`] and [`InputHandle::blur`] instead.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut dyn InputElement) -> R) -> Option<R> {
        let input = self.get()?;
        let mut input = input.borrow_mut();
        Some(f(&mut *input))
    }

    pub fn value(&self) -> Option<String> {
        self.with(|input| input.value().to_string())
    }

    /// Focus the input. Returns whether focus moved to it.
    pub fn focus(&self) -> bool {
        match self.get() {
            Some(input) => host::focus_element(&input),
            None => false,
        }
    }

    /// Blur the input. Returns whether it lost focus.
    pub fn blur(&self) -> bool {
        match self.get() {
            Some(input) => host::blur_element(&input),
            None => false,
        }
    }
}

impl fmt::Debug for InputHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputHandle")
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
