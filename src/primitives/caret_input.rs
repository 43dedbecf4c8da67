//! Caret Input - a single-line input with a stylable overlay caret.
//!
//! Composes the engine for one input:
//!
//! - trigger events (click, focus, key down, select, scroll, blur) schedule
//!   an update, then reach the caller's own handler
//! - the scheduler coalesces them into one update per frame
//! - the update hides the caret or moves it over the native caret
//!
//! Nothing runs inside an event handler except flag bookkeeping. The
//! component owns four elements (wrapper, input, caret, measurement surface)
//! from [`CaretInput::mount`] to [`CaretInput::unmount`]; a frame that runs
//! while unmounted, or after the component is dropped, does nothing.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use stylable_caret::host::{shared, Elements};
//! use stylable_caret::host::memory::{MemoryDocument, MemoryInput};
//! use stylable_caret::layout::{BoxStyle, CellMeasure, TaffyContainer};
//! use stylable_caret::primitives::{CaretInput, CaretInputProps};
//! use stylable_caret::renderer::CaretElement;
//! use stylable_caret::state::FrameQueue;
//!
//! let frames = Rc::new(FrameQueue::new());
//! let caret_input = CaretInput::new(CaretInputProps::default(), frames.clone());
//!
//! let input = shared(MemoryInput::new("hello"));
//! caret_input.mount(Elements {
//!     wrapper: shared(TaffyContainer::new(BoxStyle::default())),
//!     input: input.clone(),
//!     caret: shared(CaretElement::new(2.0, 16.0)),
//!     measure: shared(CellMeasure::new(8.0, 16.0)),
//!     document: Rc::new(MemoryDocument),
//! });
//!
//! caret_input.click_wrapper(); // focus -> one update armed
//! frames.run_frame();          // caret positioned
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::config::CaretConfig;
use crate::host::{self, Elements};
use crate::pipeline::{update_caret_or_hide, CaretUpdate};
use crate::state::events::{EventHandlers, InputEvent};
use crate::state::focus::{self, FocusCallbacks};
use crate::state::scheduler::{FrameScheduler, UpdateScheduler};
use crate::types::{CaretOffset, InputType};

use super::handle::InputHandle;

/// Base class of the wrapper element.
pub const WRAPPER_CLASS: &str = "stylable-caret-wrapper";
/// Base class of the caret element.
pub const CARET_CLASS: &str = "stylable-caret";

// =============================================================================
// PROPS
// =============================================================================

/// Properties for a caret input.
#[derive(Debug, Default)]
pub struct CaretInputProps {
    pub input_type: InputType,
    /// Native attributes forwarded unmodified to the input at mount.
    pub attributes: BTreeMap<String, String>,
    /// Wrapper class, appended to [`WRAPPER_CLASS`].
    pub class_name: Option<String>,
    /// Wrapper inline style.
    pub style: Option<String>,
    /// Caret class, appended to [`CARET_CLASS`].
    pub caret_class: Option<String>,
    /// Caret inline style.
    pub caret_style: Option<String>,
    pub config: CaretConfig,
    /// Caller handlers. Still called after the update is scheduled.
    pub handlers: EventHandlers,
}

/// Base class followed by the caller class, empty parts dropped.
pub fn compose_class(base: &str, extra: Option<&str>) -> String {
    [Some(base), extra]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// STATS
// =============================================================================

/// Counters for completed caret updates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CaretStats {
    /// Updates that ran against mounted elements.
    pub updates: u64,
    /// Last offset written to the caret.
    pub last_offset: Option<CaretOffset>,
}

// =============================================================================
// COMPONENT
// =============================================================================

struct Inner {
    props: CaretInputProps,
    scheduler: UpdateScheduler,
    elements: RefCell<Option<Elements>>,
    focus_cleanup: RefCell<Option<Box<dyn FnOnce()>>>,
    handle: InputHandle,
    stats: Cell<CaretStats>,
}

impl Inner {
    fn dispatch(&self, event: &InputEvent) {
        self.scheduler.notify(event.trigger());
        self.props.handlers.call(event);
    }

    /// The scheduled job.
    fn run_update(&self) {
        // Clone out so no borrow is held while the host elements run
        let Some(elements) = self.elements.borrow().clone() else {
            trace!("caret update skipped: not mounted");
            return;
        };

        let update = update_caret_or_hide(
            &elements,
            &self.props.config,
            self.props.input_type.mask(),
        );

        let mut stats = self.stats.get();
        stats.updates += 1;
        if let CaretUpdate::Positioned(offset) = update {
            stats.last_offset = Some(offset);
        }
        self.stats.set(stats);
    }
}

/// A single-line input with an overlay caret.
pub struct CaretInput {
    inner: Rc<Inner>,
}

impl CaretInput {
    /// Create the component. `frames` is the host's "before next repaint"
    /// primitive.
    pub fn new(props: CaretInputProps, frames: Rc<dyn FrameScheduler>) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let weak = weak.clone();
            let job: Rc<dyn Fn()> = Rc::new(move || match weak.upgrade() {
                Some(inner) => inner.run_update(),
                None => trace!("caret update skipped: component dropped"),
            });

            Inner {
                props,
                scheduler: UpdateScheduler::new(frames, job),
                elements: RefCell::new(None),
                focus_cleanup: RefCell::new(None),
                handle: InputHandle::default(),
                stats: Cell::new(CaretStats::default()),
            }
        });

        Self { inner }
    }

    pub fn props(&self) -> &CaretInputProps {
        &self.inner.props
    }

    /// Take ownership of the elements and wire them up.
    ///
    /// Mounting again replaces the previous elements.
    pub fn mount(&self, elements: Elements) {
        self.unmount();
        let props = &self.inner.props;

        let focus_id = {
            let mut input = elements.input.borrow_mut();
            for (name, value) in &props.attributes {
                input.set_attribute(name, value);
            }
            input.set_attribute("type", props.input_type.as_str());
            input.element_id()
        };

        {
            let mut wrapper = elements.wrapper.borrow_mut();
            wrapper.set_class(&compose_class(WRAPPER_CLASS, props.class_name.as_deref()));
            if let Some(style) = &props.style {
                wrapper.set_style(style);
            }
        }

        {
            let mut caret = elements.caret.borrow_mut();
            caret.set_class(&compose_class(CARET_CLASS, props.caret_class.as_deref()));
            if let Some(style) = &props.caret_style {
                caret.set_style(style);
            }
        }

        // Focus changes made anywhere (keyboard, window switch) reach us as events
        if let Some(id) = focus_id {
            let on_focus = Rc::downgrade(&self.inner);
            let on_blur = Rc::downgrade(&self.inner);
            let cleanup = focus::register_callbacks(
                id,
                FocusCallbacks {
                    on_focus: Some(Box::new(move || {
                        if let Some(inner) = on_focus.upgrade() {
                            inner.dispatch(&InputEvent::Focus);
                        }
                    })),
                    on_blur: Some(Box::new(move || {
                        if let Some(inner) = on_blur.upgrade() {
                            inner.dispatch(&InputEvent::Blur);
                        }
                    })),
                },
            );
            *self.inner.focus_cleanup.borrow_mut() = Some(Box::new(cleanup));
        }

        self.inner.handle.attach(elements.input.clone());
        *self.inner.elements.borrow_mut() = Some(elements);
        debug!(input_type = props.input_type.as_str(), "caret input mounted");
    }

    /// Release the elements. Armed frames still run, and do nothing.
    pub fn unmount(&self) {
        let Some(_elements) = self.inner.elements.borrow_mut().take() else {
            return;
        };

        if let Some(cleanup) = self.inner.focus_cleanup.borrow_mut().take() {
            cleanup();
        }
        self.inner.handle.detach();
        debug!("caret input unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.elements.borrow().is_some()
    }

    /// Deliver an input event: schedule an update, then call the caller's
    /// handler for it.
    pub fn dispatch(&self, event: &InputEvent) {
        self.inner.dispatch(event);
    }

    /// A click anywhere on the wrapper focuses the input.
    pub fn click_wrapper(&self) {
        let Some(input) = self.inner.handle.get() else {
            return;
        };

        let moved = host::focus_element(&input);
        // Inputs tracked by the focus module already delivered the event
        let tracked = input.borrow().element_id().is_some();
        if moved && !tracked {
            self.dispatch(&InputEvent::Focus);
        }
    }

    /// Aliasing handle to the native input.
    pub fn handle(&self) -> InputHandle {
        self.inner.handle.clone()
    }

    pub fn stats(&self) -> CaretStats {
        self.inner.stats.get()
    }

    /// Is an update waiting for the next frame.
    pub fn is_update_pending(&self) -> bool {
        self.inner.scheduler.is_armed()
    }
}

impl Drop for CaretInput {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl fmt::Debug for CaretInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaretInput")
            .field("input_type", &self.inner.props.input_type)
            .field("mounted", &self.is_mounted())
            .field("scheduler", &self.inner.scheduler)
            .field("stats", &self.stats())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryDocument, MemoryInput, StaticContainer};
    use crate::host::{shared, InputElement, Shared};
    use crate::layout::CellMeasure;
    use crate::renderer::CaretElement;
    use crate::state::focus::reset_focus_state;
    use crate::state::scheduler::FrameQueue;
    use crate::types::{ContainerGeometry, Edges, Rect, Visibility};

    struct Fixture {
        frames: Rc<FrameQueue>,
        input: Shared<MemoryInput>,
        caret: Shared<CaretElement>,
        wrapper: Shared<StaticContainer>,
        elements: Elements,
    }

    fn setup() -> Fixture {
        reset_focus_state();

        let frames = Rc::new(FrameQueue::new());
        let input = shared(MemoryInput::new("hello"));
        let caret = shared(CaretElement::new(2.0, 16.0));
        let wrapper = shared(StaticContainer::new(ContainerGeometry {
            padding: Edges::symmetric(5.0, 7.0),
            border: Edges::all(1.0),
            bounding_box: Rect::sized(200.0, 28.0),
        }));

        let elements = Elements {
            wrapper: wrapper.clone(),
            input: input.clone(),
            caret: caret.clone(),
            measure: shared(CellMeasure::new(8.0, 16.0)),
            document: Rc::new(MemoryDocument),
        };

        Fixture {
            frames,
            input,
            caret,
            wrapper,
            elements,
        }
    }

    fn component(fixture: &Fixture, props: CaretInputProps) -> CaretInput {
        let frames: Rc<dyn FrameScheduler> = fixture.frames.clone();
        CaretInput::new(props, frames)
    }

    #[test]
    fn test_compose_class() {
        assert_eq!(compose_class("base", None), "base");
        assert_eq!(compose_class("base", Some("")), "base");
        assert_eq!(compose_class("base", Some("thick")), "base thick");
    }

    #[test]
    fn test_mount_applies_classes_and_attributes() {
        let fixture = setup();
        let mut attributes = BTreeMap::new();
        attributes.insert("placeholder".to_string(), "Name".to_string());

        let caret_input = component(
            &fixture,
            CaretInputProps {
                input_type: InputType::Search,
                attributes,
                class_name: Some("field".to_string()),
                caret_class: Some("thick".to_string()),
                caret_style: Some("background: red".to_string()),
                ..Default::default()
            },
        );
        caret_input.mount(fixture.elements.clone());

        let input = fixture.input.borrow();
        assert_eq!(input.attribute("type"), Some("search"));
        assert_eq!(input.attribute("placeholder"), Some("Name"));
        assert_eq!(fixture.wrapper.borrow().class, "stylable-caret-wrapper field");
        assert_eq!(fixture.caret.borrow().class(), "stylable-caret thick");
        assert_eq!(fixture.caret.borrow().style(), "background: red");
    }

    #[test]
    fn test_focus_schedules_one_update() {
        let fixture = setup();
        let caret_input = component(&fixture, CaretInputProps::default());
        caret_input.mount(fixture.elements.clone());

        caret_input.click_wrapper();
        caret_input.dispatch(&InputEvent::Click { x: 3.0, y: 4.0 });
        caret_input.dispatch(&InputEvent::Select);
        assert!(caret_input.is_update_pending());
        assert_eq!(fixture.frames.pending(), 1);

        fixture.frames.run_frame();
        assert_eq!(caret_input.stats().updates, 1);
        assert_eq!(fixture.caret.borrow().visibility(), Visibility::Visible);
    }

    #[test]
    fn test_blur_from_focus_module_hides() {
        let fixture = setup();
        let caret_input = component(&fixture, CaretInputProps::default());
        caret_input.mount(fixture.elements.clone());

        caret_input.click_wrapper();
        fixture.frames.run_frame();

        fixture.input.borrow().blur();
        assert!(caret_input.is_update_pending());
        fixture.frames.run_frame();
        assert_eq!(fixture.caret.borrow().visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_unmounted_frame_is_noop() {
        let fixture = setup();
        let caret_input = component(&fixture, CaretInputProps::default());
        caret_input.mount(fixture.elements.clone());

        caret_input.dispatch(&InputEvent::key("a"));
        caret_input.unmount();
        assert!(!caret_input.handle().is_mounted());

        assert_eq!(fixture.frames.run_frame(), 1);
        assert_eq!(caret_input.stats().updates, 0);
    }

    #[test]
    fn test_dropped_component_frame_is_noop() {
        let fixture = setup();
        let caret_input = component(&fixture, CaretInputProps::default());
        caret_input.mount(fixture.elements.clone());
        caret_input.dispatch(&InputEvent::Focus);
        drop(caret_input);

        assert_eq!(fixture.frames.run_frame(), 1);
        assert_eq!(fixture.caret.borrow().visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_caller_handler_still_runs() {
        let fixture = setup();
        let keys = Rc::new(RefCell::new(Vec::new()));
        let seen = keys.clone();

        let caret_input = component(
            &fixture,
            CaretInputProps {
                handlers: EventHandlers {
                    on_key_down: Some(Box::new(move |event| {
                        if let InputEvent::KeyDown { key } = event {
                            seen.borrow_mut().push(key.clone());
                        }
                    })),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        caret_input.mount(fixture.elements.clone());

        caret_input.dispatch(&InputEvent::key("ArrowLeft"));
        assert_eq!(*keys.borrow(), vec!["ArrowLeft".to_string()]);
        assert!(caret_input.is_update_pending());
    }
}
