//! End-to-end behavior of a mounted caret input.
//!
//! Drives the component the way a host does: events in, frames run by the
//! host loop, caret element inspected afterwards. Geometry uses an 8x16 cell
//! measure and a 200x28 wrapper with `padding: 5px 7px; border: 1px`, so the
//! native caret at column `c` sits at `x = 7 + 1 + 8c`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use stylable_caret::host::memory::{MemoryDocument, MemoryInput, StaticContainer};
use stylable_caret::host::{shared, ContainerElement, Elements, InputElement, Shared};
use stylable_caret::state::focus;
use stylable_caret::{
    Animation, BoxStyle, CaretConfig, CaretElement, CaretError, CaretInput, CaretInputProps,
    CaretOffset, CellMeasure, ContainerGeometry, DocumentFocusPolicy, Edges, EventHandlers,
    FrameQueue, FrameScheduler, InputEvent, InputHandle, InputType, Length, OffsetAdjust, Rect,
    TaffyContainer, TerminalCaret, Visibility, PASSWORD_MASK,
};

// =============================================================================
// FIXTURE
// =============================================================================

const CARET_WIDTH: f32 = 2.0;
const CARET_HEIGHT: f32 = 16.0;

struct Host {
    frames: Rc<FrameQueue>,
    input: Shared<MemoryInput>,
    caret: Shared<CaretElement>,
    measure: Shared<CellMeasure>,
    component: CaretInput,
}

impl Host {
    fn frame(&self) {
        self.frames.run_frame();
    }

    fn offset(&self) -> CaretOffset {
        self.caret.borrow().transform()
    }

    fn visibility(&self) -> Visibility {
        self.caret.borrow().visibility()
    }

    /// Move the native caret and report it the way a key press would.
    fn move_caret(&self, column: usize) {
        self.input.borrow_mut().set_caret(column);
        self.component.dispatch(&InputEvent::key("ArrowLeft"));
    }
}

fn wrapper_geometry() -> ContainerGeometry {
    ContainerGeometry {
        padding: Edges::symmetric(5.0, 7.0),
        border: Edges::all(1.0),
        bounding_box: Rect::new(40.0, 100.0, 200.0, 28.0),
    }
}

fn setup_with(value: &str, props: CaretInputProps) -> Host {
    setup_with_wrapper(value, props, shared(StaticContainer::new(wrapper_geometry())))
}

fn setup_with_wrapper(
    value: &str,
    props: CaretInputProps,
    wrapper: Shared<dyn ContainerElement>,
) -> Host {
    focus::reset_focus_state();

    let frames = Rc::new(FrameQueue::new());
    let input = shared(MemoryInput::new(value));
    let caret = shared(
        CaretElement::new(CARET_WIDTH, CARET_HEIGHT)
            .with_animation(stylable_caret::BlinkAnimation::new(props.config.blink_fps)),
    );
    let measure = shared(CellMeasure::new(8.0, 16.0));

    let scheduler: Rc<dyn FrameScheduler> = frames.clone();
    let component = CaretInput::new(props, scheduler);
    component.mount(Elements {
        wrapper,
        input: input.clone(),
        caret: caret.clone(),
        measure: measure.clone(),
        document: Rc::new(MemoryDocument),
    });

    Host {
        frames,
        input,
        caret,
        measure,
        component,
    }
}

/// Wrapper whose layout can be made to fail.
struct FlakyWrapper {
    failing: Rc<Cell<bool>>,
}

impl ContainerElement for FlakyWrapper {
    fn geometry(&self) -> Result<ContainerGeometry, CaretError> {
        if self.failing.get() {
            Err(CaretError::Layout("wrapper detached".to_string()))
        } else {
            Ok(wrapper_geometry())
        }
    }
}

fn setup(value: &str) -> Host {
    setup_with(value, CaretInputProps::default())
}

/// Focus the input from a wrapper click and let the frame run.
fn focus_input(host: &Host) {
    host.component.click_wrapper();
    host.frame();
}

// =============================================================================
// VISIBILITY
// =============================================================================

#[test]
fn test_range_selection_is_hidden() {
    let host = setup("hello");
    focus_input(&host);
    assert_eq!(host.visibility(), Visibility::Visible);

    host.input.borrow_mut().set_selection(Some(1), Some(4));
    host.component.dispatch(&InputEvent::Select);
    host.frame();

    assert_eq!(host.visibility(), Visibility::Hidden);
}

#[test]
fn test_unfocused_input_is_hidden() {
    let host = setup("hello");

    host.component.dispatch(&InputEvent::Click { x: 0.0, y: 0.0 });
    host.frame();

    assert_eq!(host.visibility(), Visibility::Hidden);
    assert_eq!(host.component.stats().updates, 1);
    assert_eq!(host.component.stats().last_offset, None);
}

#[test]
fn test_blur_hides_and_rewinds_animation() {
    let host = setup("hello");
    focus_input(&host);
    host.caret.borrow_mut().tick(Duration::from_millis(700));

    host.input.borrow().blur();
    host.frame();

    let caret = host.caret.borrow();
    assert_eq!(caret.visibility(), Visibility::Hidden);
    assert_eq!(caret.animations()[0].current_time(), Duration::ZERO);
    assert!(caret.animations()[0].is_paused());
}

#[test]
fn test_reposition_restarts_animation() {
    let host = setup("hello");
    focus_input(&host);
    host.caret.borrow_mut().tick(Duration::from_millis(700));
    assert_eq!(host.caret.borrow().animations()[0].current_time(), Duration::from_millis(700));

    host.move_caret(3);
    host.frame();

    let caret = host.caret.borrow();
    assert_eq!(caret.visibility(), Visibility::Visible);
    assert_eq!(caret.animations()[0].current_time(), Duration::ZERO);
    assert!(!caret.animations()[0].is_paused());
}

#[test]
fn test_refocus_replays_paused_animation() {
    let host = setup("hello");
    focus_input(&host);
    host.input.borrow().blur();
    host.frame();
    assert!(host.caret.borrow().animations()[0].is_paused());

    // Paused clocks do not advance
    host.caret.borrow_mut().tick(Duration::from_millis(300));
    focus_input(&host);

    let caret = host.caret.borrow();
    assert_eq!(caret.visibility(), Visibility::Visible);
    assert_eq!(caret.animations()[0].current_time(), Duration::ZERO);
    assert!(!caret.animations()[0].is_paused());
    assert!(caret.is_blinking());
}

#[test]
fn test_layout_failure_hides_and_keeps_last_offset() {
    let failing = Rc::new(Cell::new(false));
    let host = setup_with_wrapper(
        "hello",
        CaretInputProps::default(),
        shared(FlakyWrapper {
            failing: failing.clone(),
        }),
    );
    focus_input(&host);
    let last = host.component.stats().last_offset;
    assert!(last.is_some());

    failing.set(true);
    host.move_caret(2);
    host.frame();

    let caret = host.caret.borrow();
    assert_eq!(caret.visibility(), Visibility::Hidden);
    assert_eq!(caret.animations()[0].current_time(), Duration::ZERO);
    assert!(caret.animations()[0].is_paused());
    assert_eq!(host.component.stats().updates, 2);
    assert_eq!(host.component.stats().last_offset, last);
}

#[test]
fn test_layout_recovers_on_next_trigger() {
    let failing = Rc::new(Cell::new(true));
    let host = setup_with_wrapper(
        "hello",
        CaretInputProps::default(),
        shared(FlakyWrapper {
            failing: failing.clone(),
        }),
    );
    focus_input(&host);
    assert_eq!(host.visibility(), Visibility::Hidden);

    failing.set(false);
    host.component.dispatch(&InputEvent::Select);
    host.frame();
    assert_eq!(host.visibility(), Visibility::Visible);
    assert_eq!(host.offset(), CaretOffset::new(7.0, 6.0));
}

#[test]
fn test_document_focus_loss_hides() {
    let host = setup("hello");
    focus_input(&host);

    focus::set_document_focus(false);
    assert!(host.input.borrow().has_focus());
    host.frame();
    assert_eq!(host.visibility(), Visibility::Hidden);

    focus::set_document_focus(true);
    host.frame();
    assert_eq!(host.visibility(), Visibility::Visible);
}

#[test]
fn test_document_focus_ignored_by_policy() {
    let host = setup_with(
        "hello",
        CaretInputProps {
            config: CaretConfig {
                document_focus: DocumentFocusPolicy::Ignore,
                ..Default::default()
            },
            ..Default::default()
        },
    );
    focus_input(&host);

    focus::set_document_focus(false);
    host.frame();
    assert_eq!(host.visibility(), Visibility::Visible);
}

// =============================================================================
// SCHEDULING
// =============================================================================

#[test]
fn test_same_tick_events_recompute_once() {
    let host = setup("hello");

    host.component.click_wrapper();
    host.component.dispatch(&InputEvent::Click { x: 20.0, y: 10.0 });
    host.component.dispatch(&InputEvent::Select);
    host.component.dispatch(&InputEvent::key("a"));
    host.component.dispatch(&InputEvent::Scroll { scroll_left: 0.0 });

    assert_eq!(host.frames.pending(), 1);
    host.frame();
    assert_eq!(host.component.stats().updates, 1);

    // A later tick arms a fresh frame
    host.component.dispatch(&InputEvent::key("b"));
    host.frame();
    assert_eq!(host.component.stats().updates, 2);
}

#[test]
fn test_caller_handlers_run_alongside_updates() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let on_focus = log.clone();
    let on_select = log.clone();

    let host = setup_with(
        "hello",
        CaretInputProps {
            handlers: EventHandlers {
                on_focus: Some(Box::new(move |_| on_focus.borrow_mut().push("focus"))),
                on_select: Some(Box::new(move |_| on_select.borrow_mut().push("select"))),
                ..Default::default()
            },
            ..Default::default()
        },
    );

    host.component.click_wrapper();
    host.component.dispatch(&InputEvent::Select);
    host.frame();

    assert_eq!(*log.borrow(), vec!["focus", "select"]);
    assert_eq!(host.component.stats().updates, 1);
}

#[test]
fn test_focus_handlers_can_read_the_input() {
    let slot: Rc<RefCell<Option<InputHandle>>> = Rc::new(RefCell::new(None));
    let values = Rc::new(RefCell::new(Vec::new()));

    let (focus_slot, focus_values) = (slot.clone(), values.clone());
    let (blur_slot, blur_values) = (slot.clone(), values.clone());

    let host = setup_with(
        "hello",
        CaretInputProps {
            handlers: EventHandlers {
                on_focus: Some(Box::new(move |_| {
                    if let Some(handle) = focus_slot.borrow().as_ref() {
                        focus_values.borrow_mut().push(("focus", handle.value()));
                    }
                })),
                on_blur: Some(Box::new(move |_| {
                    if let Some(handle) = blur_slot.borrow().as_ref() {
                        blur_values.borrow_mut().push(("blur", handle.value()));
                    }
                })),
                ..Default::default()
            },
            ..Default::default()
        },
    );
    let handle = host.component.handle();
    *slot.borrow_mut() = Some(handle.clone());

    // Through the element, with the host holding a borrow
    host.input.borrow().focus();
    host.input.borrow().blur();
    // Through the handle
    handle.with(|input| input.focus());
    assert!(handle.blur());

    let hello = Some("hello".to_string());
    assert_eq!(
        *values.borrow(),
        vec![
            ("focus", hello.clone()),
            ("blur", hello.clone()),
            ("focus", hello.clone()),
            ("blur", hello),
        ]
    );
}

#[test]
fn test_unmounted_component_ignores_armed_frame() {
    let host = setup("hello");
    focus_input(&host);
    let before = host.offset();

    host.move_caret(3);
    host.component.unmount();
    host.frame();

    assert_eq!(host.offset(), before);
    assert_eq!(host.component.stats().updates, 1);
    assert!(!host.component.handle().is_mounted());
}

// =============================================================================
// POSITION
// =============================================================================

#[test]
fn test_empty_input_offset() {
    let host = setup_with(
        "",
        CaretInputProps {
            config: CaretConfig {
                offset: OffsetAdjust::new(Length::px(3.0), Length::ZERO),
                ..Default::default()
            },
            ..Default::default()
        },
    );
    focus_input(&host);

    // padding.left + border.left - caret_width / 2 + adjust.x
    assert_eq!(host.offset().x, 7.0 + 1.0 - 1.0 + 3.0);
    // content height 28 - 12 = 16 = caret height
    assert_eq!(host.offset().y, 5.0 + 1.0);
}

#[test]
fn test_caret_inside_hello() {
    let host = setup("hello");
    focus_input(&host);

    host.move_caret(2);
    host.frame();

    assert_eq!(host.measure.borrow().text(), "he");
    assert_eq!(host.offset(), CaretOffset::new(7.0 + 1.0 + 16.0 - 1.0, 6.0));
    assert_eq!(host.component.stats().last_offset, Some(host.offset()));
}

#[test]
fn test_recompute_is_idempotent() {
    let host = setup("hello");
    focus_input(&host);
    host.move_caret(4);
    host.frame();
    let first = host.offset();

    host.component.dispatch(&InputEvent::Select);
    host.frame();
    assert_eq!(host.offset(), first);
}

#[test]
fn test_round_trip_to_column_zero() {
    let host = setup("hello");
    focus_input(&host);
    let origin = host.offset();

    host.move_caret(5);
    host.frame();
    assert_ne!(host.offset(), origin);

    host.move_caret(0);
    host.frame();
    assert_eq!(host.offset(), origin);
}

#[test]
fn test_scroll_shifts_caret_left() {
    let host = setup("a long line of text");
    focus_input(&host);
    host.move_caret(10);
    host.frame();
    let unscrolled = host.offset();

    host.input.borrow_mut().set_scroll_left(24.0);
    host.component.dispatch(&InputEvent::Scroll { scroll_left: 24.0 });
    host.frame();

    assert_eq!(host.offset().x, unscrolled.x - 24.0);
    assert_eq!(host.offset().y, unscrolled.y);
}

#[test]
fn test_password_measures_mask() {
    let host = setup_with(
        "secret",
        CaretInputProps {
            input_type: InputType::Password,
            ..Default::default()
        },
    );
    focus_input(&host);
    host.move_caret(3);
    host.frame();

    let expected: String = std::iter::repeat_n(PASSWORD_MASK, 3).collect();
    assert_eq!(host.measure.borrow().text(), expected);
    assert_eq!(host.input.borrow().attribute("type"), Some("password"));
}

#[test]
fn test_taffy_wrapper_centers_vertically() {
    focus::reset_focus_state();

    let frames = Rc::new(FrameQueue::new());
    let input = shared(MemoryInput::new(""));
    let caret = shared(CaretElement::new(2.0, 20.0));
    let scheduler: Rc<dyn FrameScheduler> = frames.clone();
    let component = CaretInput::new(CaretInputProps::default(), scheduler);

    component.mount(Elements {
        wrapper: shared(TaffyContainer::new(BoxStyle {
            height: Some(250.0),
            padding: Edges::new(7.0, 5.0, 25.0, 5.0),
            border: Edges::all(1.0),
            content: (0.0, 35.0),
            ..Default::default()
        })),
        input: input.clone(),
        caret: caret.clone(),
        measure: shared(CellMeasure::new(10.0, 20.0)),
        document: Rc::new(MemoryDocument),
    });

    component.click_wrapper();
    frames.run_frame();

    // content height 250 - 34 = 216, (216 - 20) / 2 = 98
    assert_eq!(caret.borrow().transform(), CaretOffset::new(5.0, 8.0 + 98.0));
}

// =============================================================================
// HANDLE + TERMINAL
// =============================================================================

#[test]
fn test_handle_reaches_native_input() {
    let host = setup("hello");
    let handle = host.component.handle();

    assert_eq!(handle.value().as_deref(), Some("hello"));
    assert!(handle.focus());
    assert!(host.component.is_update_pending());

    host.component.unmount();
    assert_eq!(handle.value(), None);
}

#[test]
fn test_terminal_paints_caret_cell() {
    let host = setup("hello");
    focus_input(&host);
    host.move_caret(2);
    host.frame();

    let mut terminal = TerminalCaret::from_config((0, 0), (8.0, 16.0), &CaretConfig::default());
    let mut out = Vec::new();
    terminal.paint(&mut out, &host.caret.borrow()).unwrap();

    // one cell of padding + border, then two characters
    let written = String::from_utf8(out).unwrap();
    assert!(written.contains("\x1b[1;4H"), "{written:?}");
    assert!(written.ends_with("\x1b[?25h"), "{written:?}");

    host.input.borrow().blur();
    host.frame();

    let mut out = Vec::new();
    terminal.paint(&mut out, &host.caret.borrow()).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "\x1b[?25l");
}
