//! Update Scheduler - at most one caret update per rendering tick.
//!
//! A click on an unfocused input fires click, focus and select in the same
//! tick. Each of them calls [`UpdateScheduler::notify`]; only the first arms
//! a pre-repaint callback, the rest find the flag set and return. The
//! reflow-forcing update then runs once, after every same-tick mutation has
//! settled.
//!
//! # Flag lifecycle
//!
//! ```text
//! notify()  ── flag unset ──> set flag, request_frame(callback)
//! notify()  ── flag set ────> no-op
//! callback  ──────────────────> clear flag, run update
//! ```
//!
//! The flag is cleared before the update runs, so a trigger raised by the
//! update itself arms the next frame instead of being dropped.
//!
//! The "before next repaint" primitive is injected as a [`FrameScheduler`].
//! [`FrameQueue`] is the one hosts drain from their own loop; it is also the
//! synchronous scheduler tests run frames with.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::types::Triggers;

// =============================================================================
// FRAME SCHEDULER
// =============================================================================

/// One-shot callback run just before the next repaint.
pub type FrameCallback = Box<dyn FnOnce()>;

/// "Run before next repaint" primitive.
///
/// Every registered callback runs exactly once; there is no cancellation.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback);
}

/// Frame callbacks queued until the host's loop calls [`FrameQueue::run_frame`].
#[derive(Default)]
pub struct FrameQueue {
    pending: RefCell<Vec<FrameCallback>>,
    frames: Cell<u64>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the callbacks queued so far. Returns how many ran.
    ///
    /// Callbacks requested while the frame runs belong to the next frame.
    pub fn run_frame(&self) -> usize {
        let callbacks = std::mem::take(&mut *self.pending.borrow_mut());
        let count = callbacks.len();
        self.frames.set(self.frames.get() + 1);

        for callback in callbacks {
            callback();
        }

        count
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Number of frames run so far.
    pub fn frames_run(&self) -> u64 {
        self.frames.get()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push(callback);
    }
}

impl fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.pending())
            .field("frames", &self.frames.get())
            .finish()
    }
}

// =============================================================================
// UPDATE SCHEDULER
// =============================================================================

/// Coalesces triggers into one deferred run of `job` per frame.
pub struct UpdateScheduler {
    armed: Rc<Cell<bool>>,
    triggers: Rc<Cell<Triggers>>,
    frames: Rc<dyn FrameScheduler>,
    job: Rc<dyn Fn()>,
}

impl UpdateScheduler {
    pub fn new(frames: Rc<dyn FrameScheduler>, job: Rc<dyn Fn()>) -> Self {
        Self {
            armed: Rc::new(Cell::new(false)),
            triggers: Rc::new(Cell::new(Triggers::empty())),
            frames,
            job,
        }
    }

    /// Record a trigger; arm a frame unless one is already armed.
    ///
    /// Returns true if this call armed the frame.
    pub fn notify(&self, trigger: Triggers) -> bool {
        self.triggers.set(self.triggers.get() | trigger);

        if self.armed.get() {
            trace!(?trigger, "caret update already armed");
            return false;
        }

        self.armed.set(true);

        let armed = Rc::clone(&self.armed);
        let triggers = Rc::clone(&self.triggers);
        let job = Rc::clone(&self.job);

        self.frames.request_frame(Box::new(move || {
            armed.set(false);
            let coalesced = triggers.replace(Triggers::empty());
            debug!(?coalesced, "running caret update");
            job();
        }));

        true
    }

    /// Is a frame armed and not yet run.
    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }
}

impl fmt::Debug for UpdateScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateScheduler")
            .field("armed", &self.armed.get())
            .field("triggers", &self.triggers.get())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================
