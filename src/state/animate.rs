//! Animation control - rewind, pause and restart caret animations
//!
//! The caret's blink (or appear) animation is declarative: the host attaches
//! it to the caret element and the engine only ever touches its clock.
//!
//! # Pattern
//!
//! - Caret hidden: every animation is rewound to zero, then paused, so the
//!   next appearance starts from a known phase instead of mid-cycle
//! - Caret moved: every animation is rewound to zero, then played, so a
//!   fresh blink cycle begins exactly when the caret relocates
//!
//! [`BlinkAnimation`] is the animation used by hosts that have no animation
//! subsystem of their own (the terminal renderer ticks it).
//!
//! # Example
//!
//! ```ignore
//! use stylable_caret::state::animate::{rewind_and_play, BlinkAnimation};
//!
//! let mut blink = BlinkAnimation::new(2);
//! blink.advance(Duration::from_millis(300));
//! assert!(!blink.phase());
//! ```

use std::time::Duration;

// =============================================================================
// ANIMATION CONTRACT
// =============================================================================

/// A running animation attached to an element.
pub trait Animation {
    /// Elapsed time since the animation started.
    fn current_time(&self) -> Duration;
    /// Seek the animation.
    fn set_current_time(&mut self, time: Duration);
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
}

/// An element that can enumerate its active animations.
pub trait Animated {
    fn for_each_animation(&mut self, f: &mut dyn FnMut(&mut dyn Animation));
}

/// Rewind every animation to time zero, then pause it.
pub fn rewind_and_pause<A: Animated + ?Sized>(target: &mut A) {
    target.for_each_animation(&mut |animation| {
        animation.set_current_time(Duration::ZERO);
        animation.pause();
    });
}

/// Rewind every animation to time zero, then (re)start it.
pub fn rewind_and_play<A: Animated + ?Sized>(target: &mut A) {
    target.for_each_animation(&mut |animation| {
        animation.set_current_time(Duration::ZERO);
        animation.play();
    });
}

// =============================================================================
// BLINK ANIMATION
// =============================================================================

/// On/off blink clock.
///
/// `fps` is the number of full on/off cycles per second: 2 FPS toggles every
/// 250ms for a 500ms cycle. `fps == 0` never toggles (steady caret).
#[derive(Debug, Clone, PartialEq)]
pub struct BlinkAnimation {
    fps: u8,
    elapsed: Duration,
    paused: bool,
}

impl BlinkAnimation {
    /// New blink clock at time zero, playing.
    pub fn new(fps: u8) -> Self {
        Self {
            fps,
            elapsed: Duration::ZERO,
            paused: false,
        }
    }

    pub fn fps(&self) -> u8 {
        self.fps
    }

    /// Time between phase toggles, None for a steady caret.
    pub fn toggle_interval(&self) -> Option<Duration> {
        if self.fps == 0 {
            return None;
        }
        // divide by 2 for on/off cycle
        Some(Duration::from_millis(1000 / u64::from(self.fps) / 2))
    }

    /// Advance the clock by `dt`. Paused clocks do not move.
    pub fn advance(&mut self, dt: Duration) {
        if !self.paused {
            self.elapsed += dt;
        }
    }

    /// Current phase: true = caret drawn, false = blinked out.
    ///
    /// Starts visible at time zero.
    pub fn phase(&self) -> bool {
        match self.toggle_interval() {
            Some(interval) if !interval.is_zero() => {
                (self.elapsed.as_millis() / interval.as_millis()) % 2 == 0
            }
            _ => true,
        }
    }
}

impl Default for BlinkAnimation {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Animation for BlinkAnimation {
    fn current_time(&self) -> Duration {
        self.elapsed
    }

    fn set_current_time(&mut self, time: Duration) {
        self.elapsed = time;
    }

    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

// =============================================================================
// TESTS
// =============================================================================
