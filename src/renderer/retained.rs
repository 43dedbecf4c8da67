//! Retained caret element.
//!
//! In-memory presentation object for the overlay caret: the engine writes
//! visibility and transform into it, a renderer reads them back out. Hosts
//! without a DOM (terminal, custom toolkits) mount one of these as the caret.

use std::time::Duration;

use crate::config::CaretConfig;
use crate::host::CaretSurface;
use crate::state::animate::{Animated, Animation, BlinkAnimation};
use crate::types::{CaretOffset, Rect, Visibility};

/// The overlay caret, retained between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct CaretElement {
    width: f32,
    height: f32,
    visibility: Visibility,
    transform: CaretOffset,
    animations: Vec<BlinkAnimation>,
    class: String,
    style: String,
}

impl CaretElement {
    /// Hidden caret of the given size, without animations.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            visibility: Visibility::Hidden,
            transform: CaretOffset::default(),
            animations: Vec::new(),
            class: String::new(),
            style: String::new(),
        }
    }

    /// Hidden caret blinking at the configured rate.
    pub fn from_config(width: f32, height: f32, config: &CaretConfig) -> Self {
        Self::new(width, height).with_animation(BlinkAnimation::new(config.blink_fps))
    }

    /// Attach an animation.
    pub fn with_animation(mut self, animation: BlinkAnimation) -> Self {
        self.animations.push(animation);
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn transform(&self) -> CaretOffset {
        self.transform
    }

    pub fn animations(&self) -> &[BlinkAnimation] {
        &self.animations
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    /// Advance every animation clock by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        for animation in &mut self.animations {
            animation.advance(dt);
        }
    }

    /// Is any blink animation running.
    pub fn is_blinking(&self) -> bool {
        self.animations
            .iter()
            .any(|a| !a.is_paused() && a.toggle_interval().is_some())
    }

    /// Would the caret be painted right now (visible and in its "on" phase).
    pub fn is_drawn(&self) -> bool {
        self.visibility.is_visible() && self.animations.iter().all(BlinkAnimation::phase)
    }
}

impl Animated for CaretElement {
    fn for_each_animation(&mut self, f: &mut dyn FnMut(&mut dyn Animation)) {
        for animation in &mut self.animations {
            f(animation);
        }
    }
}

impl CaretSurface for CaretElement {
    /// Box after the transform, like a layout engine would report it.
    fn bounding_box(&self) -> Rect {
        Rect::new(self.transform.x, self.transform.y, self.width, self.height)
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    fn set_transform(&mut self, offset: CaretOffset) {
        self.transform = offset;
    }

    fn set_class(&mut self, class: &str) {
        self.class = class.to_string();
    }

    fn set_style(&mut self, style: &str) {
        self.style = style.to_string();
    }
}
