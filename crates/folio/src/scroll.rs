//! Page scroll position with eased jumps.

use std::time::Duration;

/// Rows scrolled past before the header switches to its solid style.
pub const HEADER_SCROLL_ROWS: u32 = 2;

/// Easing rate of smooth scrolling, per second.
const EASE_RATE: f32 = 12.0;

#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    position: f32,
    target: f32,
    max: u32,
}

impl ScrollState {
    /// Current top row of the viewport.
    pub fn offset(&self) -> u32 {
        self.position.round().max(0.0) as u32
    }

    pub fn is_animating(&self) -> bool {
        (self.target - self.position).abs() > f32::EPSILON
    }

    /// Whether the page is scrolled far enough for the solid header.
    pub fn is_scrolled(&self) -> bool {
        self.offset() > HEADER_SCROLL_ROWS
    }

    /// Update the scroll limit after a layout change.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.target = self.target.min(max as f32);
        self.position = self.position.min(max as f32);
    }

    /// Move immediately by `delta` rows.
    pub fn scroll_by(&mut self, delta: i32) {
        let next = (self.target + delta as f32).clamp(0.0, self.max as f32);
        self.target = next;
        self.position = next;
    }

    /// Ease towards `row`.
    pub fn scroll_to(&mut self, row: u32) {
        self.target = row.min(self.max) as f32;
    }

    /// Advance the easing by `elapsed`.
    pub fn step(&mut self, elapsed: Duration) {
        if !self.is_animating() {
            return;
        }
        let t = 1.0 - (-EASE_RATE * elapsed.as_secs_f32()).exp();
        self.position += (self.target - self.position) * t;
        if (self.target - self.position).abs() < 0.5 {
            self.position = self.target;
        }
    }
}
