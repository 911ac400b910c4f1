//! Sampling state shared by the mouse, touch and game pad triggers.

use crate::input::State;
use crate::{Point, Rectangle};

/// Detects changes between real position samples.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MovementTracker {
    last: Point,
}

impl Default for MovementTracker {
    fn default() -> Self { Self { last: Point::UNUSED } }
}

impl MovementTracker {
    /// Records a sample and returns whether it moved from the previous real sample.
    ///
    /// [`Point::UNUSED`] samples are ignored.
    /// The first real sample is only recorded.
    pub(crate) fn update(&mut self, sample: Point) -> bool {
        if !sample.is_used() {
            return false;
        }

        let moved = self.last.is_used() && self.last != sample;
        self.last = sample;
        moved
    }

    pub(crate) fn last(&self) -> Point { self.last }
}

/// Tracks the area spanned by a pointer while its button is held.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragTracker {
    start: Point,
    last:  Point,
    area:  Rectangle,
    delta: Point,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self { start: Point::UNUSED, last: Point::UNUSED, area: Rectangle::EMPTY, delta: Point::ZERO }
    }
}

impl DragTracker {
    /// Records a sample and returns whether the dragged area changed.
    pub(crate) fn update(&mut self, state: State, position: Point) -> bool {
        self.delta = Point::ZERO;

        match state {
            State::Pressing if position.is_used() => {
                self.start = position;
                self.last = position;
                self.area = Rectangle::from_corners(position, position);
                false
            }
            State::Pressed if self.start.is_used() => {
                if !position.is_used() {
                    *self = Self::default();
                    return false;
                }
                if position == self.last {
                    return false;
                }

                self.delta = position - self.last;
                self.last = position;
                self.area = Rectangle::from_corners(self.start, position);
                true
            }
            _ => {
                *self = Self::default();
                false
            }
        }
    }

    pub(crate) fn area(&self) -> Rectangle { self.area }

    pub(crate) fn delta(&self) -> Point { self.delta }

    pub(crate) fn clear_delta(&mut self) { self.delta = Point::ZERO; }
}

/// Accumulates how long a button has been held.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HoldTracker {
    hold_time: f32,
    elapsed:   f32,
    /// Set once the hold time is reached, until the button is released.
    latched:   bool,
}

impl HoldTracker {
    pub(crate) fn new(hold_time: f32) -> Self { Self { hold_time, elapsed: 0., latched: false } }

    /// Advances the timer and returns whether the hold time was reached in this tick.
    ///
    /// Leaving the area resets the timer but does not re-arm a latched tracker.
    pub(crate) fn update(&mut self, down: bool, inside: bool, delta_time: f32) -> bool {
        if !down {
            self.elapsed = 0.;
            self.latched = false;
            return false;
        }
        if !inside {
            self.elapsed = 0.;
            return false;
        }
        if self.latched {
            return false;
        }

        self.elapsed += delta_time;
        if self.elapsed >= self.hold_time {
            self.latched = true;
            true
        } else {
            false
        }
    }

    pub(crate) fn hold_time(&self) -> f32 { self.hold_time }

    pub(crate) fn elapsed(&self) -> f32 { self.elapsed }
}
