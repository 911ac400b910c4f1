use std::str::FromStr;

use super::mouse::parse_area;
use super::tracker::{DragTracker, HoldTracker, MovementTracker};
use super::{Params, Trigger, TriggerKind};
use crate::input::{Devices, Payload, State};
use crate::{Error, Point, Rectangle};

/// Fires when the primary touch point is in a configured state.
///
/// The payload is the touch position.
/// Description: `[State]`, where the state defaults to [`State::Pressing`].
#[derive(Debug, Clone)]
pub struct TouchPressTrigger {
    state:    State,
    invoked:  bool,
    position: Point,
}

impl TouchPressTrigger {
    /// Creates a trigger for the touch point entering or being in `state`.
    pub fn new(state: State) -> Self { Self { state, invoked: false, position: Point::UNUSED } }

    /// The state condition.
    pub fn state(&self) -> State { self.state }
}

impl FromStr for TouchPressTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        let mut params = Params::new(TriggerKind::TouchPress, description, 0)?;
        let state = params.optional("a touch state")?.unwrap_or(State::Pressing);
        params.finish()?;
        Ok(Self::new(state))
    }
}

impl Trigger for TouchPressTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::TouchPress }

    fn poll(&mut self, devices: &Devices, _delta_time: f32) {
        self.invoked = match devices.touch(|touch| (touch.state(), touch.position())) {
            Some((state, position)) if self.state.matches(state) => {
                self.position = position;
                true
            }
            _ => false,
        };
    }

    fn was_invoked(&self) -> bool { self.invoked }

    fn payload(&self) -> Payload { Payload::Position(self.position) }

    fn reset(&mut self) {
        self.invoked = false;
        self.position = Point::UNUSED;
    }
}

/// Fires when the primary touch point moves.
///
/// The payload is the new touch position.
/// Takes an empty description.
#[derive(Debug, Clone, Default)]
pub struct TouchMovementTrigger {
    movement: MovementTracker,
    invoked:  bool,
}

impl TouchMovementTrigger {
    /// Creates a movement trigger.
    pub fn new() -> Self { Self::default() }
}

impl FromStr for TouchMovementTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        Params::new(TriggerKind::TouchMovement, description, 0)?.finish()?;
        Ok(Self::new())
    }
}

impl Trigger for TouchMovementTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::TouchMovement }

    fn poll(&mut self, devices: &Devices, _delta_time: f32) {
        let movement = &mut self.movement;
        self.invoked = devices.touch(|touch| movement.update(touch.position())).unwrap_or(false);
    }

    fn was_invoked(&self) -> bool { self.invoked }

    fn payload(&self) -> Payload { Payload::Position(self.movement.last()) }

    fn reset(&mut self) { self.invoked = false; }
}

/// Fires while the primary touch point drags.
///
/// The payload is the area spanned from where the touch started to the current position.
/// Takes an empty description.
#[derive(Debug, Clone, Default)]
pub struct TouchDragTrigger {
    drag:    DragTracker,
    invoked: bool,
}

impl TouchDragTrigger {
    /// Creates a drag trigger.
    pub fn new() -> Self { Self::default() }

    /// The currently dragged area, or [`Rectangle::EMPTY`] if no drag is in progress.
    pub fn area(&self) -> Rectangle { self.drag.area() }

    /// The touch movement since the previous tick.
    pub fn delta(&self) -> Point { self.drag.delta() }
}

impl FromStr for TouchDragTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        Params::new(TriggerKind::TouchDrag, description, 0)?.finish()?;
        Ok(Self::new())
    }
}

impl Trigger for TouchDragTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::TouchDrag }

    fn poll(&mut self, devices: &Devices, _delta_time: f32) {
        let drag = &mut self.drag;
        self.invoked =
            devices.touch(|touch| drag.update(touch.state(), touch.position())).unwrap_or(false);
    }

    fn was_invoked(&self) -> bool { self.invoked }

    fn payload(&self) -> Payload { Payload::Rectangle(self.drag.area()) }

    fn reset(&mut self) {
        self.invoked = false;
        self.drag.clear_delta();
    }
}

/// Fires once when the primary touch point has been held inside an area for a configured duration.
///
/// The payload is the held duration in seconds.
/// Description: `Left Top Width Height [HoldTime]`,
/// where the hold time defaults to [`DEFAULT_HOLD_TIME`](super::DEFAULT_HOLD_TIME).
#[derive(Debug, Clone)]
pub struct TouchHoldTrigger {
    area:    Rectangle,
    hold:    HoldTracker,
    invoked: bool,
    held:    f32,
}

impl TouchHoldTrigger {
    /// Creates a trigger for a touch held inside `area` for `hold_time` seconds.
    pub fn new(area: Rectangle, hold_time: f32) -> Self {
        Self { area, hold: HoldTracker::new(hold_time), invoked: false, held: 0. }
    }

    /// The area the touch must stay in.
    pub fn area(&self) -> Rectangle { self.area }

    /// The required hold duration in seconds.
    pub fn hold_time(&self) -> f32 { self.hold.hold_time() }
}

impl FromStr for TouchHoldTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        let mut params = Params::new(TriggerKind::TouchHold, description, 4)?;
        let area = parse_area(&mut params)?;
        let hold_time = params.hold_time()?;
        params.finish()?;
        Ok(Self::new(area, hold_time))
    }
}

impl Trigger for TouchHoldTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::TouchHold }

    fn poll(&mut self, devices: &Devices, delta_time: f32) {
        let (down, position) = devices
            .touch(|touch| (touch.state().is_down(), touch.position()))
            .unwrap_or((false, Point::UNUSED));

        self.invoked = self.hold.update(down, self.area.contains(position), delta_time);
        if self.invoked {
            self.held = self.hold.elapsed();
        }
    }

    fn was_invoked(&self) -> bool { self.invoked }

    fn payload(&self) -> Payload { Payload::Float(self.held) }

    fn reset(&mut self) {
        self.invoked = false;
        self.held = 0.;
    }
}
