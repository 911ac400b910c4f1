use std::str::FromStr;

use super::tracker::{DragTracker, HoldTracker, MovementTracker};
use super::{Params, Trigger, TriggerKind};
use crate::input::{Devices, MouseButton, Payload, State};
use crate::{Error, Point, Rectangle};

/// Fires when a mouse button is in a configured state.
///
/// The payload is the pointer position.
/// Description: `Button [State]`, where the state defaults to [`State::Pressing`].
#[derive(Debug, Clone)]
pub struct MouseButtonTrigger {
    button:   MouseButton,
    state:    State,
    invoked:  bool,
    position: Point,
}

impl MouseButtonTrigger {
    /// Creates a trigger for `button` entering or being in `state`.
    pub fn new(button: MouseButton, state: State) -> Self {
        Self { button, state, invoked: false, position: Point::UNUSED }
    }

    /// The button sampled.
    pub fn button(&self) -> MouseButton { self.button }

    /// The state condition.
    pub fn state(&self) -> State { self.state }
}

impl FromStr for MouseButtonTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        let mut params = Params::new(TriggerKind::MouseButton, description, 1)?;
        let button = params.required("a mouse button")?;
        let state = params.optional("a button state")?.unwrap_or(State::Pressing);
        params.finish()?;
        Ok(Self::new(button, state))
    }
}

impl Trigger for MouseButtonTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::MouseButton }

    fn poll(&mut self, devices: &Devices, _delta_time: f32) {
        let sample = devices.mouse(|mouse| (mouse.button(self.button), mouse.position()));
        self.invoked = match sample {
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

/// Fires when the pointer moves.
///
/// The payload is the new pointer position.
/// Takes an empty description.
#[derive(Debug, Clone, Default)]
pub struct MouseMovementTrigger {
    movement: MovementTracker,
    invoked:  bool,
}

impl MouseMovementTrigger {
    /// Creates a movement trigger.
    pub fn new() -> Self { Self::default() }
}

impl FromStr for MouseMovementTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        Params::new(TriggerKind::MouseMovement, description, 0)?.finish()?;
        Ok(Self::new())
    }
}

impl Trigger for MouseMovementTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::MouseMovement }

    fn poll(&mut self, devices: &Devices, _delta_time: f32) {
        let movement = &mut self.movement;
        self.invoked = devices.mouse(|mouse| movement.update(mouse.position())).unwrap_or(false);
    }

    fn was_invoked(&self) -> bool { self.invoked }

    fn payload(&self) -> Payload { Payload::Position(self.movement.last()) }

    fn reset(&mut self) { self.invoked = false; }
}

/// Fires while the pointer drags with a button held.
///
/// The payload is the area spanned from where the button went down to the current position.
/// Description: `[Button]`, where the button defaults to [`MouseButton::Left`].
#[derive(Debug, Clone)]
pub struct MouseDragTrigger {
    button:  MouseButton,
    drag:    DragTracker,
    invoked: bool,
}

impl MouseDragTrigger {
    /// Creates a drag trigger for `button`.
    pub fn new(button: MouseButton) -> Self {
        Self { button, drag: DragTracker::default(), invoked: false }
    }

    /// The button sampled.
    pub fn button(&self) -> MouseButton { self.button }

    /// The currently dragged area, or [`Rectangle::EMPTY`] if no drag is in progress.
    pub fn area(&self) -> Rectangle { self.drag.area() }

    /// The pointer movement since the previous tick.
    pub fn delta(&self) -> Point { self.drag.delta() }
}

impl FromStr for MouseDragTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        let mut params = Params::new(TriggerKind::MouseDrag, description, 0)?;
        let button = params.optional("a mouse button")?.unwrap_or_default();
        params.finish()?;
        Ok(Self::new(button))
    }
}

impl Trigger for MouseDragTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::MouseDrag }

    fn poll(&mut self, devices: &Devices, _delta_time: f32) {
        let (button, drag) = (self.button, &mut self.drag);
        self.invoked = devices
            .mouse(|mouse| drag.update(mouse.button(button), mouse.position()))
            .unwrap_or(false);
    }

    fn was_invoked(&self) -> bool { self.invoked }

    fn payload(&self) -> Payload { Payload::Rectangle(self.drag.area()) }

    fn reset(&mut self) {
        self.invoked = false;
        self.drag.clear_delta();
    }
}

/// Fires once when a mouse button has been held inside an area for a configured duration.
///
/// The payload is the held duration in seconds.
/// Description: `Left Top Width Height [HoldTime] [Button]`,
/// where the hold time defaults to [`DEFAULT_HOLD_TIME`](super::DEFAULT_HOLD_TIME)
/// and the button defaults to [`MouseButton::Left`].
#[derive(Debug, Clone)]
pub struct MouseHoldTrigger {
    area:    Option<Rectangle>,
    button:  MouseButton,
    hold:    HoldTracker,
    invoked: bool,
    held:    f32,
}

impl MouseHoldTrigger {
    /// Creates a trigger for `button` held inside `area` for `hold_time` seconds.
    pub fn new(area: Rectangle, hold_time: f32, button: MouseButton) -> Self {
        Self::with_area(Some(area), hold_time, button)
    }

    /// Creates a trigger for `button` held anywhere for `hold_time` seconds.
    pub fn anywhere(hold_time: f32, button: MouseButton) -> Self {
        Self::with_area(None, hold_time, button)
    }

    fn with_area(area: Option<Rectangle>, hold_time: f32, button: MouseButton) -> Self {
        Self { area, button, hold: HoldTracker::new(hold_time), invoked: false, held: 0. }
    }

    /// The area the pointer must stay in, if any.
    pub fn area(&self) -> Option<Rectangle> { self.area }

    /// The required hold duration in seconds.
    pub fn hold_time(&self) -> f32 { self.hold.hold_time() }
}

impl FromStr for MouseHoldTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        let mut params = Params::new(TriggerKind::MouseHold, description, 4)?;
        let area = parse_area(&mut params)?;
        let hold_time = params.hold_time()?;
        let button = params.optional("a mouse button")?.unwrap_or_default();
        params.finish()?;
        Ok(Self::new(area, hold_time, button))
    }
}

impl Trigger for MouseHoldTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::MouseHold }

    fn poll(&mut self, devices: &Devices, delta_time: f32) {
        let (down, position) = devices
            .mouse(|mouse| (mouse.button(self.button).is_down(), mouse.position()))
            .unwrap_or((false, Point::UNUSED));
        let inside = self.area.map_or(true, |area| area.contains(position));

        self.invoked = self.hold.update(down, inside, delta_time);
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

/// Fires when the scroll wheel turns.
///
/// The payload is the wheel delta since the previous sample.
/// Takes an empty description.
#[derive(Debug, Clone, Default)]
pub struct MouseZoomTrigger {
    last:    Option<f32>,
    delta:   f32,
    invoked: bool,
}

impl MouseZoomTrigger {
    /// Creates a zoom trigger.
    pub fn new() -> Self { Self::default() }
}

impl FromStr for MouseZoomTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        Params::new(TriggerKind::MouseZoom, description, 0)?.finish()?;
        Ok(Self::new())
    }
}

impl Trigger for MouseZoomTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::MouseZoom }

    fn poll(&mut self, devices: &Devices, _delta_time: f32) {
        self.invoked = false;

        let wheel = match devices.mouse(|mouse| mouse.scroll_wheel()) {
            Some(wheel) => wheel,
            None => return,
        };
        if let Some(last) = self.last.replace(wheel) {
            if last != wheel {
                self.delta = wheel - last;
                self.invoked = true;
            }
        }
    }

    fn was_invoked(&self) -> bool { self.invoked }

    fn payload(&self) -> Payload { Payload::Float(self.delta) }

    fn reset(&mut self) {
        self.invoked = false;
        self.delta = 0.;
    }
}

/// Reads the `Left Top Width Height` prefix of a hold description.
pub(super) fn parse_area(params: &mut Params<'_>) -> Result<Rectangle, Error> {
    let left = params.required("the left edge of the area")?;
    let top = params.required("the top edge of the area")?;
    let width = params.required("the width of the area")?;
    let height = params.required("the height of the area")?;
    Ok(Rectangle::new(left, top, width, height))
}
