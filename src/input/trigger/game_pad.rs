use std::str::FromStr;

use super::{Params, Trigger, TriggerKind};
use crate::input::{Devices, GamePadButton, Payload, State, ThumbStick};
use crate::{Error, Point};

/// Fires when a game pad button is in a configured state.
///
/// Description: `Button [State]`, where the state defaults to [`State::Pressing`].
#[derive(Debug, Clone)]
pub struct GamePadButtonTrigger {
    button:  GamePadButton,
    state:   State,
    invoked: bool,
}

impl GamePadButtonTrigger {
    /// Creates a trigger for `button` entering or being in `state`.
    pub fn new(button: GamePadButton, state: State) -> Self {
        Self { button, state, invoked: false }
    }

    /// The button sampled.
    pub fn button(&self) -> GamePadButton { self.button }

    /// The state condition.
    pub fn state(&self) -> State { self.state }
}

impl FromStr for GamePadButtonTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        let mut params = Params::new(TriggerKind::GamePadButton, description, 1)?;
        let button = params.required("a game pad button")?;
        let state = params.optional("a button state")?.unwrap_or(State::Pressing);
        params.finish()?;
        Ok(Self::new(button, state))
    }
}

impl Trigger for GamePadButtonTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::GamePadButton }

    fn poll(&mut self, devices: &Devices, _delta_time: f32) {
        self.invoked = devices
            .game_pad(|pad| self.state.matches(pad.button(self.button)))
            .unwrap_or(false);
    }

    fn was_invoked(&self) -> bool { self.invoked }

    fn payload(&self) -> Payload { Payload::None }

    fn reset(&mut self) { self.invoked = false; }
}

/// Fires on every tick in which a thumb stick is deflected from its center.
///
/// The payload is the stick deflection.
/// Description: `LeftThumbStick` or `RightThumbStick`.
#[derive(Debug, Clone)]
pub struct GamePadAnalogTrigger {
    stick:      ThumbStick,
    invoked:    bool,
    deflection: Point,
}

impl GamePadAnalogTrigger {
    /// Creates a trigger for `stick`.
    pub fn new(stick: ThumbStick) -> Self { Self { stick, invoked: false, deflection: Point::ZERO } }

    /// The stick sampled.
    pub fn stick(&self) -> ThumbStick { self.stick }
}

impl FromStr for GamePadAnalogTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        let mut params = Params::new(TriggerKind::GamePadAnalog, description, 1)?;
        let stick = params.required("a thumb stick")?;
        params.finish()?;
        Ok(Self::new(stick))
    }
}

impl Trigger for GamePadAnalogTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::GamePadAnalog }

    fn poll(&mut self, devices: &Devices, _delta_time: f32) {
        let deflection = devices.game_pad(|pad| pad.thumb_stick(self.stick)).unwrap_or(Point::ZERO);
        self.invoked = deflection != Point::ZERO;
        if self.invoked {
            self.deflection = deflection;
        }
    }

    fn was_invoked(&self) -> bool { self.invoked }

    fn payload(&self) -> Payload { Payload::Position(self.deflection) }

    fn reset(&mut self) {
        self.invoked = false;
        self.deflection = Point::ZERO;
    }
}
