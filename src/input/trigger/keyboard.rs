use std::str::FromStr;

use super::tracker::HoldTracker;
use super::{Params, Trigger, TriggerKind};
use crate::input::{Devices, Key, Payload, State};
use crate::Error;

/// Fires when a key is in a configured state.
///
/// Description: `Key [State]`, where the state defaults to [`State::Pressing`].
#[derive(Debug, Clone)]
pub struct KeyTrigger {
    key:     Key,
    state:   State,
    invoked: bool,
}

impl KeyTrigger {
    /// Creates a trigger for `key` entering or being in `state`.
    pub fn new(key: Key, state: State) -> Self { Self { key, state, invoked: false } }

    /// The key sampled.
    pub fn key(&self) -> Key { self.key }

    /// The state condition.
    pub fn state(&self) -> State { self.state }
}

impl FromStr for KeyTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        let mut params = Params::new(TriggerKind::Key, description, 1)?;
        let key = params.required("a key name")?;
        let state = params.optional("a button state")?.unwrap_or(State::Pressing);
        params.finish()?;
        Ok(Self::new(key, state))
    }
}

impl Trigger for KeyTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::Key }

    fn poll(&mut self, devices: &Devices, _delta_time: f32) {
        self.invoked =
            devices.keyboard(|keyboard| self.state.matches(keyboard.key(self.key))).unwrap_or(false);
    }

    fn was_invoked(&self) -> bool { self.invoked }

    fn payload(&self) -> Payload { Payload::None }

    fn reset(&mut self) { self.invoked = false; }
}

/// Fires once when a key has been held for a configured duration.
///
/// The payload is the held duration in seconds.
/// Description: `Key [HoldTime]`,
/// where the hold time defaults to [`DEFAULT_HOLD_TIME`](super::DEFAULT_HOLD_TIME).
#[derive(Debug, Clone)]
pub struct KeyHoldTrigger {
    key:     Key,
    hold:    HoldTracker,
    invoked: bool,
    held:    f32,
}

impl KeyHoldTrigger {
    /// Creates a trigger for `key` held for `hold_time` seconds.
    pub fn new(key: Key, hold_time: f32) -> Self {
        Self { key, hold: HoldTracker::new(hold_time), invoked: false, held: 0. }
    }

    /// The key sampled.
    pub fn key(&self) -> Key { self.key }

    /// The required hold duration in seconds.
    pub fn hold_time(&self) -> f32 { self.hold.hold_time() }
}

impl FromStr for KeyHoldTrigger {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self, Error> {
        let mut params = Params::new(TriggerKind::KeyHold, description, 1)?;
        let key = params.required("a key name")?;
        let hold_time = params.hold_time()?;
        params.finish()?;
        Ok(Self::new(key, hold_time))
    }
}

impl Trigger for KeyHoldTrigger {
    fn kind(&self) -> TriggerKind { TriggerKind::KeyHold }

    fn poll(&mut self, devices: &Devices, delta_time: f32) {
        let down = devices.keyboard(|keyboard| keyboard.key(self.key).is_down()).unwrap_or(false);
        self.invoked = self.hold.update(down, true, delta_time);
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
