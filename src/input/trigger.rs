//! Triggers sample one device each tick and record whether their condition was met.
//!
//! Every trigger type can be constructed with typed parameters
//! or parsed from a whitespace-separated description,
//! e.g. `"Escape Pressing".parse::<KeyTrigger>()`.
//! [`create`] additionally resolves the trigger type from a tag,
//! which is how [`Bindings`](super::Bindings) builds triggers from authored content.

use std::fmt;
use std::str::{FromStr, SplitWhitespace};

use super::{DeviceKind, Devices, Payload, PayloadShape};
use crate::{Error, Result};

mod game_pad;
pub use game_pad::{GamePadAnalogTrigger, GamePadButtonTrigger};

mod keyboard;
pub use keyboard::{KeyHoldTrigger, KeyTrigger};

mod mouse;
pub use mouse::{
    MouseButtonTrigger, MouseDragTrigger, MouseHoldTrigger, MouseMovementTrigger, MouseZoomTrigger,
};

mod touch;
pub use touch::{TouchDragTrigger, TouchHoldTrigger, TouchMovementTrigger, TouchPressTrigger};

mod tracker;

#[cfg(test)]
mod tests;

/// The hold time used when a hold trigger description omits it, in seconds.
pub const DEFAULT_HOLD_TIME: f32 = 0.5;

/// A condition sampled from one device once per tick.
pub trait Trigger: fmt::Debug + 'static {
    /// The type of this trigger.
    fn kind(&self) -> TriggerKind;

    /// The device this trigger samples.
    fn device(&self) -> DeviceKind { self.kind().device() }

    /// The shape of the payload reported by [`payload`](Self::payload).
    fn shape(&self) -> PayloadShape { self.kind().shape() }

    /// Samples the device and updates the invocation state.
    ///
    /// If the device is detached or unavailable, the trigger is not invoked.
    fn poll(&mut self, devices: &Devices, delta_time: f32);

    /// Whether the condition was met in the last poll.
    fn was_invoked(&self) -> bool;

    /// The value associated with the last invocation.
    fn payload(&self) -> Payload;

    /// Clears the invocation flag and transient payload.
    fn reset(&mut self);
}

/// The closed set of trigger types.
///
/// Parses from the trigger type name, e.g. `"KeyTrigger"`,
/// or from the name without the `Trigger` suffix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum TriggerKind {
    /// See [`KeyTrigger`].
    #[strum(to_string = "KeyTrigger", serialize = "Key")]
    Key,
    /// See [`KeyHoldTrigger`].
    #[strum(to_string = "KeyHoldTrigger", serialize = "KeyHold")]
    KeyHold,
    /// See [`MouseButtonTrigger`].
    #[strum(to_string = "MouseButtonTrigger", serialize = "MouseButton")]
    MouseButton,
    /// See [`MouseMovementTrigger`].
    #[strum(to_string = "MouseMovementTrigger", serialize = "MouseMovement")]
    MouseMovement,
    /// See [`MouseDragTrigger`].
    #[strum(to_string = "MouseDragTrigger", serialize = "MouseDrag")]
    MouseDrag,
    /// See [`MouseHoldTrigger`].
    #[strum(to_string = "MouseHoldTrigger", serialize = "MouseHold")]
    MouseHold,
    /// See [`MouseZoomTrigger`].
    #[strum(to_string = "MouseZoomTrigger", serialize = "MouseZoom")]
    MouseZoom,
    /// See [`TouchPressTrigger`].
    #[strum(to_string = "TouchPressTrigger", serialize = "TouchPress")]
    TouchPress,
    /// See [`TouchMovementTrigger`].
    #[strum(to_string = "TouchMovementTrigger", serialize = "TouchMovement")]
    TouchMovement,
    /// See [`TouchDragTrigger`].
    #[strum(to_string = "TouchDragTrigger", serialize = "TouchDrag")]
    TouchDrag,
    /// See [`TouchHoldTrigger`].
    #[strum(to_string = "TouchHoldTrigger", serialize = "TouchHold")]
    TouchHold,
    /// See [`GamePadButtonTrigger`].
    #[strum(to_string = "GamePadButtonTrigger", serialize = "GamePadButton")]
    GamePadButton,
    /// See [`GamePadAnalogTrigger`].
    #[strum(to_string = "GamePadAnalogTrigger", serialize = "GamePadAnalog")]
    GamePadAnalog,
}

impl TriggerKind {
    /// The device sampled by triggers of this type.
    pub fn device(self) -> DeviceKind {
        match self {
            Self::Key | Self::KeyHold => DeviceKind::Keyboard,
            Self::MouseButton
            | Self::MouseMovement
            | Self::MouseDrag
            | Self::MouseHold
            | Self::MouseZoom => DeviceKind::Mouse,
            Self::TouchPress | Self::TouchMovement | Self::TouchDrag | Self::TouchHold => {
                DeviceKind::Touch
            }
            Self::GamePadButton | Self::GamePadAnalog => DeviceKind::GamePad,
        }
    }

    /// The payload shape reported by triggers of this type.
    pub fn shape(self) -> PayloadShape {
        match self {
            Self::Key | Self::GamePadButton => PayloadShape::None,
            Self::MouseButton
            | Self::MouseMovement
            | Self::TouchPress
            | Self::TouchMovement
            | Self::GamePadAnalog => PayloadShape::Position,
            Self::MouseDrag | Self::TouchDrag => PayloadShape::Rectangle,
            Self::KeyHold | Self::MouseHold | Self::MouseZoom | Self::TouchHold => {
                PayloadShape::Float
            }
        }
    }

    /// Resolves a trigger type from a tag.
    ///
    /// # Errors
    /// Returns [`Error::UnknownTriggerKind`] if `tag` does not name a trigger type.
    pub fn from_tag(tag: &str) -> Result<Self> {
        tag.trim().parse().map_err(|_| Error::UnknownTriggerKind(tag.to_string()))
    }

    /// Parses a description into a trigger of this type.
    pub fn create(self, description: &str) -> Result<Box<dyn Trigger>> {
        Ok(match self {
            Self::Key => Box::new(description.parse::<KeyTrigger>()?),
            Self::KeyHold => Box::new(description.parse::<KeyHoldTrigger>()?),
            Self::MouseButton => Box::new(description.parse::<MouseButtonTrigger>()?),
            Self::MouseMovement => Box::new(description.parse::<MouseMovementTrigger>()?),
            Self::MouseDrag => Box::new(description.parse::<MouseDragTrigger>()?),
            Self::MouseHold => Box::new(description.parse::<MouseHoldTrigger>()?),
            Self::MouseZoom => Box::new(description.parse::<MouseZoomTrigger>()?),
            Self::TouchPress => Box::new(description.parse::<TouchPressTrigger>()?),
            Self::TouchMovement => Box::new(description.parse::<TouchMovementTrigger>()?),
            Self::TouchDrag => Box::new(description.parse::<TouchDragTrigger>()?),
            Self::TouchHold => Box::new(description.parse::<TouchHoldTrigger>()?),
            Self::GamePadButton => Box::new(description.parse::<GamePadButtonTrigger>()?),
            Self::GamePadAnalog => Box::new(description.parse::<GamePadAnalogTrigger>()?),
        })
    }
}

/// Creates a trigger from a type tag and a description.
///
/// # Errors
/// Returns [`Error::UnknownTriggerKind`] if `tag` does not name a trigger type,
/// or the parameter errors of the resolved type.
pub fn create(tag: &str, description: &str) -> Result<Box<dyn Trigger>> {
    TriggerKind::from_tag(tag)?.create(description)
}

/// Sequential reader over the tokens of a trigger description.
pub(crate) struct Params<'t> {
    kind:        TriggerKind,
    description: &'t str,
    required:    usize,
    tokens:      SplitWhitespace<'t>,
}

impl<'t> Params<'t> {
    /// Starts reading `description`, which must contain at least `required` tokens.
    pub(crate) fn new(kind: TriggerKind, description: &'t str, required: usize) -> Result<Self> {
        let found = description.split_whitespace().count();
        if found < required {
            return Err(Error::TooFewParameters {
                kind,
                expected: required,
                found,
                description: description.to_string(),
            });
        }

        Ok(Self { kind, description, required, tokens: description.split_whitespace() })
    }

    /// Parses the next token, which must exist.
    pub(crate) fn required<T: FromStr>(&mut self, expected: &'static str) -> Result<T> {
        match self.optional(expected)? {
            Some(value) => Ok(value),
            None => Err(Error::TooFewParameters {
                kind:        self.kind,
                expected:    self.required,
                found:       self.description.split_whitespace().count(),
                description: self.description.to_string(),
            }),
        }
    }

    /// Parses the next token if there is one.
    pub(crate) fn optional<T: FromStr>(&mut self, expected: &'static str) -> Result<Option<T>> {
        match self.tokens.next() {
            Some(token) => token.parse().map(Some).map_err(|_| Error::InvalidParameter {
                kind: self.kind,
                token: token.to_string(),
                expected,
            }),
            None => Ok(None),
        }
    }

    /// Parses an optional hold time, which must be finite and non-negative.
    pub(crate) fn hold_time(&mut self) -> Result<f32> {
        const EXPECTED: &str = "a non-negative hold time in seconds";

        let token = self.tokens.clone().next().unwrap_or_default();
        match self.optional::<f32>(EXPECTED)? {
            None => Ok(DEFAULT_HOLD_TIME),
            Some(hold_time) if hold_time.is_finite() && hold_time >= 0. => Ok(hold_time),
            Some(_) => Err(Error::InvalidParameter {
                kind:     self.kind,
                token:    token.to_string(),
                expected: EXPECTED,
            }),
        }
    }

    /// Rejects any remaining tokens.
    pub(crate) fn finish(mut self) -> Result<()> {
        match self.tokens.next() {
            Some(token) => Err(Error::InvalidParameter {
                kind:     self.kind,
                token:    token.to_string(),
                expected: "no further parameters",
            }),
            None => Ok(()),
        }
    }
}
