//! Input routing from device state to user callbacks.
//!
//! The host owns its devices and attaches weak handles to the world through [`Devices`].
//! At the start of every tick, the [`Router`] polls each [`Trigger`]
//! against the device it is bound to,
//! then evaluates each [`Command`] in registration order.
//! A command whose triggers fired invokes its callback once,
//! with the [`Payload`] of the first trigger that fired.

use crate::geometry::{Point, Rectangle};

mod bindings;
pub use bindings::{Bindings, CommandNode, TriggerNode};

mod command;
pub use command::Command;

pub mod device;
pub use device::{DeviceKind, Devices, GamePad, Keyboard, Mouse, Touch};

mod key;
pub use key::{GamePadButton, Key, MouseButton, ThumbStick};

mod router;
pub use router::{CommandId, Router};

pub mod trigger;
pub use trigger::{Trigger, TriggerKind};


/// The state of a button, key or touch point.
///
/// [`Pressing`](Self::Pressing) and [`Releasing`](Self::Releasing) are edges
/// that only last for the tick in which the change happened.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum State {
    /// Not held.
    #[default]
    Released,
    /// Went down this tick.
    Pressing,
    /// Held since an earlier tick.
    Pressed,
    /// Went up this tick.
    Releasing,
}

impl State {
    /// Whether the device state `actual` satisfies this configured condition.
    ///
    /// Edges only match themselves.
    /// [`Pressed`](Self::Pressed) matches any down state
    /// and [`Released`](Self::Released) matches any up state.
    pub fn matches(self, actual: State) -> bool {
        match self {
            Self::Pressing | Self::Releasing => self == actual,
            Self::Pressed => actual.is_down(),
            Self::Released => !actual.is_down(),
        }
    }

    /// Whether the button is currently held.
    pub fn is_down(self) -> bool { matches!(self, Self::Pressing | Self::Pressed) }
}

/// The value a trigger reports along with its invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Payload {
    /// The trigger carries no value.
    #[default]
    None,
    /// A pointer or stick position.
    Position(Point),
    /// A dragged area.
    Rectangle(Rectangle),
    /// A duration or wheel delta.
    Float(f32),
}

impl Payload {
    /// The shape of this payload.
    pub fn shape(&self) -> PayloadShape {
        match self {
            Self::None => PayloadShape::None,
            Self::Position(_) => PayloadShape::Position,
            Self::Rectangle(_) => PayloadShape::Rectangle,
            Self::Float(_) => PayloadShape::Float,
        }
    }

    /// Returns the position if this is a position payload.
    pub fn position(self) -> Option<Point> {
        match self {
            Self::Position(point) => Some(point),
            _ => None,
        }
    }

    /// Returns the rectangle if this is a rectangle payload.
    pub fn rectangle(self) -> Option<Rectangle> {
        match self {
            Self::Rectangle(rect) => Some(rect),
            _ => None,
        }
    }

    /// Returns the value if this is a float payload.
    pub fn float(self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(value),
            _ => None,
        }
    }
}

/// The variant of [`Payload`] without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum PayloadShape {
    /// See [`Payload::None`].
    None,
    /// See [`Payload::Position`].
    Position,
    /// See [`Payload::Rectangle`].
    Rectangle,
    /// See [`Payload::Float`].
    Float,
}
