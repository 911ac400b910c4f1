//! Device abstractions implemented by the host.
//!
//! Devices are owned by the host as `Arc<RwLock<D>>`
//! so that the host can update them from its event loop between ticks.
//! The world only keeps [`Weak`] handles,
//! so dropping a device silently disables the triggers bound to it.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::{GamePadButton, Key, MouseButton, State, ThumbStick};
use crate::Point;

/// The kinds of devices, in polling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum DeviceKind {
    /// See [`Mouse`].
    Mouse,
    /// See [`Keyboard`].
    Keyboard,
    /// See [`Touch`].
    Touch,
    /// See [`GamePad`].
    GamePad,
}

/// A mouse with buttons, a pointer and a scroll wheel.
pub trait Mouse: Send + Sync {
    /// Whether the device is currently connected and initialized.
    fn is_available(&self) -> bool { true }

    /// The state of a button.
    fn button(&self, button: MouseButton) -> State;

    /// The pointer position, or [`Point::UNUSED`] if unknown.
    fn position(&self) -> Point;

    /// The accumulated scroll wheel value.
    fn scroll_wheel(&self) -> f32;
}

/// A keyboard.
pub trait Keyboard: Send + Sync {
    /// Whether the device is currently connected and initialized.
    fn is_available(&self) -> bool { true }

    /// The state of a key.
    fn key(&self, key: Key) -> State;
}

/// A touch screen tracking its primary touch point.
pub trait Touch: Send + Sync {
    /// Whether the device is currently connected and initialized.
    fn is_available(&self) -> bool { true }

    /// The state of the primary touch point.
    fn state(&self) -> State;

    /// The position of the primary touch point, or [`Point::UNUSED`] if there is none.
    fn position(&self) -> Point;
}

/// A game pad with buttons and two thumb sticks.
pub trait GamePad: Send + Sync {
    /// Whether the device is currently connected and initialized.
    fn is_available(&self) -> bool { true }

    /// The state of a button.
    fn button(&self, button: GamePadButton) -> State;

    /// The deflection of a thumb stick, each axis in `-1.0..=1.0`.
    fn thumb_stick(&self, stick: ThumbStick) -> Point;
}

/// Weak handles to the devices attached by the host.
#[derive(Default)]
pub struct Devices {
    mouse:    Option<Weak<RwLock<dyn Mouse>>>,
    keyboard: Option<Weak<RwLock<dyn Keyboard>>>,
    touch:    Option<Weak<RwLock<dyn Touch>>>,
    game_pad: Option<Weak<RwLock<dyn GamePad>>>,
}

macro_rules! device_accessors {
    ($($field:ident: $trait:ident, $attach:ident;)*) => {
        $(
            #[doc = concat!("Attaches a ", stringify!($trait), " device, replacing the previous one.")]
            pub fn $attach<D: $trait + 'static>(&mut self, device: &Arc<RwLock<D>>) {
                let weak = Arc::downgrade(device);
                let weak: Weak<RwLock<dyn $trait>> = weak;
                self.$field = Some(weak);
                log::debug!("Attached {} device", DeviceKind::$trait);
            }

            #[doc = concat!("Runs `f` with the ", stringify!($trait), " device if it is attached and available.")]
            pub fn $field<R>(&self, f: impl FnOnce(&dyn $trait) -> R) -> Option<R> {
                let device = self.$field.as_ref()?.upgrade()?;
                let device = device.read();
                if device.is_available() {
                    Some(f(&*device))
                } else {
                    None
                }
            }
        )*
    };
}

impl Devices {
    device_accessors! {
        mouse: Mouse, attach_mouse;
        keyboard: Keyboard, attach_keyboard;
        touch: Touch, attach_touch;
        game_pad: GamePad, attach_game_pad;
    }

    /// Detaches the device of a kind.
    pub fn detach(&mut self, kind: DeviceKind) {
        match kind {
            DeviceKind::Mouse => self.mouse = None,
            DeviceKind::Keyboard => self.keyboard = None,
            DeviceKind::Touch => self.touch = None,
            DeviceKind::GamePad => self.game_pad = None,
        }
    }

    /// Whether the device of a kind is attached, alive and available.
    pub fn is_available(&self, kind: DeviceKind) -> bool {
        match kind {
            DeviceKind::Mouse => self.mouse(|_| ()).is_some(),
            DeviceKind::Keyboard => self.keyboard(|_| ()).is_some(),
            DeviceKind::Touch => self.touch(|_| ()).is_some(),
            DeviceKind::GamePad => self.game_pad(|_| ()).is_some(),
        }
    }
}
