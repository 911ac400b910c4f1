use std::fmt;

use super::{Payload, PayloadShape, Trigger};
use crate::world::Context;
use crate::{Error, Point, Rectangle, Result};

type Callback = Box<dyn FnMut(&mut Context<'_>, Payload) -> Result<()>>;

/// A callback invoked at most once per tick when any of its triggers fired.
///
/// The callback parameter decides which triggers can be added:
/// [`Command::new`] accepts any trigger and ignores the payload,
/// while the `with_*` constructors only accept triggers reporting the matching [`PayloadShape`].
///
/// Callbacks return a [`Result`] so that failed component access can be propagated with `?`.
pub struct Command {
    name:     Option<String>,
    /// `None` if the callback ignores the payload.
    shape:    Option<PayloadShape>,
    callback: Callback,
    triggers: Vec<Box<dyn Trigger>>,
}

impl Command {
    fn with_shape(shape: Option<PayloadShape>, callback: Callback) -> Self {
        Self { name: None, shape, callback, triggers: Vec::new() }
    }

    /// Creates a command whose callback takes no payload.
    pub fn new(mut callback: impl FnMut(&mut Context<'_>) -> Result<()> + 'static) -> Self {
        Self::with_shape(None, Box::new(move |ctx: &mut Context<'_>, _: Payload| callback(ctx)))
    }

    /// Creates a command whose callback takes a position.
    pub fn with_position(
        mut callback: impl FnMut(&mut Context<'_>, Point) -> Result<()> + 'static,
    ) -> Self {
        Self::with_shape(
            Some(PayloadShape::Position),
            Box::new(move |ctx: &mut Context<'_>, payload: Payload| {
                callback(ctx, payload.position().expect("payload shape is checked in Command::add"))
            }),
        )
    }

    /// Creates a command whose callback takes a rectangle.
    pub fn with_rectangle(
        mut callback: impl FnMut(&mut Context<'_>, Rectangle) -> Result<()> + 'static,
    ) -> Self {
        Self::with_shape(
            Some(PayloadShape::Rectangle),
            Box::new(move |ctx: &mut Context<'_>, payload: Payload| {
                callback(ctx, payload.rectangle().expect("payload shape is checked in Command::add"))
            }),
        )
    }

    /// Creates a command whose callback takes a float.
    pub fn with_float(
        mut callback: impl FnMut(&mut Context<'_>, f32) -> Result<()> + 'static,
    ) -> Self {
        Self::with_shape(
            Some(PayloadShape::Float),
            Box::new(move |ctx: &mut Context<'_>, payload: Payload| {
                callback(ctx, payload.float().expect("payload shape is checked in Command::add"))
            }),
        )
    }

    /// Attaches a diagnostic name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The diagnostic name, if any.
    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    /// The payload shape taken by the callback, or `None` if it takes no payload.
    pub fn shape(&self) -> Option<PayloadShape> { self.shape }

    /// Appends a trigger.
    ///
    /// # Errors
    /// Returns [`Error::PayloadShapeMismatch`] if the callback takes a payload
    /// of a different shape than the trigger reports.
    pub fn add(&mut self, trigger: impl Trigger) -> Result<()> { self.add_boxed(Box::new(trigger)) }

    /// Appends a boxed trigger, e.g. one returned by [`trigger::create`](super::trigger::create).
    pub fn add_boxed(&mut self, trigger: Box<dyn Trigger>) -> Result<()> {
        if let Some(expected) = self.shape {
            let found = trigger.shape();
            if expected != found {
                return Err(Error::PayloadShapeMismatch { kind: trigger.kind(), expected, found });
            }
        }

        self.triggers.push(trigger);
        Ok(())
    }

    /// The triggers in registration order.
    pub fn triggers(&self) -> impl Iterator<Item = &dyn Trigger> + '_ {
        self.triggers.iter().map(|trigger| &**trigger)
    }

    pub(crate) fn triggers_mut(&mut self) -> &mut [Box<dyn Trigger>] { &mut self.triggers }

    /// Invokes the callback if any trigger was invoked, then resets all triggers.
    ///
    /// The callback receives the payload of the first invoked trigger in registration order.
    /// Returns whether the callback was invoked.
    ///
    /// # Errors
    /// Returns the error of the callback. The triggers are reset even if the callback fails.
    pub fn evaluate(&mut self, ctx: &mut Context<'_>) -> Result<bool> {
        let payload = match self.triggers.iter().find(|trigger| trigger.was_invoked()) {
            Some(trigger) => trigger.payload(),
            None => return Ok(false),
        };

        let result = (self.callback)(ctx, payload);

        for trigger in &mut self.triggers {
            trigger.reset();
        }
        result.map(|()| true)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("triggers", &self.triggers)
            .finish_non_exhaustive()
    }
}
