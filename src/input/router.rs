use std::fmt;

use indexmap::IndexMap;
use strum::IntoEnumIterator;

use super::{Command, DeviceKind, Devices};
use crate::tracer::Tracer;
use crate::world::Context;
use crate::Result;

/// Identifies a command added to a [`Router`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommandId(u32);

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "command#{}", self.0) }
}

/// The commands of a world, in registration order.
#[derive(Debug, Default)]
pub struct Router {
    next_id:  u32,
    commands: IndexMap<CommandId, Command>,
}

impl Router {
    /// Adds a command, returning its ID.
    pub fn add(&mut self, command: Command) -> CommandId {
        let id = CommandId(self.next_id);
        self.next_id += 1;

        log::debug!("Added {id} ({:?}) with {} triggers", command.name(), command.triggers().count());
        self.commands.insert(id, command);
        id
    }

    /// Removes a command, returning it if it was present.
    pub fn remove(&mut self, id: CommandId) -> Option<Command> { self.commands.shift_remove(&id) }

    /// Gets a command.
    pub fn get(&self, id: CommandId) -> Option<&Command> { self.commands.get(&id) }

    /// Gets a command mutably, e.g. to add triggers.
    pub fn get_mut(&mut self, id: CommandId) -> Option<&mut Command> { self.commands.get_mut(&id) }

    /// Returns the number of commands.
    pub fn len(&self) -> usize { self.commands.len() }

    /// Whether there are no commands.
    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    /// Iterates over the commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (CommandId, &Command)> + '_ {
        self.commands.iter().map(|(&id, command)| (id, command))
    }

    /// Polls every trigger against its device.
    ///
    /// Devices are visited in [`DeviceKind`] order.
    /// Triggers of detached or unavailable devices are skipped.
    pub fn poll(&mut self, tracer: &impl Tracer, devices: &Devices, delta_time: f32) {
        for device in DeviceKind::iter() {
            if !devices.is_available(device) {
                continue;
            }

            for (&id, command) in &mut self.commands {
                for trigger in command.triggers_mut() {
                    if trigger.device() != device {
                        continue;
                    }

                    trigger.poll(devices, delta_time);
                    if trigger.was_invoked() {
                        log::trace!("{} of {id} fired with {:?}", trigger.kind(), trigger.payload());
                        tracer.trigger_fired(id, trigger.kind());
                    }
                }
            }
        }
    }

    /// Evaluates every command in registration order.
    ///
    /// Returns the number of commands whose callback was invoked.
    ///
    /// # Errors
    /// Stops at the first failing callback and returns its error.
    /// Later commands are not evaluated in this tick.
    pub fn dispatch(&mut self, tracer: &impl Tracer, ctx: &mut Context<'_>) -> Result<usize> {
        let mut invoked = 0;

        for (&id, command) in &mut self.commands {
            let result = command.evaluate(ctx);
            if let Err(err) = &result {
                log::debug!("{id} ({:?}) failed: {err}", command.name());
            }

            if result? {
                tracer.command_invoked(id, command.name());
                invoked += 1;
            }
        }

        Ok(invoked)
    }
}
