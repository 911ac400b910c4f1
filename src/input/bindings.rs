use indexmap::IndexMap;

use super::{Command, TriggerKind};
use crate::world::Context;
use crate::{Error, Result};

/// A trigger description authored in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerNode {
    /// The trigger type, e.g. `KeyTrigger`.
    pub tag:   String,
    /// The trigger description, e.g. `Escape Pressing`.
    pub value: String,
}

/// A named command authored in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    /// The command name looked up by code.
    pub name:     String,
    /// The triggers that invoke the command.
    pub triggers: Vec<TriggerNode>,
}

/// Validated trigger descriptions grouped by command name.
///
/// Content declares which inputs invoke a command,
/// while code supplies the callback through [`command`](Self::command) or [`bind`](Self::bind).
#[derive(Debug, Default)]
pub struct Bindings {
    commands: IndexMap<String, Vec<(TriggerKind, String)>>,
}

impl Bindings {
    /// Validates all trigger descriptions in `nodes`.
    ///
    /// Nodes sharing a name are merged in order.
    ///
    /// # Errors
    /// Returns the first error raised while parsing a trigger description.
    pub fn from_nodes(nodes: impl IntoIterator<Item = CommandNode>) -> Result<Self> {
        let mut commands: IndexMap<String, Vec<(TriggerKind, String)>> = IndexMap::new();

        for node in nodes {
            let triggers = commands.entry(node.name).or_default();
            for TriggerNode { tag, value } in node.triggers {
                let kind = TriggerKind::from_tag(&tag)?;
                kind.create(&value)?;
                triggers.push((kind, value));
            }
        }

        log::debug!("Loaded {} command bindings", commands.len());
        Ok(Self { commands })
    }

    /// Whether a command of this name is bound.
    pub fn contains(&self, name: &str) -> bool { self.commands.contains_key(name) }

    /// The bound command names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.keys().map(String::as_str)
    }

    /// Adds the triggers bound to `name` to `command` and names it.
    ///
    /// # Errors
    /// Returns [`Error::UnknownCommand`] if no command of this name is bound,
    /// or [`Error::PayloadShapeMismatch`] if a bound trigger does not suit the callback.
    pub fn bind(&self, name: &str, command: Command) -> Result<Command> {
        let triggers =
            self.commands.get(name).ok_or_else(|| Error::UnknownCommand(name.to_string()))?;

        let mut command = command.named(name);
        for (kind, description) in triggers {
            command.add_boxed(kind.create(description)?)?;
        }
        Ok(command)
    }

    /// Builds the command `name` with a callback that takes no payload.
    pub fn command(
        &self,
        name: &str,
        callback: impl FnMut(&mut Context<'_>) -> Result<()> + 'static,
    ) -> Result<Command> {
        self.bind(name, Command::new(callback))
    }
}
