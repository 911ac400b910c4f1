//! The error type returned by fallible operations.

use crate::input::{PayloadShape, TriggerKind};
use crate::Entity;

/// Errors raised by the component, behavior and input APIs.
///
/// Configuration errors ([`UnknownTriggerKind`](Self::UnknownTriggerKind),
/// [`TooFewParameters`](Self::TooFewParameters), [`InvalidParameter`](Self::InvalidParameter),
/// [`PayloadShapeMismatch`](Self::PayloadShapeMismatch), [`UnknownCommand`](Self::UnknownCommand))
/// are returned when the offending object is constructed.
/// Contract violations ([`ComponentMissing`](Self::ComponentMissing),
/// [`EntityDisposed`](Self::EntityDisposed), [`UnknownEntity`](Self::UnknownEntity),
/// [`BehaviorNotRegistered`](Self::BehaviorNotRegistered))
/// are returned at the point of use and abort the running pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A component was requested from an entity that does not have it.
    #[error("entity {entity} has no component of type `{component}`")]
    ComponentMissing {
        /// The entity that was accessed.
        entity:    Entity,
        /// The type name of the missing component.
        component: &'static str,
    },
    /// The entity has been disposed and can no longer be mutated or scheduled.
    #[error("entity {0} has been disposed")]
    EntityDisposed(Entity),
    /// The entity was never allocated by this world.
    #[error("entity {0} does not belong to this world")]
    UnknownEntity(Entity),
    /// The behavior type was not registered in the world builder.
    #[error("behavior `{0}` was not registered when the world was built")]
    BehaviorNotRegistered(&'static str),
    /// A trigger description names a trigger type that does not exist.
    #[error("unable to create trigger, type {0:?} is unknown")]
    UnknownTriggerKind(String),
    /// A trigger description has fewer tokens than the trigger type requires.
    #[error("{kind} requires at least {expected} parameter(s) but {found} were given in {description:?}")]
    TooFewParameters {
        /// The trigger type being constructed.
        kind:        TriggerKind,
        /// The minimum number of tokens.
        expected:    usize,
        /// The number of tokens found.
        found:       usize,
        /// The full description.
        description: String,
    },
    /// A token in a trigger description could not be parsed.
    #[error("invalid parameter {token:?} for {kind}, expected {expected}")]
    InvalidParameter {
        /// The trigger type being constructed.
        kind:     TriggerKind,
        /// The offending token.
        token:    String,
        /// What the token should have been.
        expected: &'static str,
    },
    /// A trigger was added to a command whose callback takes a different payload.
    #[error("{kind} produces a {found} payload but the command callback takes a {expected} payload")]
    PayloadShapeMismatch {
        /// The trigger type being added.
        kind:     TriggerKind,
        /// The payload shape of the callback.
        expected: PayloadShape,
        /// The payload shape of the trigger.
        found:    PayloadShape,
    },
    /// No command with this name exists in the bindings.
    #[error("no command named {0:?} is bound")]
    UnknownCommand(String),
}

/// The result type used throughout this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
