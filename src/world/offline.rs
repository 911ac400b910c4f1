//! Operations queued during a phase to be executed after the phase completes.

use crate::behavior::Registry;
use crate::util::DbgTypeId;
use crate::{Entity, Result};

use super::Entities;

/// An operation deferred until the end of the current phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Operation {
    /// Add an entity to the interest set of a behavior.
    Start { behavior: DbgTypeId, entity: Entity },
    /// Remove an entity from the interest set of a behavior.
    Stop { behavior: DbgTypeId, entity: Entity },
    /// Toggle whether an entity participates in passes.
    SetActive { entity: Entity, active: bool },
    /// Remove an entity from all behaviors and drop its components.
    Dispose { entity: Entity },
}

impl Operation {
    /// Performs the operation during offline.
    pub(crate) fn run(self, registry: &mut Registry, entities: &mut Entities) -> Result<()> {
        match self {
            Self::Start { behavior, entity } => {
                if entities.is_disposed(entity) {
                    log::warn!("Ignoring start of {behavior} for disposed entity {entity}");
                    return Ok(());
                }
                start(registry, entities, behavior, entity)
            }
            Self::Stop { behavior, entity } => {
                registry.stop(behavior, entity)?;
                Ok(())
            }
            Self::SetActive { entity, active } => {
                if entities.is_disposed(entity) {
                    log::warn!("Ignoring activation change of disposed entity {entity}");
                    return Ok(());
                }
                entities.store_mut(entity)?.set_active(active);
                Ok(())
            }
            Self::Dispose { entity } => {
                if entities.is_disposed(entity) {
                    log::warn!("Ignoring repeated disposal of entity {entity}");
                    return Ok(());
                }
                dispose(registry, entities, entity)
            }
        }
    }
}

/// Starts `behavior` for `entity` if the entity is alive.
pub(crate) fn start(
    registry: &mut Registry,
    entities: &Entities,
    behavior: DbgTypeId,
    entity: Entity,
) -> Result<()> {
    entities.store(entity)?;
    registry.start(behavior, entity)?;
    Ok(())
}

/// Disposes `entity`, removing it from every interest set.
pub(crate) fn dispose(registry: &mut Registry, entities: &mut Entities, entity: Entity) -> Result<()> {
    if entities.dispose(entity)? {
        registry.stop_all(entity);
    }
    Ok(())
}

/// A queue of offline operations.
#[derive(Default)]
pub(crate) struct Buffer {
    items: Vec<Operation>,
}

impl Buffer {
    pub(crate) fn push(&mut self, op: Operation) { self.items.push(op) }

    pub(crate) fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Runs all queued operations in queue order.
    ///
    /// A failing operation does not prevent the rest from running.
    /// The first error is returned and the others are logged.
    pub(crate) fn drain_cycle(&mut self, mut run: impl FnMut(Operation) -> Result<()>) -> Result<()> {
        let mut first_err = None;

        for op in self.items.drain(..) {
            if let Err(err) = run(op) {
                match first_err {
                    None => first_err = Some(err),
                    Some(_) => log::error!("Offline operation {op:?} failed: {err}"),
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
