use crate::behavior::Behavior;
use crate::util::DbgTypeId;
use crate::{Entity, Result};

use super::offline::{Buffer, Operation};
use super::Entities;

/// The world access given to behaviors and command callbacks.
///
/// Components can be read and written immediately.
/// Structural changes (starting or stopping behaviors, toggling activation and disposal)
/// are queued and applied after the current phase,
/// so the entity snapshot of a running pass is never invalidated.
pub struct Context<'t> {
    entities:   &'t mut Entities,
    buffer:     &'t mut Buffer,
    delta_time: f32,
}

impl<'t> Context<'t> {
    pub(crate) fn new(entities: &'t mut Entities, buffer: &'t mut Buffer, delta_time: f32) -> Self {
        Self { entities, buffer, delta_time }
    }

    /// Seconds elapsed since the previous tick. Zero during draw passes.
    pub fn delta_time(&self) -> f32 { self.delta_time }

    /// Creates an entity.
    ///
    /// The entity exists immediately but has not started any behavior.
    pub fn create(&mut self) -> Entity { self.entities.create() }

    /// Gets a component of an entity.
    pub fn get<C: 'static>(&self, entity: Entity) -> Result<&C> {
        self.entities.store(entity)?.get()
    }

    /// Gets a component of an entity mutably.
    pub fn get_mut<C: 'static>(&mut self, entity: Entity) -> Result<&mut C> {
        self.entities.store_mut(entity)?.get_mut()
    }

    /// Sets a component on an entity, returning the replaced value.
    pub fn set<C: 'static>(&mut self, entity: Entity, comp: C) -> Result<Option<C>> {
        Ok(self.entities.store_mut(entity)?.set(comp))
    }

    /// Whether an entity has a component.
    pub fn contains<C: 'static>(&self, entity: Entity) -> bool { self.entities.contains::<C>(entity) }

    /// Removes a component from an entity.
    pub fn remove<C: 'static>(&mut self, entity: Entity) -> Result<Option<C>> {
        Ok(self.entities.store_mut(entity)?.remove())
    }

    /// Whether an entity currently participates in passes.
    pub fn is_active(&self, entity: Entity) -> bool { self.entities.is_active(entity) }

    /// Whether an entity has been disposed.
    ///
    /// Disposal queued in the current phase is not reflected yet.
    pub fn is_disposed(&self, entity: Entity) -> bool { self.entities.is_disposed(entity) }

    /// Queues starting behavior `B` for an entity.
    pub fn start<B: Behavior>(&mut self, entity: Entity) {
        self.buffer.push(Operation::Start { behavior: DbgTypeId::of::<B>(), entity });
    }

    /// Queues stopping behavior `B` for an entity.
    pub fn stop<B: Behavior>(&mut self, entity: Entity) {
        self.buffer.push(Operation::Stop { behavior: DbgTypeId::of::<B>(), entity });
    }

    /// Queues an activation change for an entity.
    pub fn set_active(&mut self, entity: Entity, active: bool) {
        self.buffer.push(Operation::SetActive { entity, active });
    }

    /// Queues the disposal of an entity.
    pub fn dispose(&mut self, entity: Entity) { self.buffer.push(Operation::Dispose { entity }); }
}
