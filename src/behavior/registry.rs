use indexmap::{IndexMap, IndexSet};

use super::{AnyBehavior, Behavior, Kind, Priority, Requirements};
use crate::util::DbgTypeId;
use crate::{Entity, Error, Result};

type Factory = Box<dyn FnOnce() -> Box<dyn AnyBehavior>>;

/// The table of behavior types registered in a world.
///
/// Slots are kept in registration order,
/// which is the tie-breaker for both update and draw ordering.
#[derive(Default)]
pub struct Registry {
    slots: IndexMap<DbgTypeId, Slot>,
}

/// The registration and runtime state of one behavior type.
pub(crate) struct Slot {
    pub(crate) ty:           DbgTypeId,
    pub(crate) kind:         Kind,
    pub(crate) priority:     Priority,
    pub(crate) requirements: Vec<DbgTypeId>,
    /// Consumed when the singleton is constructed.
    factory:                 Option<Factory>,
    /// The singleton, if any entity has started this behavior yet.
    pub(crate) instance:     Option<Box<dyn AnyBehavior>>,
    /// Entities that started this behavior, in start order.
    pub(crate) interest:     IndexSet<Entity>,
}

impl Slot {
    fn instantiate(&mut self) {
        if self.instance.is_none() {
            let factory = self.factory.take().expect("factory is only consumed on instantiation");
            self.instance = Some(factory());
            log::debug!("Constructed {} behavior {}", self.kind, self.ty);
        }
    }
}

impl Registry {
    /// Registers a behavior type with the factory used to construct its singleton.
    ///
    /// # Panics
    /// Panics if `B` has already been registered.
    pub(crate) fn register<B: Behavior>(&mut self, factory: impl FnOnce() -> B + 'static) {
        let ty = DbgTypeId::of::<B>();
        let slot = Slot {
            ty,
            kind: B::KIND,
            priority: B::PRIORITY,
            requirements: Requirements::of::<B>(),
            factory: Some(Box::new(|| Box::new(factory()) as Box<dyn AnyBehavior>)),
            instance: None,
            interest: IndexSet::new(),
        };

        if self.slots.insert(ty, slot).is_some() {
            panic!("Cannot register the behavior {ty} twice");
        }
    }

    fn slot(&self, ty: DbgTypeId) -> Result<&Slot> {
        self.slots.get(&ty).ok_or(Error::BehaviorNotRegistered(ty.name))
    }

    fn slot_mut(&mut self, ty: DbgTypeId) -> Result<&mut Slot> {
        self.slots.get_mut(&ty).ok_or(Error::BehaviorNotRegistered(ty.name))
    }

    /// Adds `entity` to the interest set of `ty`, constructing the singleton if necessary.
    ///
    /// Returns whether the entity was newly added.
    pub(crate) fn start(&mut self, ty: DbgTypeId, entity: Entity) -> Result<bool> {
        let slot = self.slot_mut(ty)?;
        slot.instantiate();
        let added = slot.interest.insert(entity);
        if added {
            log::debug!("Entity {entity} started behavior {ty}");
        }
        Ok(added)
    }

    /// Removes `entity` from the interest set of `ty`.
    ///
    /// Returns whether the entity was present.
    pub(crate) fn stop(&mut self, ty: DbgTypeId, entity: Entity) -> Result<bool> {
        let slot = self.slot_mut(ty)?;
        let removed = slot.interest.shift_remove(&entity);
        if removed {
            log::debug!("Entity {entity} stopped behavior {ty}");
        }
        Ok(removed)
    }

    /// Removes `entity` from every interest set.
    pub(crate) fn stop_all(&mut self, entity: Entity) {
        for slot in self.slots.values_mut() {
            slot.interest.shift_remove(&entity);
        }
    }

    /// Whether `B` has been registered.
    pub fn is_registered<B: Behavior>(&self) -> bool {
        self.slots.contains_key(&DbgTypeId::of::<B>())
    }

    /// Whether `entity` is in the interest set of `B`.
    pub fn is_started<B: Behavior>(&self, entity: Entity) -> bool {
        self.slot(DbgTypeId::of::<B>()).map_or(false, |slot| slot.interest.contains(&entity))
    }

    /// Returns the interest set of `B` in start order.
    ///
    /// Returns an empty list if `B` is not registered.
    pub fn started<B: Behavior>(&self) -> Vec<Entity> {
        self.slot(DbgTypeId::of::<B>())
            .map(|slot| slot.interest.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns the singleton of `B` if it has been constructed.
    pub fn get<B: Behavior>(&self) -> Option<&B> {
        let instance = self.slot(DbgTypeId::of::<B>()).ok()?.instance.as_ref()?;
        Some(instance.as_any().downcast_ref::<B>().expect("TypeId mismatch"))
    }

    /// Returns the singleton of `B` mutably if it has been constructed.
    pub fn get_mut<B: Behavior>(&mut self) -> Option<&mut B> {
        let instance = self.slot_mut(DbgTypeId::of::<B>()).ok()?.instance.as_mut()?;
        Some(instance.as_any_mut().downcast_mut::<B>().expect("TypeId mismatch"))
    }

    /// Returns the number of registered behavior types.
    pub fn len(&self) -> usize { self.slots.len() }

    /// Whether no behavior types are registered.
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    pub(crate) fn slots(&self) -> impl Iterator<Item = &Slot> { self.slots.values() }

    pub(crate) fn slot_at_mut(&mut self, index: usize) -> &mut Slot {
        self.slots.get_index_mut(index).expect("invalid slot index").1
    }
}
