use std::collections::BTreeMap;

use crate::entity::ealloc;
use crate::{comp, Entity, Error, Result};

/// The component stores of all live entities in a world.
///
/// A store is removed as soon as its entity is disposed,
/// so an allocated ID without a store always refers to a disposed entity.
#[derive(Default)]
pub(crate) struct Entities {
    ealloc: ealloc::Monotonic,
    /// Ordered by ID, which is also creation order since IDs are never recycled.
    stores: BTreeMap<Entity, comp::Store>,
}

impl Entities {
    pub(crate) fn create(&mut self) -> Entity {
        let entity = self.ealloc.allocate();
        self.stores.insert(entity, comp::Store::new(entity));
        log::trace!("Created entity {entity}");
        entity
    }

    fn absent(&self, entity: Entity) -> Error {
        match self.ealloc.is_allocated(entity) {
            true => Error::EntityDisposed(entity),
            false => Error::UnknownEntity(entity),
        }
    }

    pub(crate) fn store(&self, entity: Entity) -> Result<&comp::Store> {
        self.stores.get(&entity).ok_or_else(|| self.absent(entity))
    }

    pub(crate) fn store_mut(&mut self, entity: Entity) -> Result<&mut comp::Store> {
        let absent = self.absent(entity);
        self.stores.get_mut(&entity).ok_or(absent)
    }

    /// Removes the store of `entity`, dropping its components.
    ///
    /// Returns `Ok(false)` if the entity was already disposed.
    pub(crate) fn dispose(&mut self, entity: Entity) -> Result<bool> {
        match self.stores.remove(&entity) {
            Some(store) => {
                log::trace!("Disposed entity {entity} with {} components", store.len());
                Ok(true)
            }
            None => match self.absent(entity) {
                Error::EntityDisposed(_) => Ok(false),
                err => Err(err),
            },
        }
    }

    pub(crate) fn contains<C: 'static>(&self, entity: Entity) -> bool {
        self.stores.get(&entity).map_or(false, |store| store.contains::<C>())
    }

    pub(crate) fn is_active(&self, entity: Entity) -> bool {
        self.stores.get(&entity).map_or(false, |store| store.is_active())
    }

    pub(crate) fn is_disposed(&self, entity: Entity) -> bool {
        self.ealloc.is_allocated(entity) && !self.stores.contains_key(&entity)
    }

    pub(crate) fn len(&self) -> usize { self.stores.len() }

    pub(crate) fn is_empty(&self) -> bool { self.stores.is_empty() }

    pub(crate) fn iter(&self) -> impl Iterator<Item = Entity> + '_ { self.stores.keys().copied() }
}
