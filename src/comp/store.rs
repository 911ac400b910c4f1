use std::any::Any;
use std::collections::HashMap;

use crate::util::DbgTypeId;
use crate::{Entity, Error, Result};

/// The component store of a single entity.
///
/// Stores at most one value per component type,
/// together with the activation flag of the entity.
/// A store only exists while its entity is alive;
/// disposing the entity drops the store with all its components.
pub struct Store {
    entity: Entity,
    comps:  HashMap<DbgTypeId, Box<dyn Any>>,
    active: bool,
}

impl Store {
    /// Creates an empty, active store owned by `entity`.
    pub fn new(entity: Entity) -> Self {
        Self { entity, comps: HashMap::new(), active: true }
    }

    /// The entity owning this store.
    pub fn entity(&self) -> Entity { self.entity }

    /// Sets a component, returning the replaced value if one was present.
    pub fn set<C: 'static>(&mut self, comp: C) -> Option<C> {
        let prev = self.comps.insert(DbgTypeId::of::<C>(), Box::new(comp));
        prev.map(|prev| *prev.downcast::<C>().expect("TypeId mismatch"))
    }

    /// Gets a shared reference to a component.
    pub fn get<C: 'static>(&self) -> Result<&C> {
        match self.comps.get(&DbgTypeId::of::<C>()) {
            Some(comp) => Ok(comp.downcast_ref::<C>().expect("TypeId mismatch")),
            None => Err(self.missing(DbgTypeId::of::<C>())),
        }
    }

    /// Gets a mutable reference to a component.
    pub fn get_mut<C: 'static>(&mut self) -> Result<&mut C> {
        let entity = self.entity;
        match self.comps.get_mut(&DbgTypeId::of::<C>()) {
            Some(comp) => Ok(comp.downcast_mut::<C>().expect("TypeId mismatch")),
            None => Err(Error::ComponentMissing { entity, component: DbgTypeId::of::<C>().name }),
        }
    }

    /// Whether a component of type `C` is present.
    pub fn contains<C: 'static>(&self) -> bool { self.contains_type(DbgTypeId::of::<C>()) }

    pub(crate) fn contains_type(&self, ty: DbgTypeId) -> bool { self.comps.contains_key(&ty) }

    /// Removes a component, returning it if it was present.
    pub fn remove<C: 'static>(&mut self) -> Option<C> {
        let comp = self.comps.remove(&DbgTypeId::of::<C>());
        comp.map(|comp| *comp.downcast::<C>().expect("TypeId mismatch"))
    }

    /// Returns the number of components present.
    pub fn len(&self) -> usize { self.comps.len() }

    /// Whether no components are present.
    pub fn is_empty(&self) -> bool { self.comps.is_empty() }

    /// Whether the entity participates in behavior passes.
    pub fn is_active(&self) -> bool { self.active }

    /// Sets whether the entity participates in behavior passes.
    pub fn set_active(&mut self, active: bool) { self.active = active; }

    pub(crate) fn missing(&self, ty: DbgTypeId) -> Error {
        Error::ComponentMissing { entity: self.entity, component: ty.name }
    }
}
