//! Manages entity ID allocation.

use std::num::NonZeroU32;

use super::Raw;
use crate::Entity;

/// Allocates entity IDs in increasing order and never reuses them.
///
/// Since IDs are never recycled,
/// any ID below the gauge that is not alive must have been disposed.
#[derive(Debug)]
pub struct Monotonic {
    /// The next ID to allocate.
    gauge: NonZeroU32,
}

impl Default for Monotonic {
    fn default() -> Self { Self { gauge: NonZeroU32::MIN } }
}

impl Monotonic {
    /// Allocates a new entity.
    ///
    /// # Panics
    /// Panics if all `u32` IDs have been allocated.
    pub fn allocate(&mut self) -> Entity {
        let id = self.gauge;
        self.gauge = id.checked_add(1).expect("entity IDs are exhausted");
        Entity::from_raw(Raw::new(id))
    }

    /// Whether `entity` was allocated by this allocator.
    pub fn is_allocated(&self, entity: Entity) -> bool { entity.raw().get() < self.gauge.get() }

    /// Returns the number of entities ever allocated.
    pub fn allocated(&self) -> usize {
        (self.gauge.get() - 1).try_into().expect("usize >= u32")
    }
}
