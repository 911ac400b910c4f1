//! An entity is a single object that owns components.
//!
//! [`Entity`] is only a handle.
//! The components of an entity live in a [`comp::Store`](crate::comp::Store)
//! owned by the [`World`](crate::World) that allocated it.
//!
//! Entity IDs are never recycled within a world,
//! so a handle to a disposed entity can never observe a newer entity.

use std::fmt;
use std::num::NonZeroU32;

pub mod ealloc;

/// A raw entity ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Raw(NonZeroU32);

impl Raw {
    pub(crate) fn new(id: NonZeroU32) -> Self { Self(id) }

    pub(crate) fn get(self) -> u32 { self.0.get() }
}

/// A handle to an entity.
///
/// The handle is only meaningful for the world that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: Raw,
}

impl Entity {
    pub(crate) fn from_raw(id: Raw) -> Self { Self { id } }

    pub(crate) fn raw(self) -> Raw { self.id }

    /// Returns the numeric ID of this entity.
    pub fn index(self) -> u32 { self.id.get() }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.id.get()) }
}

#[cfg(test)]
mod tests;
