//! A component is a piece of typed data attached to an entity.
//!
//! Any `'static` type can be used as a component.
//! Each entity holds at most one component of each type,
//! so the component store of an entity is effectively a typemap:
//! setting a component of a type that is already present replaces the old value.
//!
//! Components carry no identity of their own.
//! They are always addressed through their owning [`Entity`](crate::Entity).
//!
//! # Behaviors and components
//! Component presence does not affect which behaviors process an entity.
//! Behavior membership is only changed by [`World::start`](crate::World::start)
//! and [`World::stop`](crate::World::stop).
//! A behavior may declare the components it expects through
//! [`Behavior::requirements`](crate::Behavior::requirements);
//! processing an entity without them is a contract violation that aborts the pass.

mod store;
pub use store::Store;
