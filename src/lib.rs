//! The runtime core of a real-time interactive application:
//! entities with typed components, singleton behaviors scheduled once per tick,
//! and input triggers routed to command callbacks.
//!
//! # Entities and components
//! An [`Entity`] is a handle to a store of components inside a [`World`].
//! Any `'static` type can be a component,
//! and an entity holds at most one component of each type.
//! Entities are created and disposed explicitly;
//! their IDs are never reused, so a stale handle reports
//! [`Error::EntityDisposed`] instead of observing another entity.
//!
//! # Behaviors
//! A [`Behavior`] is a singleton processor.
//! Each behavior type is registered once in the [`world::Builder`]
//! together with a factory, which is only called when the first entity starts the behavior.
//! Starting a behavior for an entity adds the entity to the interest set of the singleton,
//! and the singleton receives its whole interest set once per pass.
//!
//! Update behaviors run once per [`World::update`],
//! ordered by [`behavior::Priority`] and then by registration order.
//! Draw behaviors run once per [`World::draw`],
//! ordered by their render layer and then by registration order.
//!
//! Behaviors mutate the world through a [`Context`].
//! Component reads and writes are immediate,
//! but structural changes (starting, stopping, activation and disposal)
//! are applied after the pass completes,
//! so every behavior in a pass sees a stable list of entities.
//!
//! # Input
//! Every tick starts with the input phase.
//! Each [`input::Trigger`] samples one device (mouse, keyboard, touch or game pad)
//! and records whether its condition was met.
//! Each [`input::Command`] then invokes its callback at most once
//! if any of its triggers fired.
//! Triggers can be built from typed parameters
//! or from text descriptions authored in content,
//! see [`input::trigger::create`] and [`input::Bindings`].
//!
//! ```
//! use tickwork::behavior::{Kind, Requirements};
//! use tickwork::{Behavior, Context, Entity, Point, Result};
//!
//! struct Position(Point);
//! struct Velocity(Point);
//!
//! #[derive(Default)]
//! struct Movement;
//!
//! impl Behavior for Movement {
//!     const KIND: Kind = Kind::Update;
//!
//!     fn requirements(requirements: &mut Requirements) {
//!         requirements.require::<Position>().require::<Velocity>();
//!     }
//!
//!     fn run(&mut self, ctx: &mut Context<'_>, entities: &[Entity]) -> Result<()> {
//!         for &entity in entities {
//!             let velocity = ctx.get::<Velocity>(entity)?.0;
//!             let dt = ctx.delta_time();
//!             ctx.get_mut::<Position>(entity)?.0 += velocity * dt;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut builder = tickwork::World::builder();
//! builder.register_default::<Movement>();
//! let mut world = builder.build();
//!
//! let entity = world.create();
//! world.set(entity, Position(Point::ZERO))?;
//! world.set(entity, Velocity(Point::new(1.0, 0.0)))?;
//! world.start::<Movement>(entity)?;
//!
//! for _ in 0..3 {
//!     world.update(&tickwork::tracer::Noop, 1.0)?;
//! }
//! assert_eq!(world.get::<Position>(entity)?.0, Point::new(3.0, 0.0));
//! # Ok::<(), tickwork::Error>(())
//! ```

#![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(doc, warn(missing_docs))]

pub mod tracer;

pub mod behavior;
pub use behavior::Behavior;

pub mod comp;

pub mod entity;
pub use entity::Entity;

mod error;
pub use error::{Error, Result};

mod geometry;
pub use geometry::{Point, Rectangle};

pub mod input;

pub mod scheduler;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub mod world;
pub use world::{new, Bundle, Context, World};

pub mod util;
