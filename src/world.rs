//! The world stores the entities, behaviors and input routing of one simulation.
//!
//! A world is driven by the host with two calls:
//! [`World::update`] once per simulation tick and [`World::draw`] once per render frame.
//! Each tick first runs the input phase
//! (trigger polling and command dispatch, see [`input`](crate::input)),
//! then the update pass.
//! Operations queued through a [`Context`] during any of these phases
//! are applied right after the phase completes.

use std::time::Instant;

use crate::behavior::{self, Behavior};
use crate::scheduler::{Pass, Scheduler};
use crate::tracer::Tracer;
use crate::util::DbgTypeId;
use crate::{input, Entity, Result};

mod builder;
pub use builder::Builder;

mod context;
pub use context::Context;

mod entities;
pub(crate) use entities::Entities;

pub(crate) mod offline;


/// A bundle encapsulates the behaviors and initial state for a specific feature.
/// This can be used by library crates to expose their features as a single API.
pub trait Bundle {
    /// Registers the behaviors used by this bundle.
    fn register(&self, _builder: &mut Builder) {}

    /// Populates the world with entities, commands and devices.
    fn populate(&self, _world: &mut World) {}
}

/// Creates a world from bundles.
pub fn new<'t>(bundles: impl IntoIterator<Item = &'t dyn Bundle> + Copy) -> World {
    let mut builder = Builder::new();

    for bundle in bundles {
        bundle.register(&mut builder);
    }

    let mut world = builder.build();

    for bundle in bundles {
        bundle.populate(&mut world);
    }

    world
}

/// The data structure that stores all states of a simulation.
pub struct World {
    /// Component stores of all live entities.
    entities:  Entities,
    /// Behavior singletons and their interest sets.
    registry:  behavior::Registry,
    /// The pass order computed from the registry.
    scheduler: Scheduler,
    /// Operations queued by behaviors and callbacks.
    buffer:    offline::Buffer,
    /// Commands and their triggers.
    router:    input::Router,
    /// Weak handles to the host's input devices.
    devices:   input::Devices,
}

impl World {
    /// Creates a builder for registering behaviors.
    pub fn builder() -> Builder { Builder::new() }

    /// Runs one simulation tick: the input phase followed by the update pass.
    ///
    /// If either phase fails, the error is returned after both have been attempted.
    pub fn update(&mut self, tracer: &impl Tracer, delta_time: f32) -> Result<()> {
        let start = Instant::now();
        tracer.start_tick(delta_time);

        let input = self.run_input_phase(tracer, delta_time);
        let update = self.run_update_pass(tracer, delta_time);

        tracer.end_tick(start.elapsed());
        input.and(update)
    }

    /// Runs one render frame.
    pub fn draw(&mut self, tracer: &impl Tracer) -> Result<()> { self.run_draw_pass(tracer) }

    /// Polls all triggers and invokes the commands whose triggers fired.
    ///
    /// A failing callback aborts the phase.
    /// Operations queued before the failure are still applied.
    pub fn run_input_phase(&mut self, tracer: &impl Tracer, delta_time: f32) -> Result<()> {
        let start = Instant::now();
        tracer.start_pass(Pass::Input);

        self.router.poll(tracer, &self.devices, delta_time);
        let mut ctx = Context::new(&mut self.entities, &mut self.buffer, delta_time);
        let result = self.router.dispatch(tracer, &mut ctx);

        if let Err(err) = &result {
            log::error!("{} pass aborted: {err}", Pass::Input);
            tracer.abort_pass(Pass::Input, err);
        }

        tracer.end_pass(Pass::Input, start.elapsed());
        let flushed = self.flush();
        result.and(flushed)
    }

    /// Runs every constructed update behavior once.
    pub fn run_update_pass(&mut self, tracer: &impl Tracer, delta_time: f32) -> Result<()> {
        let result = self.scheduler.run_update(
            tracer,
            &mut self.registry,
            &mut self.entities,
            &mut self.buffer,
            delta_time,
        );
        let flushed = self.flush();
        result.and(flushed)
    }

    /// Runs every constructed draw behavior once.
    pub fn run_draw_pass(&mut self, tracer: &impl Tracer) -> Result<()> {
        let result =
            self.scheduler.run_draw(tracer, &mut self.registry, &mut self.entities, &mut self.buffer);
        let flushed = self.flush();
        result.and(flushed)
    }

    /// Runs `f` with a [`Context`] outside of any pass, then applies the queued operations.
    pub fn with_context<R>(
        &mut self,
        delta_time: f32,
        f: impl FnOnce(&mut Context<'_>) -> R,
    ) -> Result<R> {
        let mut ctx = Context::new(&mut self.entities, &mut self.buffer, delta_time);
        let ret = f(&mut ctx);
        self.flush()?;
        Ok(ret)
    }

    fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let registry = &mut self.registry;
        let entities = &mut self.entities;
        self.buffer.drain_cycle(|op| op.run(registry, entities))
    }

    /// Adds an entity to the world.
    pub fn create(&mut self) -> Entity { self.entities.create() }

    /// Disposes an entity, removing it from all behaviors and dropping its components.
    ///
    /// Disposing an entity twice is a no-op.
    pub fn dispose(&mut self, entity: Entity) -> Result<()> {
        offline::dispose(&mut self.registry, &mut self.entities, entity)
    }

    /// Returns the number of live entities.
    pub fn len(&self) -> usize { self.entities.len() }

    /// Whether the world has no live entities.
    pub fn is_empty(&self) -> bool { self.entities.is_empty() }

    /// Iterates over all live entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ { self.entities.iter() }

    /// Sets a component on an entity, returning the replaced value.
    pub fn set<C: 'static>(&mut self, entity: Entity, comp: C) -> Result<Option<C>> {
        Ok(self.entities.store_mut(entity)?.set(comp))
    }

    /// Gets a component of an entity.
    pub fn get<C: 'static>(&self, entity: Entity) -> Result<&C> {
        self.entities.store(entity)?.get()
    }

    /// Gets a component of an entity mutably.
    pub fn get_mut<C: 'static>(&mut self, entity: Entity) -> Result<&mut C> {
        self.entities.store_mut(entity)?.get_mut()
    }

    /// Whether an entity has a component. Always false for disposed entities.
    pub fn contains<C: 'static>(&self, entity: Entity) -> bool { self.entities.contains::<C>(entity) }

    /// Removes a component from an entity, returning it if present.
    pub fn remove<C: 'static>(&mut self, entity: Entity) -> Result<Option<C>> {
        Ok(self.entities.store_mut(entity)?.remove())
    }

    /// Whether an entity participates in behavior passes.
    pub fn is_active(&self, entity: Entity) -> bool { self.entities.is_active(entity) }

    /// Sets whether an entity participates in behavior passes.
    pub fn set_active(&mut self, entity: Entity, active: bool) -> Result<()> {
        self.entities.store_mut(entity)?.set_active(active);
        Ok(())
    }

    /// Whether an entity allocated by this world has been disposed.
    pub fn is_disposed(&self, entity: Entity) -> bool { self.entities.is_disposed(entity) }

    /// Starts behavior `B` for an entity. Starting twice is a no-op.
    pub fn start<B: Behavior>(&mut self, entity: Entity) -> Result<()> {
        offline::start(&mut self.registry, &self.entities, DbgTypeId::of::<B>(), entity)
    }

    /// Stops behavior `B` for an entity. Stopping a behavior that was not started is a no-op.
    pub fn stop<B: Behavior>(&mut self, entity: Entity) -> Result<()> {
        self.registry.stop(DbgTypeId::of::<B>(), entity)?;
        Ok(())
    }

    /// Whether behavior `B` has been started for an entity.
    pub fn is_started<B: Behavior>(&self, entity: Entity) -> bool {
        self.registry.is_started::<B>(entity)
    }

    /// Returns the entities that started behavior `B`, in start order.
    pub fn started<B: Behavior>(&self) -> Vec<Entity> { self.registry.started::<B>() }

    /// Returns the singleton of `B` if any entity has started it.
    pub fn behavior<B: Behavior>(&self) -> Option<&B> { self.registry.get::<B>() }

    /// Returns the singleton of `B` mutably if any entity has started it.
    pub fn behavior_mut<B: Behavior>(&mut self) -> Option<&mut B> { self.registry.get_mut::<B>() }

    /// Returns the behavior registry.
    pub fn registry(&self) -> &behavior::Registry { &self.registry }

    /// Returns the command router.
    pub fn input(&self) -> &input::Router { &self.router }

    /// Returns the command router mutably, e.g. to add commands.
    pub fn input_mut(&mut self) -> &mut input::Router { &mut self.router }

    /// Returns the device handles polled by triggers.
    pub fn devices(&self) -> &input::Devices { &self.devices }

    /// Returns the device handles mutably, e.g. to attach devices.
    pub fn devices_mut(&mut self) -> &mut input::Devices { &mut self.devices }
}
