//! The scheduler orders and runs behaviors once per pass.
//!
//! Update behaviors are ordered once when the world is built,
//! since priorities and registration order cannot change afterwards.
//! Draw behaviors are reordered at the start of every draw pass
//! because their render layer is queried from the live instance.

use std::time::Instant;

use itertools::Itertools;

use crate::behavior::{Kind, Registry};
use crate::tracer::Tracer;
use crate::util::DbgTypeId;
use crate::world::{offline, Context, Entities};
use crate::{Entity, Result};

#[cfg(test)]
mod tests;

/// The phases of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Pass {
    /// Trigger polling and command dispatch at the start of a tick.
    Input,
    /// [`Kind::Update`] behaviors.
    Update,
    /// [`Kind::Draw`] behaviors.
    Draw,
}

pub(crate) struct Scheduler {
    /// Indices of update slots, sorted by priority and then by registration order.
    update_order: Vec<usize>,
    /// Indices of draw slots in registration order.
    draw_slots:   Vec<usize>,
}

impl Scheduler {
    pub(crate) fn new(registry: &Registry) -> Self {
        let update_order = registry
            .slots()
            .enumerate()
            .filter(|(_, slot)| slot.kind == Kind::Update)
            .sorted_by_key(|(_, slot)| slot.priority)
            .map(|(index, _)| index)
            .collect();
        let draw_slots = registry
            .slots()
            .enumerate()
            .filter(|(_, slot)| slot.kind == Kind::Draw)
            .map(|(index, _)| index)
            .collect();

        Self { update_order, draw_slots }
    }

    pub(crate) fn run_update(
        &self,
        tracer: &impl Tracer,
        registry: &mut Registry,
        entities: &mut Entities,
        buffer: &mut offline::Buffer,
        delta_time: f32,
    ) -> Result<()> {
        run_pass(
            Pass::Update,
            self.update_order.iter().copied(),
            tracer,
            registry,
            entities,
            buffer,
            delta_time,
        )
    }

    pub(crate) fn run_draw(
        &self,
        tracer: &impl Tracer,
        registry: &mut Registry,
        entities: &mut Entities,
        buffer: &mut offline::Buffer,
    ) -> Result<()> {
        let slots: Vec<_> = registry.slots().collect();
        let order: Vec<usize> = self
            .draw_slots
            .iter()
            .filter_map(|&index| {
                let instance = slots[index].instance.as_ref()?;
                Some((index, instance.render_layer()))
            })
            .sorted_by_key(|&(_, layer)| layer)
            .map(|(index, _)| index)
            .collect();

        run_pass(Pass::Draw, order.into_iter(), tracer, registry, entities, buffer, 0.)
    }
}

fn run_pass(
    pass: Pass,
    order: impl Iterator<Item = usize>,
    tracer: &impl Tracer,
    registry: &mut Registry,
    entities: &mut Entities,
    buffer: &mut offline::Buffer,
    delta_time: f32,
) -> Result<()> {
    let start = Instant::now();
    tracer.start_pass(pass);

    let result = run_slots(pass, order, tracer, registry, entities, buffer, delta_time);

    if let Err(err) = &result {
        log::error!("{pass} pass aborted: {err}");
        tracer.abort_pass(pass, err);
    }

    tracer.end_pass(pass, start.elapsed());
    result
}

fn run_slots(
    pass: Pass,
    order: impl Iterator<Item = usize>,
    tracer: &impl Tracer,
    registry: &mut Registry,
    entities: &mut Entities,
    buffer: &mut offline::Buffer,
    delta_time: f32,
) -> Result<()> {
    for index in order {
        let slot = registry.slot_at_mut(index);
        let instance = match slot.instance.as_mut() {
            Some(instance) => instance,
            None => continue,
        };

        let snapshot: Vec<Entity> =
            slot.interest.iter().copied().filter(|&entity| entities.is_active(entity)).collect();
        check_requirements(&slot.requirements, &snapshot, entities)?;

        log::trace!("Running {} over {} entities", slot.ty, snapshot.len());
        let start = Instant::now();
        tracer.start_behavior(pass, slot.ty.name, snapshot.len());

        let mut ctx = Context::new(entities, buffer, delta_time);
        instance.run(&mut ctx, &snapshot)?;

        tracer.end_behavior(pass, slot.ty.name, start.elapsed());
    }

    Ok(())
}

fn check_requirements(
    requirements: &[DbgTypeId],
    snapshot: &[Entity],
    entities: &Entities,
) -> Result<()> {
    for &entity in snapshot {
        let store = entities.store(entity)?;
        if let Some(&missing) = requirements.iter().find(|&&ty| !store.contains_type(ty)) {
            return Err(store.missing(missing));
        }
    }
    Ok(())
}
