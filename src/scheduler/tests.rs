use std::sync::Arc;

use super::Pass;
use crate::behavior::{Kind, Priority, Requirements};
use crate::test_util::{self, Event, EventTracer, Movement, Position, RecordingTracer, Velocity};
use crate::{tracer, Behavior, Context, Entity, Error, Point, Result, World};

macro_rules! update_behavior {
    ($name:ident, $priority:ident) => {
        #[derive(Default)]
        struct $name;

        impl Behavior for $name {
            const KIND: Kind = Kind::Update;
            const PRIORITY: Priority = Priority::$priority;

            fn run(&mut self, _: &mut Context<'_>, _: &[Entity]) -> Result<()> { Ok(()) }
        }
    };
}

update_behavior!(EarlyBird, First);
update_behavior!(PlainA, Default);
update_behavior!(PlainB, Default);
update_behavior!(Straggler, Last);
update_behavior!(Idle, High);

macro_rules! draw_behavior {
    ($name:ident) => {
        struct $name {
            layer: i32,
        }

        impl Behavior for $name {
            const KIND: Kind = Kind::Draw;

            fn render_layer(&self) -> i32 { self.layer }

            fn run(&mut self, _: &mut Context<'_>, _: &[Entity]) -> Result<()> { Ok(()) }
        }
    };
}

draw_behavior!(Background);
draw_behavior!(Sprites);
draw_behavior!(Overlay);

fn new_tracer() -> tracer::Aggregate<(tracer::Log, RecordingTracer)> {
    test_util::init();
    tracer::Aggregate((tracer::Log(log::Level::Trace), RecordingTracer::default()))
}

fn spawn_mover(world: &mut World, position: Point, velocity: Point) -> Result<Entity> {
    let entity = world.create();
    world.set(entity, Position(position))?;
    world.set(entity, Velocity(velocity))?;
    world.start::<Movement>(entity)?;
    Ok(entity)
}

#[test]
fn test_priority_order() -> Result<()> {
    let tracer = new_tracer();

    let mut builder = World::builder();
    builder
        .register_default::<Straggler>()
        .register_default::<PlainA>()
        .register_default::<EarlyBird>()
        .register_default::<Idle>()
        .register_default::<PlainB>();
    let mut world = builder.build();

    let entity = world.create();
    world.start::<PlainB>(entity)?;
    world.start::<Straggler>(entity)?;
    world.start::<PlainA>(entity)?;
    world.start::<EarlyBird>(entity)?;

    world.update(&tracer, 1.)?;

    assert_eq!(
        tracer.0 .1.behaviors(Pass::Update),
        ["EarlyBird", "PlainA", "PlainB", "Straggler"],
        "priority tiers first, then registration order; Idle was never started",
    );
    Ok(())
}

#[test]
fn test_order_with_event_tracer() -> Result<()> {
    test_util::init();

    struct Traced(&'static str, Arc<EventTracer<&'static str>>);

    macro_rules! traced {
        ($name:ident, $priority:ident) => {
            struct $name(Traced);

            impl Behavior for $name {
                const KIND: Kind = Kind::Update;
                const PRIORITY: Priority = Priority::$priority;

                fn run(&mut self, _: &mut Context<'_>, _: &[Entity]) -> Result<()> {
                    self.0 .1.trace(self.0 .0);
                    Ok(())
                }
            }
        };
    }

    traced!(Reader, Low);
    traced!(Writer, High);

    let events = Arc::new(EventTracer::new([("writer", "reader")]));

    let mut builder = World::builder();
    let reader_events = Arc::clone(&events);
    builder.register(move || Reader(Traced("reader", reader_events)));
    let writer_events = Arc::clone(&events);
    builder.register(move || Writer(Traced("writer", writer_events)));
    let mut world = builder.build();

    let entity = world.create();
    world.start::<Reader>(entity)?;
    world.start::<Writer>(entity)?;
    world.update(&tracer::Noop, 1.)?;

    assert_eq!(events.get_events(), ["writer", "reader"]);
    Ok(())
}

#[test]
fn test_draw_layer_order() -> Result<()> {
    let tracer = new_tracer();

    let mut builder = World::builder();
    builder
        .register(|| Sprites { layer: 1 })
        .register(|| Overlay { layer: 1 })
        .register(|| Background { layer: 0 });
    let mut world = builder.build();

    let entity = world.create();
    world.start::<Overlay>(entity)?;
    world.start::<Sprites>(entity)?;
    world.start::<Background>(entity)?;

    world.draw(&tracer)?;
    assert_eq!(tracer.0 .1.behaviors(Pass::Draw), ["Background", "Sprites", "Overlay"]);

    world.behavior_mut::<Background>().expect("Background was started").layer = 2;
    tracer.0 .1.clear();

    world.draw(&tracer)?;
    assert_eq!(
        tracer.0 .1.behaviors(Pass::Draw),
        ["Sprites", "Overlay", "Background"],
        "render layers are queried on every draw pass",
    );
    assert!(tracer.0 .1.behaviors(Pass::Update).is_empty(), "draw does not run update behaviors");
    Ok(())
}

#[test]
fn test_three_ticks() -> Result<()> {
    let tracer = new_tracer();

    let mut builder = World::builder();
    builder.register_default::<Movement>();
    let mut world = builder.build();

    let entity = spawn_mover(&mut world, Point::ZERO, Point::new(1., 0.))?;

    for _ in 0..3 {
        world.update(&tracer, 1.)?;
    }

    assert_eq!(world.get::<Position>(entity)?, &Position(Point::new(3., 0.)));
    Ok(())
}

#[test]
fn test_inactive_entities_skipped() -> Result<()> {
    let tracer = new_tracer();

    let mut builder = World::builder();
    builder.register_default::<Movement>();
    let mut world = builder.build();

    let moving = spawn_mover(&mut world, Point::ZERO, Point::new(1., 0.))?;
    let frozen = spawn_mover(&mut world, Point::ZERO, Point::new(1., 0.))?;
    world.set_active(frozen, false)?;

    world.update(&tracer, 1.)?;

    assert_eq!(world.get::<Position>(moving)?.0, Point::new(1., 0.));
    assert_eq!(world.get::<Position>(frozen)?.0, Point::ZERO);
    assert!(world.is_started::<Movement>(frozen), "deactivation keeps the interest set");
    assert_eq!(
        tracer.0 .1.events().first(),
        Some(&Event::StartBehavior {
            pass:     Pass::Update,
            behavior: std::any::type_name::<Movement>().to_string(),
            entities: 1,
        }),
    );
    Ok(())
}

/// Spawns a mover for every entity it processes, then stops itself for that entity.
#[derive(Default)]
struct Spawner;

impl Behavior for Spawner {
    const KIND: Kind = Kind::Update;
    const PRIORITY: Priority = Priority::First;

    fn run(&mut self, ctx: &mut Context<'_>, entities: &[Entity]) -> Result<()> {
        for &entity in entities {
            let child = ctx.create();
            ctx.set(child, Position(Point::ZERO))?;
            ctx.set(child, Velocity(Point::new(0., 1.)))?;
            ctx.start::<Movement>(child);
            ctx.stop::<Spawner>(entity);
        }
        Ok(())
    }
}

#[test]
fn test_snapshot_stability() -> Result<()> {
    let tracer = new_tracer();

    let mut builder = World::builder();
    builder.register_default::<Spawner>().register_default::<Movement>();
    let mut world = builder.build();

    let parent = world.create();
    world.start::<Spawner>(parent)?;

    world.update(&tracer, 1.)?;

    let child = *world.started::<Movement>().first().expect("Spawner starts Movement for its child");
    assert_eq!(
        world.get::<Position>(child)?.0,
        Point::ZERO,
        "entities started during a pass are not processed in the same pass",
    );
    assert!(!world.is_started::<Spawner>(parent));

    world.update(&tracer, 1.)?;
    assert_eq!(world.get::<Position>(child)?.0, Point::new(0., 1.));
    assert_eq!(world.started::<Movement>(), [child], "Spawner no longer runs for the parent");
    Ok(())
}

/// Disposes every entity it processes.
#[derive(Default)]
struct Reaper;

impl Behavior for Reaper {
    const KIND: Kind = Kind::Update;
    const PRIORITY: Priority = Priority::First;

    fn run(&mut self, ctx: &mut Context<'_>, entities: &[Entity]) -> Result<()> {
        for &entity in entities {
            ctx.dispose(entity);
        }
        Ok(())
    }
}

#[test]
fn test_deferred_disposal() -> Result<()> {
    let tracer = new_tracer();

    let mut builder = World::builder();
    builder.register_default::<Reaper>().register_default::<Movement>();
    let mut world = builder.build();

    let entity = spawn_mover(&mut world, Point::ZERO, Point::new(1., 0.))?;
    world.start::<Reaper>(entity)?;

    world.update(&tracer, 1.)?;

    assert_eq!(
        tracer.0 .1.behaviors(Pass::Update),
        ["Reaper", "Movement"],
        "disposal takes effect after the pass",
    );
    assert!(world.is_disposed(entity));
    assert!(!world.contains::<Position>(entity));
    assert!(!world.is_started::<Movement>(entity));
    assert!(!world.is_started::<Reaper>(entity));
    Ok(())
}

/// Reads velocities without declaring them as requirements.
#[derive(Default)]
struct Careless;

impl Behavior for Careless {
    const KIND: Kind = Kind::Update;
    const PRIORITY: Priority = Priority::Low;

    fn run(&mut self, ctx: &mut Context<'_>, entities: &[Entity]) -> Result<()> {
        for &entity in entities {
            ctx.get::<Velocity>(entity)?;
        }
        Ok(())
    }
}

#[test]
fn test_missing_requirement_aborts_pass() -> Result<()> {
    let tracer = new_tracer();

    let mut builder = World::builder();
    builder.register_default::<Movement>().register_default::<Straggler>();
    let mut world = builder.build();

    let entity = world.create();
    world.set(entity, Position(Point::ZERO))?;
    world.start::<Movement>(entity)?;
    world.start::<Straggler>(entity)?;

    match world.update(&tracer, 1.) {
        Err(Error::ComponentMissing { entity: missing, component }) => {
            assert_eq!(missing, entity);
            assert!(component.ends_with("Velocity"), "unexpected component {component}");
        }
        other => panic!("expected ComponentMissing, got {other:?}"),
    }
    assert!(
        tracer.0 .1.behaviors(Pass::Update).is_empty(),
        "neither Movement nor later behaviors run after a failed requirement check",
    );
    assert!(tracer.0 .1.events().iter().any(|event| matches!(event, Event::AbortPass { .. })));

    tracer.0 .1.clear();
    world.set(entity, Velocity(Point::new(2., 0.)))?;
    world.update(&tracer, 1.)?;

    assert_eq!(tracer.0 .1.behaviors(Pass::Update), ["Movement", "Straggler"]);
    assert_eq!(world.get::<Position>(entity)?.0, Point::new(2., 0.));
    Ok(())
}

#[test]
fn test_behavior_error_aborts_pass_and_flushes() -> Result<()> {
    let tracer = new_tracer();

    let mut builder = World::builder();
    builder
        .register_default::<Reaper>()
        .register_default::<Careless>()
        .register_default::<Straggler>();
    let mut world = builder.build();

    let doomed = world.create();
    world.start::<Reaper>(doomed)?;

    let fragile = world.create();
    world.start::<Careless>(fragile)?;
    world.start::<Straggler>(fragile)?;

    assert!(matches!(world.update(&tracer, 1.), Err(Error::ComponentMissing { .. })));
    assert_eq!(tracer.0 .1.behaviors(Pass::Update), ["Reaper", "Careless"]);
    assert!(world.is_disposed(doomed), "queued operations are applied even if the pass aborts");
    Ok(())
}

#[test]
fn test_requirements_declared() {
    let mut requirements = Requirements::default();
    Movement::requirements(&mut requirements);
    assert_eq!(
        format!("{requirements:?}").matches("Position").count(),
        1,
        "requirements are reported by type name",
    );
}
