//! Behaviors are singleton processors invoked once per pass over the entities that started them.
//!
//! Each behavior type has exactly one instance per world.
//! Starting a behavior for an entity adds the entity to the interest set of that instance,
//! it does not create a new processor.
//! The instance is constructed from its registered factory the first time any entity starts it.
//!
//! A behavior receives its whole interest set in a single [`run`](Behavior::run) call
//! rather than one call per entity,
//! so that batching-sensitive behaviors (e.g. renderers) can process all entities in one go.
//!
//! # Ordering
//! [`Kind::Update`] behaviors run once per simulation tick,
//! ordered by [`Priority`] and then by registration order.
//! [`Kind::Draw`] behaviors run once per render frame,
//! ordered by [`render_layer`](Behavior::render_layer) and then by registration order.

use std::any::Any;

use crate::util::DbgTypeId;
use crate::world::Context;
use crate::{Entity, Result};

mod registry;
pub use registry::Registry;


/// The pass in which a behavior runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Kind {
    /// Runs once per simulation tick with the tick's delta time.
    Update,
    /// Runs once per render frame.
    Draw,
}

/// The ordering tier of an [`Update`](Kind::Update) behavior.
///
/// Tiers run from [`First`](Self::First) to [`Last`](Self::Last).
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
pub enum Priority {
    /// Runs before all other tiers.
    First,
    /// Runs before default behaviors.
    High,
    /// The default tier.
    #[default]
    Default,
    /// Runs after default behaviors.
    Low,
    /// Runs after all other tiers.
    Last,
}

/// Collects the component types a behavior expects on every entity it processes.
#[derive(Debug, Default)]
pub struct Requirements {
    types: Vec<DbgTypeId>,
}

impl Requirements {
    /// Declares that component type `C` must be present.
    pub fn require<C: 'static>(&mut self) -> &mut Self {
        let ty = DbgTypeId::of::<C>();
        if !self.types.contains(&ty) {
            self.types.push(ty);
        }
        self
    }

    pub(crate) fn of<B: Behavior>() -> Vec<DbgTypeId> {
        let mut requirements = Self::default();
        B::requirements(&mut requirements);
        requirements.types
    }
}

/// A processor that runs over all entities that started it.
pub trait Behavior: 'static {
    /// The pass in which this behavior runs.
    const KIND: Kind;

    /// The ordering tier among update behaviors.
    ///
    /// Ignored for draw behaviors.
    const PRIORITY: Priority = Priority::Default;

    /// Declares the components expected on every processed entity.
    ///
    /// The scheduler checks these before each invocation
    /// and aborts the pass with [`Error::ComponentMissing`](crate::Error::ComponentMissing)
    /// if any entity lacks one of them.
    fn requirements(_requirements: &mut Requirements) {}

    /// The ordering key among draw behaviors. Lower layers draw first.
    ///
    /// This is queried at the start of every draw pass and may change over time.
    fn render_layer(&self) -> i32 { 0 }

    /// Processes the active entities in the interest set.
    ///
    /// `entities` is a snapshot taken when the invocation starts.
    /// Starting, stopping or disposing entities through `ctx`
    /// only takes effect after the pass.
    fn run(&mut self, ctx: &mut Context<'_>, entities: &[Entity]) -> Result<()>;
}

/// Object-safe view of a [`Behavior`] instance.
pub(crate) trait AnyBehavior {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn render_layer(&self) -> i32;

    fn run(&mut self, ctx: &mut Context<'_>, entities: &[Entity]) -> Result<()>;
}

impl<B: Behavior> AnyBehavior for B {
    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }

    fn render_layer(&self) -> i32 { Behavior::render_layer(self) }

    fn run(&mut self, ctx: &mut Context<'_>, entities: &[Entity]) -> Result<()> {
        Behavior::run(self, ctx, entities)
    }
}

static_assertions::assert_obj_safe!(AnyBehavior);
