use crate::behavior::{self, Behavior};
use crate::scheduler::Scheduler;
use crate::{input, World};

use super::{offline, Entities};

/// This type is used to build a world.
/// No more behaviors can be registered after the builder is built.
#[derive(Default)]
pub struct Builder {
    registry: behavior::Registry,
    devices:  input::Devices,
}

impl Builder {
    /// Creates an empty builder.
    pub fn new() -> Self { Self::default() }

    /// Registers a behavior type with the factory that constructs its singleton.
    ///
    /// The factory is called the first time any entity starts the behavior.
    /// Registration order breaks ties between behaviors of the same priority or render layer.
    ///
    /// # Panics
    /// Panics if `B` has already been registered.
    pub fn register<B: Behavior>(&mut self, factory: impl FnOnce() -> B + 'static) -> &mut Self {
        self.registry.register::<B>(factory);
        self
    }

    /// Registers a behavior type constructed with [`Default`].
    pub fn register_default<B: Behavior + Default>(&mut self) -> &mut Self {
        self.register::<B>(B::default)
    }

    /// Returns the device handles the world will start with.
    pub fn devices_mut(&mut self) -> &mut input::Devices { &mut self.devices }

    /// Constructs the world from the builder.
    pub fn build(self) -> World {
        let scheduler = Scheduler::new(&self.registry);
        log::debug!("Built world with {} behavior types", self.registry.len());

        World {
            entities: Entities::default(),
            registry: self.registry,
            scheduler,
            buffer: offline::Buffer::default(),
            router: input::Router::default(),
            devices: self.devices,
        }
    }
}
