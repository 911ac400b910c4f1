#![allow(missing_docs)]

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexSet;
use parking_lot::{Mutex, Once, RwLock};

use crate::behavior::{self, Behavior};
use crate::input::{
    CommandId, GamePad, GamePadButton, Key, Keyboard, Mouse, MouseButton, State, ThumbStick, Touch,
    TriggerKind,
};
use crate::scheduler::Pass;
use crate::tracer::Tracer;
use crate::world::Context;
use crate::{Entity, Error, Point, Result};

pub fn init() {
    static SET_LOGGER_ONCE: Once = Once::new();
    SET_LOGGER_ONCE.call_once(env_logger::init);
}

/// Records event and ensures that they are in the correct order.
pub struct EventTracer<T: fmt::Debug + Eq + Hash> {
    dependencies: HashMap<T, Vec<T>>,
    seen:         Mutex<IndexSet<T>>,
}

impl<T: fmt::Debug + Eq + Hash> EventTracer<T> {
    /// Creates a new event tracer that ensures `b` happens after `a` for each `(a, b)` input.
    pub fn new(orders: impl IntoIterator<Item = (T, T)>) -> Self {
        let mut dependencies: HashMap<T, Vec<T>> = HashMap::new();
        for (before, after) in orders {
            dependencies.entry(after).or_default().push(before);
        }
        let seen = Mutex::new(IndexSet::new());

        Self { dependencies, seen }
    }

    /// Records that `event` has happened.
    ///
    /// # Panics
    /// Panics if the same `event` was sent twice or a dependency is not satisfied.
    pub fn trace(&self, event: T) {
        let mut seen = self.seen.lock();

        if let Some(deps) = self.dependencies.get(&event) {
            for dep in deps {
                assert!(seen.contains(dep), "{:?} should happen after {:?}", event, dep);
            }
        }

        let (index, new) = seen.insert_full(event);
        assert!(
            new,
            "{:?} is inserted twice",
            seen.get_index(index).expect("insert_full should return valid index")
        );
    }

    /// Returns the events observed in this tracer.
    pub fn get_events(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.seen.lock().iter().cloned().collect()
    }
}

/// An event observed by [`RecordingTracer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartBehavior { pass: Pass, behavior: String, entities: usize },
    AbortPass { pass: Pass, error: Error },
    TriggerFired { command: CommandId, trigger: TriggerKind },
    CommandInvoked { command: CommandId, name: Option<String> },
}

/// A tracer that records behavior runs, aborts and input events.
#[derive(Default)]
pub struct RecordingTracer {
    events: Mutex<Vec<Event>>,
}

impl RecordingTracer {
    pub fn events(&self) -> Vec<Event> { self.events.lock().clone() }

    /// Returns the unqualified names of the behaviors started in `pass`, in order.
    pub fn behaviors(&self, pass: Pass) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::StartBehavior { pass: event_pass, behavior, .. } if *event_pass == pass => {
                    Some(short_name(behavior).to_string())
                }
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) { self.events.lock().clear() }
}

fn short_name(name: &str) -> &str { name.rsplit("::").next().unwrap_or(name) }

impl Tracer for RecordingTracer {
    fn abort_pass(&self, pass: Pass, error: &Error) {
        self.events.lock().push(Event::AbortPass { pass, error: error.clone() });
    }

    fn start_behavior(&self, pass: Pass, behavior: &str, entities: usize) {
        self.events.lock().push(Event::StartBehavior {
            pass,
            behavior: behavior.to_string(),
            entities,
        });
    }

    fn trigger_fired(&self, command: CommandId, trigger: TriggerKind) {
        self.events.lock().push(Event::TriggerFired { command, trigger });
    }

    fn command_invoked(&self, command: CommandId, name: Option<&str>) {
        self.events
            .lock()
            .push(Event::CommandInvoked { command, name: name.map(str::to_string) });
    }
}

/// A test position component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Point);

/// A test velocity component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Point);

/// Adds `Velocity * delta_time` to `Position` on every tick.
#[derive(Debug, Default)]
pub struct Movement;

impl Behavior for Movement {
    const KIND: behavior::Kind = behavior::Kind::Update;

    fn requirements(requirements: &mut behavior::Requirements) {
        requirements.require::<Position>().require::<Velocity>();
    }

    fn run(&mut self, ctx: &mut Context<'_>, entities: &[Entity]) -> Result<()> {
        let delta_time = ctx.delta_time();
        for &entity in entities {
            let velocity = ctx.get::<Velocity>(entity)?.0;
            ctx.get_mut::<Position>(entity)?.0 += velocity * delta_time;
        }
        Ok(())
    }
}

fn advance_state(state: &mut State) {
    *state = match *state {
        State::Pressing => State::Pressed,
        State::Releasing => State::Released,
        other => other,
    };
}

/// A keyboard whose key states are set by the test.
#[derive(Debug, Default)]
pub struct MockKeyboard {
    keys:        HashMap<Key, State>,
    unavailable: bool,
}

impl MockKeyboard {
    pub fn shared() -> Arc<RwLock<Self>> { Arc::new(RwLock::new(Self::default())) }

    pub fn set(&mut self, key: Key, state: State) { self.keys.insert(key, state); }

    pub fn press(&mut self, key: Key) { self.set(key, State::Pressing) }

    pub fn release(&mut self, key: Key) { self.set(key, State::Releasing) }

    /// Turns edges into levels, as a host would between two ticks.
    pub fn advance(&mut self) { self.keys.values_mut().for_each(advance_state) }

    pub fn set_available(&mut self, available: bool) { self.unavailable = !available }
}

impl Keyboard for MockKeyboard {
    fn is_available(&self) -> bool { !self.unavailable }

    fn key(&self, key: Key) -> State { self.keys.get(&key).copied().unwrap_or_default() }
}

/// A mouse whose buttons, pointer and wheel are set by the test.
#[derive(Debug)]
pub struct MockMouse {
    buttons:  HashMap<MouseButton, State>,
    position: Point,
    wheel:    f32,
}

impl Default for MockMouse {
    fn default() -> Self { Self { buttons: HashMap::new(), position: Point::UNUSED, wheel: 0. } }
}

impl MockMouse {
    pub fn shared() -> Arc<RwLock<Self>> { Arc::new(RwLock::new(Self::default())) }

    pub fn set(&mut self, button: MouseButton, state: State) { self.buttons.insert(button, state); }

    pub fn press(&mut self, button: MouseButton) { self.set(button, State::Pressing) }

    pub fn release(&mut self, button: MouseButton) { self.set(button, State::Releasing) }

    pub fn advance(&mut self) { self.buttons.values_mut().for_each(advance_state) }

    pub fn move_to(&mut self, position: Point) { self.position = position }

    pub fn scroll(&mut self, delta: f32) { self.wheel += delta }
}

impl Mouse for MockMouse {
    fn button(&self, button: MouseButton) -> State {
        self.buttons.get(&button).copied().unwrap_or_default()
    }

    fn position(&self) -> Point { self.position }

    fn scroll_wheel(&self) -> f32 { self.wheel }
}

/// A touch screen whose primary touch point is set by the test.
#[derive(Debug)]
pub struct MockTouch {
    state:    State,
    position: Point,
}

impl Default for MockTouch {
    fn default() -> Self { Self { state: State::Released, position: Point::UNUSED } }
}

impl MockTouch {
    pub fn shared() -> Arc<RwLock<Self>> { Arc::new(RwLock::new(Self::default())) }

    pub fn touch(&mut self, position: Point) {
        self.state = State::Pressing;
        self.position = position;
    }

    pub fn move_to(&mut self, position: Point) { self.position = position }

    pub fn lift(&mut self) { self.state = State::Releasing }

    pub fn advance(&mut self) { advance_state(&mut self.state) }
}

impl Touch for MockTouch {
    fn state(&self) -> State { self.state }

    fn position(&self) -> Point { self.position }
}

/// A game pad whose buttons and sticks are set by the test.
#[derive(Debug, Default)]
pub struct MockGamePad {
    buttons: HashMap<GamePadButton, State>,
    sticks:  HashMap<ThumbStick, Point>,
}

impl MockGamePad {
    pub fn shared() -> Arc<RwLock<Self>> { Arc::new(RwLock::new(Self::default())) }

    pub fn set(&mut self, button: GamePadButton, state: State) { self.buttons.insert(button, state); }

    pub fn press(&mut self, button: GamePadButton) { self.set(button, State::Pressing) }

    pub fn advance(&mut self) { self.buttons.values_mut().for_each(advance_state) }

    pub fn tilt(&mut self, stick: ThumbStick, deflection: Point) {
        self.sticks.insert(stick, deflection);
    }
}

impl GamePad for MockGamePad {
    fn button(&self, button: GamePadButton) -> State {
        self.buttons.get(&button).copied().unwrap_or_default()
    }

    fn thumb_stick(&self, stick: ThumbStick) -> Point {
        self.sticks.get(&stick).copied().unwrap_or(Point::ZERO)
    }
}
