//! Exposes testing, profiling and tracing capabilities.

use std::time::Duration;

use crate::input::{CommandId, TriggerKind};
use crate::scheduler::Pass;
use crate::Error;

/// A handler that receives scheduling-related events.
///
/// All methods default to no-ops,
/// so implementations only need to override the events they are interested in.
pub trait Tracer {
    /// A simulation tick starts.
    fn start_tick(&self, _delta_time: f32) {}

    /// A simulation tick ends.
    fn end_tick(&self, _elapsed: Duration) {}

    /// A pass starts.
    fn start_pass(&self, _pass: Pass) {}

    /// A pass ends, whether or not it was aborted.
    fn end_pass(&self, _pass: Pass, _elapsed: Duration) {}

    /// A pass is aborted because a behavior failed.
    fn abort_pass(&self, _pass: Pass, _error: &Error) {}

    /// A behavior is about to run over `entities` entities.
    fn start_behavior(&self, _pass: Pass, _behavior: &str, _entities: usize) {}

    /// A behavior has returned successfully.
    fn end_behavior(&self, _pass: Pass, _behavior: &str, _elapsed: Duration) {}

    /// A trigger reported an invocation during polling.
    fn trigger_fired(&self, _command: CommandId, _trigger: TriggerKind) {}

    /// A command callback has been invoked.
    fn command_invoked(&self, _command: CommandId, _name: Option<&str>) {}
}

/// An empty tracer.
pub struct Noop;

impl Tracer for Noop {}

/// A tracer that logs all events.
pub struct Log(
    /// The log level to log events with.
    pub log::Level,
);

impl Tracer for Log {
    fn start_tick(&self, delta_time: f32) {
        log::log!(self.0, "start_tick(delta_time: {delta_time})");
    }

    fn end_tick(&self, elapsed: Duration) { log::log!(self.0, "end_tick(elapsed: {elapsed:?})"); }

    fn start_pass(&self, pass: Pass) { log::log!(self.0, "start_pass(pass: {pass})"); }

    fn end_pass(&self, pass: Pass, elapsed: Duration) {
        log::log!(self.0, "end_pass(pass: {pass}, elapsed: {elapsed:?})");
    }

    fn abort_pass(&self, pass: Pass, error: &Error) {
        log::log!(self.0, "abort_pass(pass: {pass}, error: {error})");
    }

    fn start_behavior(&self, pass: Pass, behavior: &str, entities: usize) {
        log::log!(self.0, "start_behavior(pass: {pass}, behavior: {behavior}, entities: {entities})");
    }

    fn end_behavior(&self, pass: Pass, behavior: &str, elapsed: Duration) {
        log::log!(self.0, "end_behavior(pass: {pass}, behavior: {behavior}, elapsed: {elapsed:?})");
    }

    fn trigger_fired(&self, command: CommandId, trigger: TriggerKind) {
        log::log!(self.0, "trigger_fired(command: {command}, trigger: {trigger})");
    }

    fn command_invoked(&self, command: CommandId, name: Option<&str>) {
        log::log!(self.0, "command_invoked(command: {command}, name: {name:?})");
    }
}

/// Groups multiple tracers into a tuple and dispatches each call to them in serial.
pub struct Aggregate<T>(
    /// A tuple of child tracers to execute in serial.
    pub T,
);

macro_rules! impl_aggregate {
    ($($idx:tt: $ty:ident),*) => {
        impl<$($ty: Tracer),*> Tracer for Aggregate<($($ty,)*)> {
            fn start_tick(&self, delta_time: f32) { $(self.0.$idx.start_tick(delta_time);)* }

            fn end_tick(&self, elapsed: Duration) { $(self.0.$idx.end_tick(elapsed);)* }

            fn start_pass(&self, pass: Pass) { $(self.0.$idx.start_pass(pass);)* }

            fn end_pass(&self, pass: Pass, elapsed: Duration) {
                $(self.0.$idx.end_pass(pass, elapsed);)*
            }

            fn abort_pass(&self, pass: Pass, error: &Error) {
                $(self.0.$idx.abort_pass(pass, error);)*
            }

            fn start_behavior(&self, pass: Pass, behavior: &str, entities: usize) {
                $(self.0.$idx.start_behavior(pass, behavior, entities);)*
            }

            fn end_behavior(&self, pass: Pass, behavior: &str, elapsed: Duration) {
                $(self.0.$idx.end_behavior(pass, behavior, elapsed);)*
            }

            fn trigger_fired(&self, command: CommandId, trigger: TriggerKind) {
                $(self.0.$idx.trigger_fired(command, trigger);)*
            }

            fn command_invoked(&self, command: CommandId, name: Option<&str>) {
                $(self.0.$idx.command_invoked(command, name);)*
            }
        }
    };
}

impl_aggregate!(0: A);
impl_aggregate!(0: A, 1: B);
impl_aggregate!(0: A, 1: B, 2: C);
impl_aggregate!(0: A, 1: B, 2: C, 3: D);
