use std::cell::Cell;
use std::rc::Rc;

use criterion::*;
use tickwork::input::{trigger, Command, Key};
use tickwork::test_util::MockKeyboard;
use tickwork::{tracer, World};

fn dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("input phase");

    for log_commands in (0..=8).step_by(4) {
        let commands = 1 << log_commands;
        group.throughput(Throughput::Elements(commands));
        group.bench_with_input(
            BenchmarkId::new("key commands", format!("{commands} commands")),
            &commands,
            |b, &commands| {
                let keyboard = MockKeyboard::shared();
                keyboard.write().press(Key::Space);

                let mut world = World::builder().build();
                world.devices_mut().attach_keyboard(&keyboard);

                let invoked = Rc::new(Cell::new(0_u64));
                for _ in 0..commands {
                    let invoked = Rc::clone(&invoked);
                    let mut command = Command::new(move |_| {
                        invoked.set(invoked.get() + 1);
                        Ok(())
                    });
                    command
                        .add_boxed(trigger::create("KeyTrigger", "Space").expect("valid trigger"))
                        .expect("payload-less commands accept any trigger");
                    command
                        .add_boxed(trigger::create("KeyTrigger", "Enter").expect("valid trigger"))
                        .expect("payload-less commands accept any trigger");
                    world.input_mut().add(command);
                }

                b.iter(|| {
                    world.run_input_phase(&tracer::Noop, 1. / 60.).expect("counting callbacks do not fail")
                });
            },
        );
    }
}

criterion_group!(benches, dispatch);
criterion_main!(benches);
