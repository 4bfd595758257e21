//! Decision-core benchmarks: transition engine, output mapper, and a full
//! scripted control cycle.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use crossing_control::cycle::CycleRunner;
use crossing_control::fsm::next_state;
use crossing_control::gateway::sim::{RecordingBarrier, ScriptedSensors};
use crossing_control::output::barrier_for;
use crossing_control::report::report;
use crossing_control::state::{SensorReading, TrainState};

fn reading(left: bool, center: bool, right: bool) -> SensorReading {
    SensorReading {
        left_present: left,
        center_present: center,
        right_present: right,
    }
}

fn bench_decision_pass(c: &mut Criterion) {
    let drive = [
        reading(true, false, false),
        reading(false, true, false),
        reading(false, false, false),
        reading(false, false, true),
        reading(false, false, false),
    ];

    c.bench_function("decision_pass_full_cycle", |b| {
        b.iter(|| {
            let mut state = TrainState::Init;
            for sensors in drive {
                let previous = state;
                state = next_state(previous, black_box(sensors));
                black_box(barrier_for(state));
                black_box(report(previous, state));
            }
            state
        })
    });
}

fn bench_scripted_step(c: &mut Criterion) {
    c.bench_function("scripted_runner_step", |b| {
        b.iter_batched(
            || {
                let sensors = ScriptedSensors::from_readings(&[reading(true, false, false)]);
                CycleRunner::new(sensors, RecordingBarrier::new())
            },
            |mut runner| black_box(runner.step()),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_decision_pass, bench_scripted_step);
criterion_main!(benches);
