//! Control loop: poll → decide → act → report.
//!
//! [`CycleRunner`] owns the single [`TrainState`] value and both gateways;
//! no global state exists. Each cycle runs to completion before the next
//! begins, with a stop flag checked once per cycle so the gateways can be
//! released deterministically.
//!
//! Fault policy per cycle:
//! - sensor read failure: substitute [`SensorReading::NONE`] (fail-open
//!   bias, keeps the barrier moving toward open rather than stuck closed);
//! - actuator write failure: warn and continue; the next cycle re-commands
//!   freshly computed state, so no retry happens inside a cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::fsm::next_state;
use crate::gateway::{BarrierGateway, SensorGateway};
use crate::output::barrier_for;
use crate::report::report;
use crate::state::{BarrierState, SensorReading, TrainState};

// ─── Cycle Statistics ───────────────────────────────────────────────

/// Per-loop counters, updated every cycle with no allocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleStats {
    /// Total cycles executed.
    pub cycle_count: u64,
    /// State transitions observed.
    pub transitions: u64,
    /// Sensor polls that failed (fail-open substitute used).
    pub sensor_faults: u64,
    /// Barrier commands that were not acknowledged.
    pub actuator_faults: u64,
}

impl CycleStats {
    /// Zeroed stats.
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            transitions: 0,
            sensor_faults: 0,
            actuator_faults: 0,
        }
    }
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// Drives the crossing: sensor gateway → transition engine → output mapper
/// → barrier gateway → change reporter, repeating until stopped.
#[derive(Debug)]
pub struct CycleRunner<S, B> {
    sensors: S,
    barrier: B,
    state: TrainState,
    period: Option<Duration>,
    stats: CycleStats,
}

impl<S: SensorGateway, B: BarrierGateway> CycleRunner<S, B> {
    /// Runner starting at `Init` with free-running cycles.
    pub fn new(sensors: S, barrier: B) -> Self {
        Self {
            sensors,
            barrier,
            state: TrainState::Init,
            period: None,
            stats: CycleStats::new(),
        }
    }

    /// Pace cycles to the given period (sleeps for the cycle's remainder).
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = Some(period);
        self
    }

    /// Current train state.
    #[inline]
    pub fn state(&self) -> TrainState {
        self.state
    }

    /// Loop counters.
    #[inline]
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Release both gateways, consuming the runner.
    pub fn into_gateways(self) -> (S, B) {
        (self.sensors, self.barrier)
    }

    /// Execute one control cycle. Never panics, never chains transitions.
    pub fn step(&mut self) -> BarrierState {
        // Poll. A failed read biases toward an open barrier.
        let sensors = match self.sensors.read_sensors() {
            Ok(reading) => reading,
            Err(e) => {
                self.stats.sensor_faults += 1;
                warn!("sensor read failed, assuming no train present: {e}");
                SensorReading::NONE
            }
        };

        // Decide.
        let previous = self.state;
        self.state = next_state(previous, sensors);
        let command = barrier_for(self.state);

        // Act. Hardware keeps its last commanded position on failure and
        // the next cycle commands again.
        if let Err(e) = self.barrier.write_barrier(command) {
            self.stats.actuator_faults += 1;
            warn!("barrier command {command} not acknowledged: {e}");
        }

        // Report only on change.
        if let Some(line) = report(previous, self.state) {
            self.stats.transitions += 1;
            info!(state = %self.state, barrier = %command, "{line}");
        }

        self.stats.cycle_count += 1;
        command
    }

    /// Run until the stop flag is raised.
    ///
    /// The flag is checked once per cycle; the loop has no other exit under
    /// normal operation. Returns after the final cycle so the caller can
    /// reclaim the gateways via [`CycleRunner::into_gateways`].
    pub fn run(&mut self, stop: &AtomicBool) {
        while !stop.load(Ordering::SeqCst) {
            let started = Instant::now();
            self.step();
            self.pace(started);
        }
    }

    /// Run at most `cycles` cycles, honoring the stop flag.
    pub fn run_for(&mut self, cycles: u64, stop: &AtomicBool) {
        for _ in 0..cycles {
            if stop.load(Ordering::SeqCst) {
                break;
            }
            let started = Instant::now();
            self.step();
            self.pace(started);
        }
    }

    fn pace(&self, started: Instant) {
        if let Some(period) = self.period {
            if let Some(remaining) = period.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
