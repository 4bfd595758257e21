//! Scripted simulation gateways.
//!
//! Replaces the interface board with a pre-recorded sensor scenario and a
//! command recorder, so the full control loop runs without hardware. Used by
//! the integration tests and by `crossing_control --replay <file>`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::gateway::{BarrierGateway, GatewayError, SensorGateway};
use crate::state::{BarrierState, SensorReading};

// ─── Scenario ───────────────────────────────────────────────────────

/// One scripted control cycle: a sensor sample, or an injected read fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorFrame {
    /// Left approach detector sees a train.
    #[serde(default)]
    pub left: bool,
    /// Center detector sees a train.
    #[serde(default)]
    pub center: bool,
    /// Right approach detector sees a train.
    #[serde(default)]
    pub right: bool,
    /// Fail this cycle's sensor read instead of delivering a sample.
    #[serde(default)]
    pub fault: bool,
}

impl SensorFrame {
    /// Frame with no train detected.
    pub const fn clear() -> Self {
        Self {
            left: false,
            center: false,
            right: false,
            fault: false,
        }
    }

    /// Semantic reading for this frame.
    pub const fn reading(self) -> SensorReading {
        SensorReading {
            left_present: self.left,
            center_present: self.center,
            right_present: self.right,
        }
    }
}

/// A replayable sequence of sensor frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Frames, one per control cycle.
    pub frames: Vec<SensorFrame>,
}

impl Scenario {
    /// Parse a scenario from JSON.
    pub fn from_json(json: &str) -> Result<Self, GatewayError> {
        serde_json::from_str(json)
            .map_err(|e| GatewayError::Protocol(format!("scenario parse: {e}")))
    }

    /// Load a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self, GatewayError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Number of scripted cycles.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when the scenario has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

// ─── Scripted Sensor Gateway ────────────────────────────────────────

/// Sensor gateway replaying a [`Scenario`] frame by frame.
///
/// Once the scenario is exhausted every further poll reports no train
/// present, matching a quiet crossing.
#[derive(Debug)]
pub struct ScriptedSensors {
    frames: Vec<SensorFrame>,
    cursor: usize,
}

impl ScriptedSensors {
    /// Gateway over a scenario.
    pub fn new(scenario: Scenario) -> Self {
        Self {
            frames: scenario.frames,
            cursor: 0,
        }
    }

    /// Gateway over plain readings (no injected faults).
    pub fn from_readings(readings: &[SensorReading]) -> Self {
        let frames = readings
            .iter()
            .map(|r| SensorFrame {
                left: r.left_present,
                center: r.center_present,
                right: r.right_present,
                fault: false,
            })
            .collect();
        Self { frames, cursor: 0 }
    }

    /// True once every scripted frame has been consumed.
    pub fn exhausted(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

impl SensorGateway for ScriptedSensors {
    fn read_sensors(&mut self) -> Result<SensorReading, GatewayError> {
        let frame = self
            .frames
            .get(self.cursor)
            .copied()
            .unwrap_or(SensorFrame::clear());
        if self.cursor < self.frames.len() {
            self.cursor += 1;
        }

        if frame.fault {
            return Err(GatewayError::Protocol(
                "injected sensor fault".to_string(),
            ));
        }
        Ok(frame.reading())
    }
}

// ─── Recording Barrier Gateway ──────────────────────────────────────

/// Barrier gateway recording every commanded state.
#[derive(Debug, Default)]
pub struct RecordingBarrier {
    commands: Vec<BarrierState>,
    fail_on: Option<usize>,
    writes: usize,
}

impl RecordingBarrier {
    /// Recorder that accepts every command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that fails the write with the given zero-based index once.
    pub fn failing_on(write_index: usize) -> Self {
        Self {
            fail_on: Some(write_index),
            ..Self::default()
        }
    }

    /// Successfully commanded states, in order.
    pub fn commands(&self) -> &[BarrierState] {
        &self.commands
    }

    /// Last successfully commanded state.
    pub fn last_command(&self) -> Option<BarrierState> {
        self.commands.last().copied()
    }
}

impl BarrierGateway for RecordingBarrier {
    fn write_barrier(&mut self, state: BarrierState) -> Result<(), GatewayError> {
        let index = self.writes;
        self.writes += 1;
        if self.fail_on == Some(index) {
            return Err(GatewayError::Protocol(
                "injected actuator fault".to_string(),
            ));
        }
        self.commands.push(state);
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_json_round_trip() {
        let json = r#"{"frames": [
            {"left": true},
            {"center": true},
            {},
            {"right": true},
            {}
        ]}"#;
        let scenario = Scenario::from_json(json).unwrap();
        assert_eq!(scenario.len(), 5);
        assert!(scenario.frames[0].left);
        assert!(!scenario.frames[0].center);
        assert!(scenario.frames[1].center);
        assert_eq!(scenario.frames[2], SensorFrame::clear());
    }

    #[test]
    fn malformed_scenario_rejected() {
        let err = Scenario::from_json("not json @@@").unwrap_err();
        assert!(matches!(err, GatewayError::Protocol(_)));
    }

    #[test]
    fn scripted_sensors_replay_then_go_quiet() {
        let mut sensors = ScriptedSensors::from_readings(&[SensorReading {
            left_present: true,
            center_present: false,
            right_present: false,
        }]);

        assert!(!sensors.exhausted());
        let first = sensors.read_sensors().unwrap();
        assert!(first.left_present);
        assert!(sensors.exhausted());

        // Past the script: quiet crossing forever.
        for _ in 0..3 {
            assert_eq!(sensors.read_sensors().unwrap(), SensorReading::NONE);
        }
    }

    #[test]
    fn scripted_fault_surfaces_as_error() {
        let scenario = Scenario {
            frames: vec![SensorFrame {
                fault: true,
                ..SensorFrame::clear()
            }],
        };
        let mut sensors = ScriptedSensors::new(scenario);
        assert!(sensors.read_sensors().is_err());
    }

    #[test]
    fn recording_barrier_records_in_order() {
        let mut barrier = RecordingBarrier::new();
        barrier.write_barrier(BarrierState::Closed).unwrap();
        barrier.write_barrier(BarrierState::Open).unwrap();
        assert_eq!(
            barrier.commands(),
            &[BarrierState::Closed, BarrierState::Open]
        );
        assert_eq!(barrier.last_command(), Some(BarrierState::Open));
    }

    #[test]
    fn recording_barrier_injected_failure_is_one_shot() {
        let mut barrier = RecordingBarrier::failing_on(0);
        assert!(barrier.write_barrier(BarrierState::Closed).is_err());
        assert!(barrier.write_barrier(BarrierState::Closed).is_ok());
        assert_eq!(barrier.commands(), &[BarrierState::Closed]);
    }
}
