//! Gateway traits for the external collaborators.
//!
//! The decision core never touches hardware. Sensor polling and barrier
//! actuation go through these two narrow traits, with a serial
//! interface-board implementation ([`serial`]) for production and a
//! scripted implementation ([`sim`]) for tests and replay runs.

use thiserror::Error;

use crate::state::{BarrierState, SensorReading};

pub mod serial;
pub mod sim;

/// Error types for gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Device could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        /// Device path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Serial line configuration failed.
    #[error("serial setup failed: {0}")]
    Setup(nix::Error),

    /// Read/write on the device failed.
    #[error("device I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The interface board answered nothing or nonsense.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Supplies one sensor sample per control cycle.
///
/// Implementations own the polarity translation from electrical levels to
/// semantic booleans; the core only ever sees [`SensorReading`].
pub trait SensorGateway {
    /// Poll the three presence detectors once.
    ///
    /// # Errors
    /// A failed poll surfaces as a [`GatewayError`]; the control loop
    /// substitutes [`SensorReading::NONE`] (fail-open) and continues.
    fn read_sensors(&mut self) -> Result<SensorReading, GatewayError>;
}

/// Issues barrier commands to hardware.
pub trait BarrierGateway {
    /// Command the barrier actuator.
    ///
    /// # Errors
    /// A failed write surfaces as a [`GatewayError`]. The control loop does
    /// not retry within the cycle; real hardware keeps its last commanded
    /// position and the next cycle re-commands freshly computed state.
    fn write_barrier(&mut self, state: BarrierState) -> Result<(), GatewayError>;
}
