//! Serial gateway to the barrier interface board.
//!
//! The board (typically on `/dev/ttyACM0`) exposes both the three presence
//! detectors and the barrier actuator over one raw 8N1 serial line:
//!
//! - sensor poll: host sends [`POLL_REQUEST`], board answers one status byte
//!   with the raw detector levels in bits 0..=2 (left, center, right;
//!   electrical 0 = present);
//! - barrier command: host sends a single command byte, [`CMD_OPEN`] or
//!   [`CMD_CLOSE`]. The board keeps the last commanded position.
//!
//! Both gateway halves share the opened port via a duplicated descriptor so
//! the control loop can own them independently.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use nix::sys::termios::{self, BaudRate, FlushArg, SetArg, SpecialCharacterIndices};
use tracing::debug;

use crate::gateway::{BarrierGateway, GatewayError, SensorGateway};
use crate::state::{BarrierState, SensorReading};

/// Sensor poll request byte.
pub const POLL_REQUEST: u8 = b'S';
/// Barrier open command byte.
pub const CMD_OPEN: u8 = b'O';
/// Barrier close command byte.
pub const CMD_CLOSE: u8 = b'C';

/// Read timeout in deciseconds (VTIME): 1 s.
const READ_TIMEOUT_DS: u8 = 10;

/// Open the interface board and split it into its two gateway halves.
///
/// Configures the line raw 8N1 at 115200 baud with a 1 s read timeout and
/// flushes any stale bytes left from a previous session.
pub fn open(path: &Path) -> Result<(SerialSensors, SerialBarrier), GatewayError> {
    let port = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| GatewayError::Open {
            path: path.display().to_string(),
            source,
        })?;

    let mut tio = termios::tcgetattr(&port).map_err(GatewayError::Setup)?;
    termios::cfmakeraw(&mut tio);
    termios::cfsetspeed(&mut tio, BaudRate::B115200).map_err(GatewayError::Setup)?;
    tio.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
    tio.control_chars[SpecialCharacterIndices::VTIME as usize] = READ_TIMEOUT_DS;
    termios::tcsetattr(&port, SetArg::TCSANOW, &tio).map_err(GatewayError::Setup)?;
    termios::tcflush(&port, FlushArg::TCIOFLUSH).map_err(GatewayError::Setup)?;

    let barrier_port = port.try_clone()?;
    debug!("serial interface board opened at {}", path.display());

    Ok((
        SerialSensors { port },
        SerialBarrier { port: barrier_port },
    ))
}

/// Decode a board status byte into a semantic sensor reading.
///
/// Bits 0..=2 carry the raw left/center/right levels (0 = present).
#[inline]
pub const fn decode_status(byte: u8) -> SensorReading {
    SensorReading::from_raw_levels(byte & 0x01, (byte >> 1) & 0x01, (byte >> 2) & 0x01)
}

/// Command byte for a barrier state.
#[inline]
pub const fn command_byte(state: BarrierState) -> u8 {
    match state {
        BarrierState::Open => CMD_OPEN,
        BarrierState::Closed => CMD_CLOSE,
    }
}

/// Sensor half of the serial interface board.
#[derive(Debug)]
pub struct SerialSensors {
    port: File,
}

impl SensorGateway for SerialSensors {
    fn read_sensors(&mut self) -> Result<SensorReading, GatewayError> {
        self.port.write_all(&[POLL_REQUEST])?;

        let mut status = [0u8; 1];
        let n = self.port.read(&mut status)?;
        if n == 0 {
            return Err(GatewayError::Protocol(
                "no response from interface board".to_string(),
            ));
        }
        Ok(decode_status(status[0]))
    }
}

/// Actuator half of the serial interface board.
#[derive(Debug)]
pub struct SerialBarrier {
    port: File,
}

impl BarrierGateway for SerialBarrier {
    fn write_barrier(&mut self, state: BarrierState) -> Result<(), GatewayError> {
        self.port.write_all(&[command_byte(state)])?;
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
