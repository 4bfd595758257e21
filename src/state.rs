//! Core data model: train position, barrier command, sensor readings.
//!
//! All enums use `#[repr(u8)]` so the raw codes can travel over the serial
//! diagnostic channel unchanged. Decoding an out-of-domain code recovers to
//! the fail-safe default (`Init`, barrier open) instead of erroring.

use serde::{Deserialize, Serialize};

// ─── Train Position ─────────────────────────────────────────────────

/// Train position relative to the crossing.
///
/// Exactly one value is live at any time, owned by the control loop and
/// rewritten once per cycle. Transitions form the single deterministic cycle
/// `Init → Entering → Middle → Opening → Exiting → Init`; no other edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TrainState {
    /// No train near the crossing.
    Init = 0,
    /// Approach sensor tripped — barrier closing.
    Entering = 1,
    /// Train occupies the center zone.
    Middle = 2,
    /// Center zone cleared — barrier opening.
    Opening = 3,
    /// Train passing the far approach sensor on its way out.
    Exiting = 4,
}

impl TrainState {
    /// All states, in cycle order.
    pub const ALL: [Self; 5] = [
        Self::Init,
        Self::Entering,
        Self::Middle,
        Self::Opening,
        Self::Exiting,
    ];

    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Init),
            1 => Some(Self::Entering),
            2 => Some(Self::Middle),
            3 => Some(Self::Opening),
            4 => Some(Self::Exiting),
            _ => None,
        }
    }

    /// Convert from raw `u8`, recovering out-of-domain codes to `Init`.
    ///
    /// `Init` commands an open barrier, the safe default when the state
    /// code is unknown.
    #[inline]
    pub const fn from_u8_failsafe(value: u8) -> Self {
        match Self::from_u8(value) {
            Some(state) => state,
            None => Self::Init,
        }
    }

    /// Raw wire code.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl Default for TrainState {
    fn default() -> Self {
        Self::Init
    }
}

impl std::fmt::Display for TrainState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Init => "INIT",
            Self::Entering => "ENTERING",
            Self::Middle => "MIDDLE",
            Self::Opening => "OPENING",
            Self::Exiting => "EXITING",
        };
        f.write_str(name)
    }
}

// ─── Barrier Command ────────────────────────────────────────────────

/// Barrier actuator command.
///
/// Derived every cycle from [`TrainState`] by the output mapper; carries no
/// memory of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BarrierState {
    /// Road traffic may pass.
    Open = 0,
    /// Crossing blocked for the train.
    Closed = 1,
}

impl BarrierState {
    /// Raw wire code.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl Default for BarrierState {
    fn default() -> Self {
        Self::Open
    }
}

impl std::fmt::Display for BarrierState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        })
    }
}

// ─── Sensor Reading ─────────────────────────────────────────────────

/// One sample of the three track presence detectors, semantic polarity
/// (`true` = train detected).
///
/// The electrical encoding is inverted (level 0 = present, 1 = absent);
/// the translation happens at the gateway boundary via
/// [`SensorReading::from_raw_levels`], never inside the decision core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Left approach detector.
    pub left_present: bool,
    /// Center track detector.
    pub center_present: bool,
    /// Right approach detector.
    pub right_present: bool,
}

impl SensorReading {
    /// No train detected anywhere — the fail-open substitute when a sensor
    /// read fails.
    pub const NONE: Self = Self {
        left_present: false,
        center_present: false,
        right_present: false,
    };

    /// Translate raw electrical levels (0 = present) into a semantic reading.
    #[inline]
    pub const fn from_raw_levels(left: u8, center: u8, right: u8) -> Self {
        Self {
            left_present: left == 0,
            center_present: center == 0,
            right_present: right == 0,
        }
    }

    /// True when either approach detector sees a train.
    #[inline]
    pub const fn any_approach(self) -> bool {
        self.left_present || self.right_present
    }
}

impl Default for SensorReading {
    fn default() -> Self {
        Self::NONE
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_state_u8_round_trip() {
        for state in TrainState::ALL {
            assert_eq!(TrainState::from_u8(state.as_u8()), Some(state));
        }
    }

    #[test]
    fn train_state_rejects_out_of_domain() {
        for raw in 5..=u8::MAX {
            assert_eq!(TrainState::from_u8(raw), None);
        }
    }

    #[test]
    fn failsafe_decode_recovers_to_init() {
        for raw in 5..=u8::MAX {
            assert_eq!(TrainState::from_u8_failsafe(raw), TrainState::Init);
        }
        assert_eq!(TrainState::from_u8_failsafe(2), TrainState::Middle);
    }

    #[test]
    fn defaults_are_fail_open() {
        assert_eq!(TrainState::default(), TrainState::Init);
        assert_eq!(BarrierState::default(), BarrierState::Open);
        assert_eq!(SensorReading::default(), SensorReading::NONE);
    }

    #[test]
    fn raw_level_polarity_is_inverted() {
        // Electrical 0 means present.
        let reading = SensorReading::from_raw_levels(0, 1, 0);
        assert!(reading.left_present);
        assert!(!reading.center_present);
        assert!(reading.right_present);
        assert!(reading.any_approach());

        let idle = SensorReading::from_raw_levels(1, 1, 1);
        assert_eq!(idle, SensorReading::NONE);
        assert!(!idle.any_approach());
    }
}
