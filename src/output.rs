//! Output mapper: train state → barrier command.
//!
//! A static lookup, not a stateful device: the barrier is `Closed` iff the
//! train is between the approach sensor and the end of the center zone
//! (`Entering` or `Middle`), `Open` everywhere else.

use crate::state::{BarrierState, TrainState};

/// Barrier command for a given train state.
#[inline]
pub const fn barrier_for(state: TrainState) -> BarrierState {
    match state {
        TrainState::Entering | TrainState::Middle => BarrierState::Closed,
        TrainState::Init | TrainState::Opening | TrainState::Exiting => BarrierState::Open,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_iff_entering_or_middle() {
        for state in TrainState::ALL {
            let expected = matches!(state, TrainState::Entering | TrainState::Middle);
            assert_eq!(
                barrier_for(state) == BarrierState::Closed,
                expected,
                "wrong barrier command for {state:?}"
            );
        }
    }

    #[test]
    fn failsafe_state_commands_open() {
        // Unknown wire codes recover to Init, which maps to an open barrier.
        let state = TrainState::from_u8_failsafe(200);
        assert_eq!(barrier_for(state), BarrierState::Open);
    }
}
