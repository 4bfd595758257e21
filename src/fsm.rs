//! Transition engine: (current state, sensor sample) → next state.
//!
//! Pure and total. Implements the transition table:
//!
//! | Current  | Guard                     | Next     |
//! |----------|---------------------------|----------|
//! | Init     | left ∨ right present      | Entering |
//! | Entering | center present            | Middle   |
//! | Middle   | center absent             | Opening  |
//! | Opening  | left ∨ right present      | Exiting  |
//! | Exiting  | left ∧ right absent       | Init     |
//! | any      | guard unmet               | identity |
//!
//! At most one transition per evaluation — transitions are never chained
//! within a single sensor sample. Assumes sensors are sampled fast enough
//! that no transition is missed; the engine has no timer of its own.

use crate::state::{SensorReading, TrainState};

/// Compute the next train state from the current state and one sensor sample.
#[inline]
pub const fn next_state(current: TrainState, sensors: SensorReading) -> TrainState {
    use TrainState::*;

    match current {
        Init if sensors.any_approach() => Entering,
        Entering if sensors.center_present => Middle,
        Middle if !sensors.center_present => Opening,
        Opening if sensors.any_approach() => Exiting,
        Exiting if !sensors.left_present && !sensors.right_present => Init,
        unchanged => unchanged,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
