//! Change reporter: emits one status line per state transition.
//!
//! Pure comparison of previous vs. current state. A single exhaustive match
//! on the *entered* state guarantees exactly one message class per
//! transition; entering `Init` is a quiet reset of the cycle and produces
//! nothing.

use crate::state::TrainState;

/// Human-readable notice for an entered state.
///
/// Exact strings are a presentation detail; the invariant is one message
/// class per distinct entered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLine {
    /// Approach sensor tripped; barrier closing.
    TrainEntering,
    /// Train occupies the center zone.
    TrainInMiddleZone,
    /// Center zone cleared; barrier opening.
    BarrierOpening,
    /// Train leaving past the far approach sensor; ends the cycle.
    TrainExiting,
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::TrainEntering => "train entering, closing barrier",
            Self::TrainInMiddleZone => "train in middle zone",
            Self::BarrierOpening => "opening barrier",
            Self::TrainExiting => "train exiting, crossing cycle complete",
        })
    }
}

/// Status line for a state change, `None` when the state is unchanged or
/// the crossing quietly resets to `Init`.
#[inline]
pub const fn report(previous: TrainState, current: TrainState) -> Option<StatusLine> {
    if (previous as u8) == (current as u8) {
        return None;
    }
    match current {
        TrainState::Init => None,
        TrainState::Entering => Some(StatusLine::TrainEntering),
        TrainState::Middle => Some(StatusLine::TrainInMiddleZone),
        TrainState::Opening => Some(StatusLine::BarrierOpening),
        TrainState::Exiting => Some(StatusLine::TrainExiting),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use TrainState::*;

    #[test]
    fn unchanged_state_is_silent() {
        for state in TrainState::ALL {
            assert_eq!(report(state, state), None, "report({state:?}, {state:?})");
        }
    }

    #[test]
    fn each_entered_state_has_exactly_one_message() {
        assert_eq!(report(Init, Entering), Some(StatusLine::TrainEntering));
        assert_eq!(report(Entering, Middle), Some(StatusLine::TrainInMiddleZone));
        assert_eq!(report(Middle, Opening), Some(StatusLine::BarrierOpening));
        assert_eq!(report(Opening, Exiting), Some(StatusLine::TrainExiting));
    }

    #[test]
    fn reset_to_init_is_quiet() {
        assert_eq!(report(Exiting, Init), None);
    }

    #[test]
    fn message_depends_only_on_entered_state() {
        // The entered state alone selects the message; no later check may
        // fire for the same change.
        for previous in TrainState::ALL {
            for current in TrainState::ALL {
                if previous == current {
                    continue;
                }
                let expected = match current {
                    Init => None,
                    Entering => Some(StatusLine::TrainEntering),
                    Middle => Some(StatusLine::TrainInMiddleZone),
                    Opening => Some(StatusLine::BarrierOpening),
                    Exiting => Some(StatusLine::TrainExiting),
                };
                assert_eq!(report(previous, current), expected);
            }
        }
    }

    #[test]
    fn status_lines_render() {
        assert!(StatusLine::TrainEntering.to_string().contains("entering"));
        assert!(StatusLine::BarrierOpening.to_string().contains("opening"));
    }
}
