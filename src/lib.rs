//! # Crossing Control
//!
//! Level-crossing barrier controller. Three binary presence sensors (left
//! approach, center track, right approach) drive a deterministic five-state
//! train-position machine; the barrier command is a pure projection of that
//! state. The decision core is hardware-free — sensors and the barrier
//! actuator sit behind narrow gateway traits with a serial interface-board
//! implementation and a scripted simulation implementation.
//!
//! ## Control Cycle
//!
//! `poll sensors → transition → map output → command actuator → report change`
//!
//! One state transition at most per cycle; transitions form the single cycle
//! `Init → Entering → Middle → Opening → Exiting → Init`.
//!
//! ## Safety Posture
//!
//! Fail-open: every unexpected condition (unknown state code, sensor read
//! failure) degrades toward an open barrier, never toward one stuck closed.

pub mod cycle;
pub mod fsm;
pub mod gateway;
pub mod output;
pub mod report;
pub mod state;
