//! Motion control for the quadruped: joint model, gait tables and the
//! interpolating gait sequencer.
//!
//! See [`motion`] for the architecture.

#![cfg_attr(not(test), no_std)]

pub mod motion;

#[cfg(test)]
mod testing;
