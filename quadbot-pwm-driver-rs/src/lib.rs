//! Async driver for the PCA9685 16-channel, 12-bit PWM controller.
//!
//! The quadruped uses one PCA9685 at 50 Hz to drive its five joint servos
//! (channels 3–7) and the RGB LED outputs (channels 0–2).
//!
//! # Architecture
//!
//! The crate is split into two layers:
//!
//! - **`driver`** (crate-private) — Raw register access: single-byte
//!   writes, MODE1 read-back and 4-byte auto-increment block writes.
//! - **[`PwmController`]** (public) — Bring-up, oscillator prescale
//!   programming and per-channel duty-cycle writes.
//!
//! # Quick start
//!
//! ```ignore
//! use pwm_driver::{PwmController, DEFAULT_ADDRESS};
//!
//! // Construct with any `embedded-hal-async` I2C implementation
//! let mut pwm = PwmController::new(i2c, DEFAULT_ADDRESS);
//!
//! // Reset, program 50 Hz and zero every channel
//! pwm.initialize(&mut delay).await?;
//!
//! // 1.5 ms pulse on channel 3
//! pwm.set_channel(3, 0, 307).await?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on error types
//!   and log ignored channel writes.

#![cfg_attr(not(test), no_std)]

pub use error::PwmError;
pub use pwm_controller::{prescale_for, PwmController};
pub use registers::{
    CHANNEL_COUNT, DEFAULT_ADDRESS, OSCILLATOR_HZ, PWM_FREQUENCY_HZ, PWM_PERIOD_US, TICKS_PER_PERIOD,
    TICK_MAX,
};

mod driver;
mod error;
mod pwm_controller;
mod registers;

#[cfg(test)]
mod testing;
