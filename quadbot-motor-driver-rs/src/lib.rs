//! Async driver for the robot's two DRV8830 wheel motor drivers.
//!
//! Each wheel has its own DRV8830 at a fixed I2C address. A motor is
//! commanded with a signed voltage percentage: the sign picks the H-bridge
//! direction and the magnitude is rescaled into the chip's 6-bit VSET code.
//!
//! # Architecture
//!
//! - **`driver`** (crate-private) — Single-register reads and writes at a
//!   given chip address.
//! - **[`DualMotorDriver`]** (public) — Channel addressing, voltage
//!   encoding, braking and FAULT register access.
//!
//! # Quick start
//!
//! ```ignore
//! use motor_driver::{DualMotorDriver, MotorChannel};
//!
//! let mut motors = DualMotorDriver::new(i2c);
//!
//! // Right wheel half speed forward, left wheel full reverse
//! motors.drive_motor(MotorChannel::Right, 50).await?;
//! motors.drive_motor(MotorChannel::Left, -100).await?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations and log ignored
//!   channel indices.

#![cfg_attr(not(test), no_std)]

pub use error::MotorError;
pub use motor_board::{control_byte, scale_voltage, Direction, DualMotorDriver, Fault, MotorChannel};
pub use registers::{ADDRESS_LEFT, ADDRESS_RIGHT, VOLTAGE_MAX, VSET_MAX};

mod driver;
mod error;
mod motor_board;
mod registers;

#[cfg(test)]
mod testing;
