//! Error types for the motor driver.

use core::fmt;

/// Errors that can occur when communicating with the motor drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError<E> {
    /// Underlying I2C bus error.
    I2c(E),
}

impl<E> From<E> for MotorError<E> {
    fn from(error: E) -> Self {
        MotorError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for MotorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MotorError::I2c(e) => write!(f, "I2C error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for MotorError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            MotorError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
        }
    }
}
