//! Error types for the PWM driver.

use core::fmt;

/// Errors that can occur when communicating with the PWM controller.
///
/// Out-of-range channels and tick values are not errors: channels are
/// ignored and ticks are clamped. The only failure is the bus itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError<E> {
    /// Underlying I2C bus error.
    I2c(E),
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for PwmError<E> {
    fn from(error: E) -> Self {
        PwmError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for PwmError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PwmError::I2c(e) => write!(f, "I2C error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for PwmError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            PwmError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
        }
    }
}
