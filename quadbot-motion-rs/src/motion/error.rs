//! Error types for motion operations.

use core::fmt;

use pwm_driver::PwmError;

/// Errors that can occur while moving the robot.
///
/// Out-of-range angles, strides and durations are clamped and unknown
/// joint or LED indices are ignored, so the bus is the only failure path.
/// A failed write aborts the rest of the gait; nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionError<E> {
    /// The PWM controller could not be written.
    Pwm(PwmError<E>),
}

impl<E> From<PwmError<E>> for MotionError<E> {
    fn from(error: PwmError<E>) -> Self {
        MotionError::Pwm(error)
    }
}

impl<E: fmt::Debug> fmt::Display for MotionError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MotionError::Pwm(e) => write!(f, "PWM controller error: {}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for MotionError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            MotionError::Pwm(e) => defmt::write!(f, "PWM controller error: {}", e),
        }
    }
}
