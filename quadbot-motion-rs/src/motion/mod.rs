//! Joint model and gait sequencer for the quadruped.
//!
//! The robot has five PWM servos on one PCA9685: a waist twist joint and
//! four leg joints. This module turns named postures and gaits into timed
//! sequences of joint angle commands.
//!
//! # Architecture
//!
//! ```text
//! caller ──► MotionContext::perform(Gait, stride, seconds)
//!              │  looks up the Choreography table for the gait
//!              │  for each Phase: interpolate from JointState to targets
//!              ▼
//!            MotionContext::set_servo_angle(JointId, degrees)
//!              │  mirror + clamp, degrees → µs → 12-bit ticks
//!              ▼
//!            PwmController::set_channel(joint + 3, 0, ticks)
//! ```
//!
//! - [`JointId`] / [`JointState`] — the five joints, their PWM channels,
//!   the left-side mirror convention and the last commanded angles.
//! - [`Gait`] / [`Choreography`] — every posture and gait as data: a step
//!   divisor, a default duration and a list of phases.
//! - [`MotionContext`] — owns the PWM controller, the delay, the joint
//!   state and the waist baseline, and executes choreographies.
//!
//! # Timing
//!
//! Every joint command issued by a gait is followed by one
//! [`STEP_MS`] tick. Joints in the same step are therefore updated one
//! after another, and a phase touching `k` joints advances `k × 20 ms`
//! per step. A gait with step divisor `X` runs `seconds * 50 / X` steps
//! per phase (truncated).
//!
//! # Exclusive access
//!
//! Every motion operation takes `&mut MotionContext`, so a second gait
//! cannot start while one is still running.

mod context;
mod error;
mod gait;
mod joint;
mod led;

pub use context::MotionContext;
pub use error::MotionError;
pub use gait::{Choreography, Gait, Phase, Target};
pub use joint::{pulse_ticks, pulse_us, JointId, JointState};
pub use led::{led_ticks, LedColor};

/// Number of servo joints.
pub const JOINT_COUNT: usize = 5;

/// PWM channel of [`JointId::Waist`]; the other joints follow in order.
pub const JOINT_CHANNEL_BASE: u8 = 3;

/// Commanded joint angle range, in degrees.
pub const DEGREE_MIN: i32 = -90;
pub const DEGREE_MAX: i32 = 90;

/// Servo pulse width at 0° and 180° of mechanical travel.
pub const PULSE_MIN_US: i32 = 500;
pub const PULSE_MAX_US: i32 = 2400;

/// Mechanical travel of a servo, in degrees.
pub const SERVO_RANGE_DEG: i32 = 180;

/// Actuation tick after every gait joint command.
pub const STEP_MS: u32 = 20;

/// Actuation ticks per second (`1000 / STEP_MS`).
pub const STEPS_PER_SECOND: u32 = 50;

/// Longest accepted gait duration, in seconds.
pub const DURATION_MAX_S: f32 = 5.0;

/// Stride used when a walking gait is called with 0.
pub const STRIDE_DEFAULT: i32 = 30;

/// Stride and waist baseline range, in degrees (symmetric).
pub const STRIDE_LIMIT: i32 = 60;

/// Waist baseline at power-on.
pub const WAIST_BASELINE_DEFAULT: i32 = 15;

/// Upper bound for the repeat count of a gait.
pub const REPEAT_MAX: u32 = 10;
