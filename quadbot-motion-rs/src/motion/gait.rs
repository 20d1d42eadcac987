//! Posture and gait choreographies as data.
//!
//! Each [`Gait`] maps to a static [`Choreography`]: a step divisor, a
//! default duration and an ordered list of [`Phase`]s. A phase names the
//! joints it moves and where each one ends up; the targets may depend on
//! the caller's stride and on the waist baseline.
//!
//! Moves inside a phase are listed in [`JointId::ALL`] order, which is
//! also the order the sequencer actuates them.

use super::joint::JointId;
use super::{STRIDE_DEFAULT, STRIDE_LIMIT};

/// Where a joint ends up at the end of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    /// A fixed angle in degrees.
    Fixed(i32),
    /// `+stride`.
    Stride,
    /// `-stride`.
    NegStride,
    /// `+waist_baseline`.
    Waist,
    /// `-waist_baseline`.
    NegWaist,
}

impl Target {
    /// Resolve to degrees for a given stride and waist baseline.
    pub fn resolve(self, stride: i32, waist: i32) -> i32 {
        match self {
            Target::Fixed(degree) => degree,
            Target::Stride => stride,
            Target::NegStride => -stride,
            Target::Waist => waist,
            Target::NegWaist => -waist,
        }
    }
}

/// One linear interpolation leg of a choreography.
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    pub moves: &'static [(JointId, Target)],
}

/// A complete posture or gait.
#[derive(Debug, Clone, Copy)]
pub struct Choreography {
    /// Steps per phase are `seconds * 50 / divisor`.
    pub divisor: u32,
    /// Duration used when the caller passes 0.
    pub default_seconds: f32,
    pub phases: &'static [Phase],
}

/// Every posture and gait the robot knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gait {
    /// All joints to 0°.
    StandUp,
    /// Crouch, then fold into a sitting stance.
    SitDown,
    /// Front legs up, rear legs back.
    Greet,
    WalkForward,
    WalkReverse,
    WalkRight,
    WalkLeft,
}

impl Gait {
    pub const ALL: [Gait; 7] = [
        Gait::StandUp,
        Gait::SitDown,
        Gait::Greet,
        Gait::WalkForward,
        Gait::WalkReverse,
        Gait::WalkRight,
        Gait::WalkLeft,
    ];

    pub fn choreography(self) -> &'static Choreography {
        match self {
            Gait::StandUp => &STAND_UP,
            Gait::SitDown => &SIT_DOWN,
            Gait::Greet => &GREET,
            Gait::WalkForward => &WALK_FORWARD,
            Gait::WalkReverse => &WALK_REVERSE,
            Gait::WalkRight => &WALK_RIGHT,
            Gait::WalkLeft => &WALK_LEFT,
        }
    }

    /// Walking gaits take a stride; postures ignore it.
    pub fn is_walk(self) -> bool {
        matches!(
            self,
            Gait::WalkForward | Gait::WalkReverse | Gait::WalkRight | Gait::WalkLeft
        )
    }
}

/// Stride for a walking gait: 0 selects the default, anything else is
/// clamped to ±60°.
pub fn resolve_stride(stride: i32) -> i32 {
    if stride == 0 {
        STRIDE_DEFAULT
    } else {
        stride.clamp(-STRIDE_LIMIT, STRIDE_LIMIT)
    }
}

use super::joint::JointId::{
    FrontLeft as FL, FrontRight as FR, RearLeft as RL, RearRight as RR, Waist as W,
};
use self::Target::{Fixed, NegStride, NegWaist, Stride};

const POSTURE_SECONDS: f32 = 1.0;
const WALK_SECONDS: f32 = 2.0;

static STAND_UP: Choreography = Choreography {
    divisor: 5,
    default_seconds: POSTURE_SECONDS,
    phases: &[Phase {
        moves: &[(W, Fixed(0)), (FR, Fixed(0)), (FL, Fixed(0)), (RR, Fixed(0)), (RL, Fixed(0))],
    }],
};

static SIT_DOWN: Choreography = Choreography {
    divisor: 9,
    default_seconds: POSTURE_SECONDS,
    phases: &[
        // crouch
        Phase {
            moves: &[(W, Fixed(0)), (FR, Fixed(30)), (FL, Fixed(30)), (RR, Fixed(0)), (RL, Fixed(30))],
        },
        // sit, waist stays
        Phase {
            moves: &[(FR, Fixed(-30)), (FL, Fixed(-30)), (RR, Fixed(30)), (RL, Fixed(30))],
        },
    ],
};

static GREET: Choreography = Choreography {
    divisor: 5,
    default_seconds: POSTURE_SECONDS,
    phases: &[Phase {
        moves: &[(W, Fixed(0)), (FR, Fixed(90)), (FL, Fixed(90)), (RR, Fixed(-90)), (RL, Fixed(-90))],
    }],
};

// Diagonal trot. Left-side targets carry the opposite sign of their
// right-side partner (mirror convention).
static WALK_FORWARD: Choreography = Choreography {
    divisor: 11,
    default_seconds: WALK_SECONDS,
    phases: &[
        Phase {
            moves: &[(W, NegWaist), (FR, NegStride), (FL, Stride), (RR, Stride), (RL, Stride)],
        },
        Phase {
            moves: &[(W, Target::Waist), (RR, NegStride)],
        },
        Phase {
            moves: &[(FR, Stride), (FL, NegStride), (RR, Stride)],
        },
        Phase {
            moves: &[(W, NegWaist), (RL, NegStride)],
        },
    ],
};

static WALK_REVERSE: Choreography = Choreography {
    divisor: 11,
    default_seconds: WALK_SECONDS,
    phases: &[
        Phase {
            moves: &[(W, NegWaist), (FR, NegStride), (FL, Stride), (RR, NegStride), (RL, Stride)],
        },
        Phase {
            moves: &[(W, Target::Waist), (RL, NegStride)],
        },
        Phase {
            moves: &[(FR, Stride), (FL, NegStride), (RR, Stride)],
        },
        Phase {
            moves: &[(W, NegWaist), (RR, NegStride)],
        },
    ],
};

// Lateral shuffle: shift the waist, then move one side's leg pair.
static WALK_RIGHT: Choreography = Choreography {
    divisor: 10,
    default_seconds: WALK_SECONDS,
    phases: &[
        Phase {
            moves: &[(W, Target::Waist), (FL, Stride), (RL, Fixed(0))],
        },
        Phase {
            moves: &[(W, NegWaist), (FR, NegStride), (RR, NegStride)],
        },
        Phase {
            moves: &[(FL, NegStride), (RL, NegStride)],
        },
        Phase {
            moves: &[(W, Target::Waist), (FR, Stride), (RR, Fixed(0))],
        },
    ],
};

static WALK_LEFT: Choreography = Choreography {
    divisor: 10,
    default_seconds: WALK_SECONDS,
    phases: &[
        Phase {
            moves: &[(W, NegWaist), (FR, Stride), (RR, Fixed(0))],
        },
        Phase {
            moves: &[(W, Target::Waist), (FL, NegStride), (RL, NegStride)],
        },
        Phase {
            moves: &[(FR, NegStride), (RR, NegStride)],
        },
        Phase {
            moves: &[(W, NegWaist), (FL, Stride), (RL, Fixed(0))],
        },
    ],
};
