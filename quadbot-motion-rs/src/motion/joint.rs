use super::{
    DEGREE_MAX, DEGREE_MIN, JOINT_CHANNEL_BASE, JOINT_COUNT, PULSE_MAX_US, PULSE_MIN_US,
    SERVO_RANGE_DEG,
};
use pwm_driver::{PWM_PERIOD_US, TICKS_PER_PERIOD};

/// One of the five servo joints.
///
/// The discriminant is the public joint index; the PWM channel is
/// `index + 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JointId {
    Waist = 0,
    FrontRight = 1,
    FrontLeft = 2,
    RearRight = 3,
    RearLeft = 4,
}

impl JointId {
    /// All joints in enumeration order. Gaits update joints in this order.
    pub const ALL: [JointId; JOINT_COUNT] = [
        JointId::Waist,
        JointId::FrontRight,
        JointId::FrontLeft,
        JointId::RearRight,
        JointId::RearLeft,
    ];

    /// Look up a joint by index. Returns `None` outside `0..=4`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// PCA9685 output channel driving this joint.
    #[inline]
    pub fn channel(self) -> u8 {
        JOINT_CHANNEL_BASE + self as u8
    }

    /// Left-side servos are mounted mirrored: a positive angle turns them
    /// the opposite way on the horn.
    #[inline]
    pub fn is_mirrored(self) -> bool {
        matches!(self, JointId::FrontLeft | JointId::RearLeft)
    }
}

/// Servo pulse width in microseconds for a commanded angle.
///
/// The angle is offset into `0..=180` (`90 + degree`, or `90 - degree` on
/// mirrored joints), clamped, and mapped linearly onto 500–2400 µs.
pub fn pulse_us(joint: JointId, degree: i32) -> i32 {
    let offset = if joint.is_mirrored() {
        90 - degree
    } else {
        90 + degree
    };
    let offset = offset.clamp(0, SERVO_RANGE_DEG);

    offset * (PULSE_MAX_US - PULSE_MIN_US) / SERVO_RANGE_DEG + PULSE_MIN_US
}

/// 12-bit PCA9685 off tick for a commanded angle at 50 Hz.
///
/// ```
/// use quadbot::motion::{pulse_ticks, JointId};
///
/// assert_eq!(pulse_ticks(JointId::Waist, -90), 102);
/// assert_eq!(pulse_ticks(JointId::Waist, 90), 491);
/// assert_eq!(pulse_ticks(JointId::FrontLeft, 90), 102);
/// ```
pub fn pulse_ticks(joint: JointId, degree: i32) -> u16 {
    let ticks = pulse_us(joint, degree) * TICKS_PER_PERIOD as i32 / PWM_PERIOD_US as i32;
    ticks as u16
}

/// Last commanded angle of every joint.
///
/// Holds exactly the value passed to the last angle command (after input
/// clamping), not the tick-rounded servo position. Gait interpolation
/// measures from these values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointState {
    angles: [i32; JOINT_COUNT],
}

impl JointState {
    /// All joints at 0°.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last commanded angle of `joint`.
    #[inline]
    pub fn get(&self, joint: JointId) -> i32 {
        self.angles[joint.index()]
    }

    /// Angles indexed by joint index.
    pub fn as_array(&self) -> [i32; JOINT_COUNT] {
        self.angles
    }

    pub(crate) fn set(&mut self, joint: JointId, degree: i32) {
        self.angles[joint.index()] = degree.clamp(DEGREE_MIN, DEGREE_MAX);
    }
}
