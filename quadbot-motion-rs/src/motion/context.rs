//! The motion context: bring-up, joint commands and the gait sequencer.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use pwm_driver::PwmController;

use super::error::MotionError;
use super::gait::{resolve_stride, Gait, Phase};
use super::joint::{pulse_ticks, JointId, JointState};
use super::led::{led_ticks, LedColor};
use super::{
    DEGREE_MAX, DEGREE_MIN, DURATION_MAX_S, JOINT_COUNT, REPEAT_MAX, STEPS_PER_SECOND, STEP_MS,
    STRIDE_LIMIT, WAIST_BASELINE_DEFAULT,
};

/// Resolve a requested duration: zero, negative or NaN selects `default`,
/// anything else is capped at 5 s.
fn resolve_seconds(seconds: f32, default: f32) -> f32 {
    if seconds.is_nan() || seconds <= 0.0 {
        default
    } else {
        seconds.min(DURATION_MAX_S)
    }
}

/// Interpolation steps per phase, truncated toward zero.
fn step_count(seconds: f32, divisor: u32) -> i32 {
    (seconds * STEPS_PER_SECOND as f32 / divisor as f32) as i32
}

/// Owned motion state of the robot.
///
/// Holds the PWM controller, the delay used for actuation ticks, the last
/// commanded joint angles and the waist baseline. A context only exists
/// once the PWM controller has been brought up by [`connect()`](Self::connect).
///
/// # Example
///
/// ```ignore
/// use quadbot::motion::{Gait, MotionContext};
/// use pwm_driver::DEFAULT_ADDRESS;
///
/// let mut robot = MotionContext::connect(i2c, DEFAULT_ADDRESS, embassy_time::Delay).await?;
///
/// robot.stand_up(0.0).await?;          // 1 s default
/// robot.walk_forward(0, 0.0).await?;   // 30° stride, 2 s
/// robot.repeat(Gait::WalkLeft, 3).await?;
/// robot.sit_down(2.5).await?;
/// ```
pub struct MotionContext<I2C, D> {
    pwm: PwmController<I2C>,
    delay: D,
    joints: JointState,
    waist_baseline: i32,
}

impl<I2C, D> MotionContext<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    // ── Bring-up ─────────────────────────────────────────────────────

    /// Bring up the PWM controller and return a ready context.
    ///
    /// Resets the PCA9685, programs 50 Hz and zeroes every channel. Joint
    /// state starts at 0° and the waist baseline at 15°.
    ///
    /// # Errors
    /// * [`MotionError::Pwm`] if the controller cannot be written
    pub async fn connect(
        i2c: I2C,
        address: u8,
        mut delay: D,
    ) -> Result<Self, MotionError<I2C::Error>> {
        let mut pwm = PwmController::new(i2c, address);
        pwm.initialize(&mut delay).await?;

        #[cfg(feature = "defmt")]
        defmt::info!("motion context ready (PCA9685 at {=u8:#x})", address);

        Ok(Self {
            pwm,
            delay,
            joints: JointState::new(),
            waist_baseline: WAIST_BASELINE_DEFAULT,
        })
    }

    /// Give back the I2C peripheral and the delay.
    pub fn release(self) -> (I2C, D) {
        (self.pwm.release(), self.delay)
    }

    // ── State ────────────────────────────────────────────────────────

    /// Last commanded joint angles.
    pub fn joints(&self) -> &JointState {
        &self.joints
    }

    pub fn waist_baseline(&self) -> i32 {
        self.waist_baseline
    }

    /// Set the waist home offset used by walking gaits, clamped to ±60°.
    ///
    /// Does not move any joint.
    pub fn set_waist_baseline(&mut self, degree: i32) {
        self.waist_baseline = degree.clamp(-STRIDE_LIMIT, STRIDE_LIMIT);
    }

    // ── Joint and LED commands ───────────────────────────────────────

    /// Command one joint to an angle.
    ///
    /// The angle is clamped to ±90°, converted to a pulse width (mirrored
    /// on the left legs) and written to the joint's PWM channel. The
    /// clamped angle becomes the joint's stored state.
    ///
    /// # Errors
    /// * [`MotionError::Pwm`] on communication failure; the stored angle
    ///   is left unchanged
    pub async fn set_servo_angle(
        &mut self,
        joint: JointId,
        degree: i32,
    ) -> Result<(), MotionError<I2C::Error>> {
        let degree = degree.clamp(DEGREE_MIN, DEGREE_MAX);
        let ticks = pulse_ticks(joint, degree);

        self.pwm.set_channel(joint.channel(), 0, ticks).await?;
        self.joints.set(joint, degree);

        Ok(())
    }

    /// Command a joint by index (0 waist, 1 front right, 2 front left,
    /// 3 rear right, 4 rear left). Other indices are ignored.
    pub async fn set_servo_angle_index(
        &mut self,
        index: u8,
        degree: i32,
    ) -> Result<(), MotionError<I2C::Error>> {
        match JointId::from_index(index) {
            Some(joint) => self.set_servo_angle(joint, degree).await,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("set_servo_angle_index: joint {} out of range, ignored", index);
                Ok(())
            }
        }
    }

    /// Drive one LED output at `percent` (clamped to 0–100).
    pub async fn set_led(
        &mut self,
        color: LedColor,
        percent: i32,
    ) -> Result<(), MotionError<I2C::Error>> {
        self.pwm
            .set_channel(color.channel(), 0, led_ticks(percent))
            .await?;
        Ok(())
    }

    /// Drive an LED by channel index (0 red, 1 green, 2 blue). Other
    /// indices are ignored.
    pub async fn set_led_channel(
        &mut self,
        channel: u8,
        percent: i32,
    ) -> Result<(), MotionError<I2C::Error>> {
        match LedColor::from_index(channel) {
            Some(color) => self.set_led(color, percent).await,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("set_led_channel: channel {} out of range, ignored", channel);
                Ok(())
            }
        }
    }

    // ── Gait sequencer ───────────────────────────────────────────────

    /// Run a posture or gait.
    ///
    /// # Arguments
    /// * `gait` — which choreography to run
    /// * `stride` — stride in degrees for walking gaits (0 = 30°, clamped
    ///   to ±60°); ignored by postures
    /// * `seconds` — duration of each phase (0 = the gait's default,
    ///   capped at 5 s)
    ///
    /// Runs to completion. Every joint named by the last phase that moves
    /// it ends exactly on its target.
    pub async fn perform(
        &mut self,
        gait: Gait,
        stride: i32,
        seconds: f32,
    ) -> Result<(), MotionError<I2C::Error>> {
        let choreography = gait.choreography();
        let seconds = resolve_seconds(seconds, choreography.default_seconds);
        let stride = resolve_stride(stride);
        let steps = step_count(seconds, choreography.divisor);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{}: stride={} seconds={} steps={} waist={}",
            gait,
            stride,
            seconds,
            steps,
            self.waist_baseline
        );

        for phase in choreography.phases {
            self.run_phase(phase, stride, steps).await?;
        }

        Ok(())
    }

    /// Run a gait `times` times (clamped to 1–10) with its defaults.
    pub async fn repeat(&mut self, gait: Gait, times: u32) -> Result<(), MotionError<I2C::Error>> {
        for _ in 0..times.clamp(1, REPEAT_MAX) {
            self.perform(gait, 0, 0.0).await?;
        }
        Ok(())
    }

    /// Interpolate one phase from the current joint state to its targets.
    ///
    /// The per-step delta is `(target - start) / steps`, fixed for the
    /// whole phase. After `steps` increments every joint is snapped to its
    /// exact target to absorb the truncation error.
    async fn run_phase(
        &mut self,
        phase: &Phase,
        stride: i32,
        steps: i32,
    ) -> Result<(), MotionError<I2C::Error>> {
        let waist = self.waist_baseline;
        let mut deltas = [0i32; JOINT_COUNT];

        if steps > 0 {
            for (delta, &(joint, target)) in deltas.iter_mut().zip(phase.moves) {
                *delta = (target.resolve(stride, waist) - self.joints.get(joint)) / steps;
            }
        }

        for _ in 0..steps {
            for (&delta, &(joint, _)) in deltas.iter().zip(phase.moves) {
                let next = self.joints.get(joint) + delta;
                self.actuate(joint, next).await?;
            }
        }

        for &(joint, target) in phase.moves {
            self.actuate(joint, target.resolve(stride, waist)).await?;
        }

        Ok(())
    }

    /// One gait joint command followed by its actuation tick.
    async fn actuate(&mut self, joint: JointId, degree: i32) -> Result<(), MotionError<I2C::Error>> {
        self.set_servo_angle(joint, degree).await?;
        self.delay.delay_ms(STEP_MS).await;
        Ok(())
    }

    // ── Named postures and gaits ─────────────────────────────────────

    pub async fn stand_up(&mut self, seconds: f32) -> Result<(), MotionError<I2C::Error>> {
        self.perform(Gait::StandUp, 0, seconds).await
    }

    pub async fn sit_down(&mut self, seconds: f32) -> Result<(), MotionError<I2C::Error>> {
        self.perform(Gait::SitDown, 0, seconds).await
    }

    pub async fn greet(&mut self, seconds: f32) -> Result<(), MotionError<I2C::Error>> {
        self.perform(Gait::Greet, 0, seconds).await
    }

    pub async fn walk_forward(
        &mut self,
        stride: i32,
        seconds: f32,
    ) -> Result<(), MotionError<I2C::Error>> {
        self.perform(Gait::WalkForward, stride, seconds).await
    }

    pub async fn walk_reverse(
        &mut self,
        stride: i32,
        seconds: f32,
    ) -> Result<(), MotionError<I2C::Error>> {
        self.perform(Gait::WalkReverse, stride, seconds).await
    }

    pub async fn walk_right(
        &mut self,
        stride: i32,
        seconds: f32,
    ) -> Result<(), MotionError<I2C::Error>> {
        self.perform(Gait::WalkRight, stride, seconds).await
    }

    pub async fn walk_left(
        &mut self,
        stride: i32,
        seconds: f32,
    ) -> Result<(), MotionError<I2C::Error>> {
        self.perform(Gait::WalkLeft, stride, seconds).await
    }

    pub async fn walk_forward_repeat(&mut self, times: u32) -> Result<(), MotionError<I2C::Error>> {
        self.repeat(Gait::WalkForward, times).await
    }

    pub async fn walk_reverse_repeat(&mut self, times: u32) -> Result<(), MotionError<I2C::Error>> {
        self.repeat(Gait::WalkReverse, times).await
    }

    pub async fn walk_right_repeat(&mut self, times: u32) -> Result<(), MotionError<I2C::Error>> {
        self.repeat(Gait::WalkRight, times).await
    }

    pub async fn walk_left_repeat(&mut self, times: u32) -> Result<(), MotionError<I2C::Error>> {
        self.repeat(Gait::WalkLeft, times).await
    }
}
