//! High-level interface for the PCA9685 PWM controller.
//!
//! [`PwmController`] wraps the low-level register driver with the
//! bring-up sequence, oscillator prescale programming and channel
//! duty-cycle writes.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::driver::Pca9685Driver;
use crate::error::PwmError;
use crate::registers::{
    CHANNEL_COUNT, CHANNEL_STRIDE, LED0_ON_L, MODE1, MODE1_RESTART_CLEAR_MASK, MODE1_SLEEP,
    MODE1_WAKE, OSCILLATOR_HZ, PRESCALE, PRESCALE_MAX, PRESCALE_MIN, PRESCALE_SETTLE_US,
    PWM_FREQUENCY_HZ, TICKS_PER_PERIOD, TICK_MAX,
};

/// Compute the PRESCALE register value for an output frequency.
///
/// `prescale = round(25 MHz / 4096 / freq_hz) - 1`, clamped to the range
/// the part accepts. A frequency of 0 selects [`PWM_FREQUENCY_HZ`].
///
/// ```
/// assert_eq!(pwm_driver::prescale_for(50), 121);
/// ```
pub fn prescale_for(freq_hz: u32) -> u8 {
    let freq_hz = if freq_hz == 0 { PWM_FREQUENCY_HZ } else { freq_hz };
    let divisor = TICKS_PER_PERIOD * freq_hz;
    let rounded = (OSCILLATOR_HZ + divisor / 2) / divisor;
    rounded.saturating_sub(1).clamp(PRESCALE_MIN, PRESCALE_MAX) as u8
}

/// High-level interface for the PCA9685 PWM controller.
///
/// # Example
///
/// ```ignore
/// use pwm_driver::{PwmController, DEFAULT_ADDRESS};
///
/// // `i2c` is any `embedded-hal-async` I2C implementation,
/// // `delay` any `embedded-hal-async` delay
/// let mut pwm = PwmController::new(i2c, DEFAULT_ADDRESS);
/// pwm.initialize(&mut delay).await.unwrap();
///
/// // Red LED fully on
/// pwm.set_channel(0, 0, 4095).await.unwrap();
/// ```
pub struct PwmController<I2C> {
    driver: Pca9685Driver<I2C>,
}

impl<I2C> PwmController<I2C>
where
    I2C: I2c,
{
    /// Create a new controller interface. No I2C traffic is generated.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (typically 0x40)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            driver: Pca9685Driver::new(i2c, address),
        }
    }

    /// Give back the I2C peripheral.
    pub fn release(self) -> I2C {
        self.driver.release()
    }

    // -----------------------------------------------------------------------
    // Bring-up
    // -----------------------------------------------------------------------

    /// Reset MODE1, program 50 Hz, then zero every channel.
    ///
    /// Channel 0 is first forced fully off (off tick 4095) before the sweep
    /// over all [`CHANNEL_COUNT`] channels writes `(0, 0)`. Calling this
    /// again is harmless but repeats the whole sequence.
    ///
    /// # Errors
    /// * [`PwmError::I2c`] on communication failure
    pub async fn initialize<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), PwmError<I2C::Error>> {
        self.driver.write_u8(MODE1, 0x00).await?;
        self.set_frequency(PWM_FREQUENCY_HZ, delay).await?;
        self.set_channel(0, 0, TICK_MAX).await?;

        for channel in 0..CHANNEL_COUNT {
            self.set_channel(channel, 0, 0).await?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("PCA9685 initialised at {} Hz", PWM_FREQUENCY_HZ);

        Ok(())
    }

    /// Program the oscillator prescale for `freq_hz`.
    ///
    /// The prescale register only accepts writes while the oscillator is
    /// asleep, so the sequence is fixed:
    /// 1. Read MODE1
    /// 2. Write MODE1 with SLEEP set (RESTART cleared)
    /// 3. Write PRESCALE
    /// 4. Restore the original MODE1
    /// 5. Wait 5 ms for the oscillator to settle
    /// 6. Write MODE1 with RESTART, auto-increment and ALLCALL set
    ///
    /// # Errors
    /// * [`PwmError::I2c`] on communication failure
    pub async fn set_frequency<D: DelayNs>(
        &mut self,
        freq_hz: u32,
        delay: &mut D,
    ) -> Result<(), PwmError<I2C::Error>> {
        let prescale = prescale_for(freq_hz);

        let old_mode = self.driver.read_u8(MODE1).await?;
        let sleep_mode = (old_mode & MODE1_RESTART_CLEAR_MASK) | MODE1_SLEEP;

        self.driver.write_u8(MODE1, sleep_mode).await?;
        self.driver.write_u8(PRESCALE, prescale).await?;
        self.driver.write_u8(MODE1, old_mode).await?;

        delay.delay_us(PRESCALE_SETTLE_US).await;

        self.driver.write_u8(MODE1, old_mode | MODE1_WAKE).await
    }

    // -----------------------------------------------------------------------
    // Channel writes
    // -----------------------------------------------------------------------

    /// Set the on and off tick of one output channel.
    ///
    /// The duty cycle is `(off - on) / 4096`. Both ticks are clamped to
    /// `0..=4095`.
    ///
    /// # Arguments
    /// * `channel` — Output channel (0–15). Any other value is ignored and
    ///   no I2C traffic is generated.
    /// * `on` — Tick at which the output goes high
    /// * `off` — Tick at which the output goes low
    ///
    /// # Errors
    /// * [`PwmError::I2c`] on communication failure
    pub async fn set_channel(
        &mut self,
        channel: u8,
        on: u16,
        off: u16,
    ) -> Result<(), PwmError<I2C::Error>> {
        if channel >= CHANNEL_COUNT {
            #[cfg(feature = "defmt")]
            defmt::warn!("set_channel: channel {} out of range, ignored", channel);
            return Ok(());
        }

        let on = on.min(TICK_MAX).to_le_bytes();
        let off = off.min(TICK_MAX).to_le_bytes();
        let register = LED0_ON_L + CHANNEL_STRIDE * channel;

        self.driver
            .write_block(register, [on[0], on[1], off[0], off[1]])
            .await
    }
}
