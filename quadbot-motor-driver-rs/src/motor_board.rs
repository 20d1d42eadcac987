//! High-level interface for the two wheel motor drivers.
//!
//! [`DualMotorDriver`] maps a wheel channel to its chip address and encodes
//! signed voltage percentages into CONTROL register bytes. Drive commands
//! are fire-and-forget: nothing is read back.

use embedded_hal_async::i2c::I2c;

use crate::driver::Drv8830Bus;
use crate::error::MotorError;
use crate::registers::{
    ADDRESS_LEFT, ADDRESS_RIGHT, CONTROL, FAULT, FAULT_CLEAR, FAULT_FAULT, FAULT_ILIMIT, FAULT_OCP,
    FAULT_OTS, FAULT_UVLO, VOLTAGE_MAX, VSET_MAX, VSET_SHIFT,
};

/// Wheel motor selector. The discriminant is the public channel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorChannel {
    Right = 0,
    Left = 1,
}

impl MotorChannel {
    /// Look up a channel by index. Returns `None` for anything but 0 and 1.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(MotorChannel::Right),
            1 => Some(MotorChannel::Left),
            _ => None,
        }
    }

    /// I2C address of the chip driving this wheel.
    pub fn address(self) -> u8 {
        match self {
            MotorChannel::Right => ADDRESS_RIGHT,
            MotorChannel::Left => ADDRESS_LEFT,
        }
    }
}

/// H-bridge state in CONTROL bits 1..0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Coast, outputs high-impedance.
    Standby = 0b00,
    Reverse = 0b01,
    Forward = 0b10,
    /// Both low-side FETs on.
    Brake = 0b11,
}

impl Direction {
    /// Direction for a signed voltage: zero is standby.
    pub fn for_voltage(voltage: i32) -> Self {
        match voltage {
            0 => Direction::Standby,
            v if v > 0 => Direction::Forward,
            _ => Direction::Reverse,
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// Rescale a voltage magnitude from percent to a VSET code.
///
/// The magnitude is clamped to `0..=100` and mapped linearly onto
/// `0..=37` with truncating integer arithmetic.
///
/// ```
/// assert_eq!(motor_driver::scale_voltage(50), 18);
/// assert_eq!(motor_driver::scale_voltage(-100), 37);
/// ```
pub fn scale_voltage(voltage: i32) -> u8 {
    let magnitude = voltage.saturating_abs().clamp(0, VOLTAGE_MAX);
    (magnitude * VSET_MAX / VOLTAGE_MAX) as u8
}

/// CONTROL register byte for a signed voltage percentage.
pub fn control_byte(voltage: i32) -> u8 {
    Direction::for_voltage(voltage).bits() | (scale_voltage(voltage) << VSET_SHIFT)
}

/// FAULT register contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fault {
    raw: u8,
}

impl Fault {
    #[inline]
    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// Any fault condition is latched.
    #[inline]
    pub fn fault(&self) -> bool {
        (self.raw & FAULT_FAULT) != 0
    }

    /// Overcurrent event.
    #[inline]
    pub fn overcurrent(&self) -> bool {
        (self.raw & FAULT_OCP) != 0
    }

    /// Undervoltage lockout.
    #[inline]
    pub fn undervoltage(&self) -> bool {
        (self.raw & FAULT_UVLO) != 0
    }

    /// Overtemperature shutdown.
    #[inline]
    pub fn overtemperature(&self) -> bool {
        (self.raw & FAULT_OTS) != 0
    }

    /// Current limit was reached.
    #[inline]
    pub fn current_limit(&self) -> bool {
        (self.raw & FAULT_ILIMIT) != 0
    }
}

/// The two wheel drivers sharing one I2C bus.
///
/// # Example
///
/// ```ignore
/// use motor_driver::DualMotorDriver;
///
/// let mut motors = DualMotorDriver::new(i2c);
/// motors.drive(0, 50).await.unwrap();   // right wheel forward
/// motors.drive(7, 50).await.unwrap();   // unknown channel, no-op
/// ```
pub struct DualMotorDriver<I2C> {
    bus: Drv8830Bus<I2C>,
}

impl<I2C> DualMotorDriver<I2C>
where
    I2C: I2c,
{
    /// Create the driver. No I2C traffic is generated.
    pub fn new(i2c: I2C) -> Self {
        Self {
            bus: Drv8830Bus::new(i2c),
        }
    }

    /// Give back the I2C peripheral.
    pub fn release(self) -> I2C {
        self.bus.release()
    }

    // -----------------------------------------------------------------------
    // Drive
    // -----------------------------------------------------------------------

    /// Drive a wheel by channel index.
    ///
    /// # Arguments
    /// * `channel` — 0 (right) or 1 (left). Any other value is ignored.
    /// * `voltage` — Signed percentage; magnitudes above 100 are clamped.
    ///
    /// # Errors
    /// * [`MotorError::I2c`] on communication failure
    pub async fn drive(&mut self, channel: u8, voltage: i32) -> Result<(), MotorError<I2C::Error>> {
        match MotorChannel::from_index(channel) {
            Some(motor) => self.drive_motor(motor, voltage).await,
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("drive: motor channel {} out of range, ignored", channel);
                Ok(())
            }
        }
    }

    /// Drive a wheel with a signed voltage percentage.
    pub async fn drive_motor(
        &mut self,
        motor: MotorChannel,
        voltage: i32,
    ) -> Result<(), MotorError<I2C::Error>> {
        let value = control_byte(voltage);

        #[cfg(feature = "defmt")]
        defmt::trace!("motor {}: voltage={} control={=u8:#x}", motor, voltage, value);

        self.bus.write_reg(motor.address(), CONTROL, value).await
    }

    /// Short the wheel's windings to brake it.
    pub async fn brake(&mut self, motor: MotorChannel) -> Result<(), MotorError<I2C::Error>> {
        self.bus
            .write_reg(motor.address(), CONTROL, Direction::Brake.bits())
            .await
    }

    /// Put both wheels in standby.
    pub async fn stop_all(&mut self) -> Result<(), MotorError<I2C::Error>> {
        self.drive_motor(MotorChannel::Right, 0).await?;
        self.drive_motor(MotorChannel::Left, 0).await
    }

    // -----------------------------------------------------------------------
    // Fault handling
    // -----------------------------------------------------------------------

    /// Read the latched FAULT flags of one chip.
    pub async fn read_fault(&mut self, motor: MotorChannel) -> Result<Fault, MotorError<I2C::Error>> {
        Ok(Fault {
            raw: self.bus.read_reg(motor.address(), FAULT).await?,
        })
    }

    /// Clear the latched FAULT flags of one chip.
    pub async fn clear_fault(&mut self, motor: MotorChannel) -> Result<(), MotorError<I2C::Error>> {
        self.bus.write_reg(motor.address(), FAULT, FAULT_CLEAR).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBus;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::ErrorKind;

    // ── Encoding ─────────────────────────────────────────────────────

    #[test]
    fn direction_follows_sign() {
        assert_eq!(Direction::for_voltage(0), Direction::Standby);
        for v in 1..=100 {
            assert_eq!(Direction::for_voltage(v), Direction::Forward);
            assert_eq!(Direction::for_voltage(-v), Direction::Reverse);
        }
    }

    #[test]
    fn half_voltage_forward_control_byte() {
        // floor(50 * 37 / 100) = 18
        assert_eq!(scale_voltage(50), 18);
        assert_eq!(control_byte(50), 0b10 | (18 << 2));
    }

    #[test]
    fn magnitude_is_monotonic_and_saturates() {
        let mut previous = 0;
        for v in 0..=100 {
            let code = scale_voltage(v);
            assert!(code >= previous, "scale_voltage not monotonic at {}", v);
            assert_eq!(scale_voltage(-v), code);
            previous = code;
        }
        assert_eq!(scale_voltage(100), 37);
        assert_eq!(scale_voltage(250), 37);
        assert_eq!(scale_voltage(i32::MIN), 37);
    }

    #[test]
    fn direction_bits_in_control_byte() {
        assert_eq!(control_byte(0) & 0b11, 0b00);
        assert_eq!(control_byte(0), 0);
        assert_eq!(control_byte(1) & 0b11, 0b10);
        assert_eq!(control_byte(-1) & 0b11, 0b01);
        assert_eq!(control_byte(-100), 0b01 | (37 << 2));
    }

    #[test]
    fn fault_bits() {
        let fault = Fault { raw: FAULT_FAULT | FAULT_OTS };
        assert!(fault.fault());
        assert!(fault.overtemperature());
        assert!(!fault.overcurrent());
        assert!(!fault.undervoltage());
        assert!(!fault.current_limit());
    }

    // ── Bus traffic ──────────────────────────────────────────────────

    #[test]
    fn drive_selects_chip_by_channel() {
        let mut motors = DualMotorDriver::new(FakeBus::new());
        block_on(motors.drive(0, 50)).unwrap();
        block_on(motors.drive(1, -100)).unwrap();

        let bus = motors.release();
        assert_eq!(bus.transfers[0].address, ADDRESS_RIGHT);
        assert_eq!(bus.transfers[0].written, vec![CONTROL, 0x4A]);
        assert_eq!(bus.transfers[1].address, ADDRESS_LEFT);
        assert_eq!(bus.transfers[1].written, vec![CONTROL, 0x95]);
    }

    #[test]
    fn unknown_channel_is_silent_noop() {
        let mut motors = DualMotorDriver::new(FakeBus::new());
        assert!(block_on(motors.drive(2, 50)).is_ok());
        assert!(block_on(motors.drive(255, -50)).is_ok());

        let bus = motors.release();
        assert!(bus.transfers.is_empty());
    }

    #[test]
    fn brake_writes_brake_code_without_magnitude() {
        let mut motors = DualMotorDriver::new(FakeBus::new());
        block_on(motors.drive_motor(MotorChannel::Left, 80)).unwrap();
        block_on(motors.brake(MotorChannel::Left)).unwrap();

        let bus = motors.release();
        assert_eq!(bus.writes().last(), Some(&vec![CONTROL, 0b11]));
        assert_eq!(bus.register(ADDRESS_LEFT, CONTROL), 0b11);
    }

    #[test]
    fn stop_all_puts_both_wheels_in_standby() {
        let mut motors = DualMotorDriver::new(FakeBus::new());
        block_on(motors.drive(0, 60)).unwrap();
        block_on(motors.drive(1, -60)).unwrap();
        block_on(motors.stop_all()).unwrap();

        let bus = motors.release();
        assert_eq!(bus.register(ADDRESS_RIGHT, CONTROL), 0);
        assert_eq!(bus.register(ADDRESS_LEFT, CONTROL), 0);
    }

    #[test]
    fn fault_read_and_clear() {
        let mut bus = FakeBus::new();
        let mut regs = [0u8; 256];
        regs[FAULT as usize] = FAULT_FAULT | FAULT_OCP;
        bus.devices.insert(ADDRESS_RIGHT, regs);
        let mut motors = DualMotorDriver::new(bus);

        let fault = block_on(motors.read_fault(MotorChannel::Right)).unwrap();
        assert!(fault.fault());
        assert!(fault.overcurrent());

        block_on(motors.clear_fault(MotorChannel::Right)).unwrap();
        let bus = motors.release();
        assert_eq!(bus.writes(), vec![vec![FAULT, FAULT_CLEAR]]);
    }

    #[test]
    fn bus_failure_is_propagated() {
        let mut bus = FakeBus::new();
        bus.fail_after = Some(0);
        let mut motors = DualMotorDriver::new(bus);
        assert_eq!(
            block_on(motors.drive(0, 10)),
            Err(MotorError::I2c(ErrorKind::Other))
        );
    }
}
