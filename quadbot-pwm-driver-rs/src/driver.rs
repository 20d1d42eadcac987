//! Low-level PCA9685 register driver.
//!
//! Implements the three bus primitives the controller needs: single
//! register writes, a single register read, and 4-byte channel block writes
//! that rely on MODE1 auto-increment.
//!
//! This module is crate-private — consumers interact with
//! [`PwmController`](crate::PwmController) instead.

use embedded_hal_async::i2c::I2c;

use crate::error::PwmError;

/// Low-level PCA9685 register driver.
///
/// Owns an I2C peripheral and the device address.
pub(crate) struct Pca9685Driver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Pca9685Driver<I2C>
where
    I2C: I2c,
{
    /// Create a new register driver.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (typically 0x40)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give back the I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Write one byte to `register`.
    pub async fn write_u8(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), PwmError<I2C::Error>> {
        self.i2c.write(self.address, &[register, value]).await?;
        Ok(())
    }

    /// Read one byte from `register`.
    ///
    /// The PCA9685 supports repeated-start reads, so a single
    /// `write_read()` transaction is used.
    pub async fn read_u8(&mut self, register: u8) -> Result<u8, PwmError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .await?;
        Ok(buf[0])
    }

    /// Write a 4-byte block starting at `register`.
    ///
    /// The device must have auto-increment enabled in MODE1, otherwise all
    /// four bytes land in `register`.
    pub async fn write_block(
        &mut self,
        register: u8,
        block: [u8; 4],
    ) -> Result<(), PwmError<I2C::Error>> {
        // Full write buffer: [register, b0, b1, b2, b3]
        let mut buf = [0u8; 5];
        buf[0] = register;
        buf[1..5].copy_from_slice(&block);

        self.i2c.write(self.address, &buf).await?;

        Ok(())
    }
}
