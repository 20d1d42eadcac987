//! Low-level DRV8830 register access.
//!
//! Both chips sit on the same bus, so the driver owns the bus once and
//! takes the chip address per call.

use embedded_hal_async::i2c::I2c;

use crate::error::MotorError;

pub(crate) struct Drv8830Bus<I2C> {
    i2c: I2C,
}

impl<I2C> Drv8830Bus<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Write one register on the chip at `address`.
    pub async fn write_reg(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), MotorError<I2C::Error>> {
        self.i2c.write(address, &[register, value]).await?;
        Ok(())
    }

    /// Read one register on the chip at `address`.
    pub async fn read_reg(
        &mut self,
        address: u8,
        register: u8,
    ) -> Result<u8, MotorError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(address, &[register], &mut buf).await?;
        Ok(buf[0])
    }
}
