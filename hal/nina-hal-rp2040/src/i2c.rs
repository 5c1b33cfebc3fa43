//! I2C master adapter

use embedded_hal::i2c::I2c;

/// Wraps any `embedded-hal` 1.0 I2C master as a `nina_hal::I2cBus`
///
/// `embassy_rp::i2c::I2c` implements the blocking `embedded-hal` trait in
/// both modes, so the firmware hands it over directly.
pub struct EhI2c<T>(T);

impl<T> EhI2c<T> {
    pub fn new(bus: T) -> Self {
        Self(bus)
    }
}

impl<T: I2c> nina_hal::I2cBus for EhI2c<T> {
    type Error = T::Error;

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), T::Error> {
        self.0.read(address, buf)
    }
}
