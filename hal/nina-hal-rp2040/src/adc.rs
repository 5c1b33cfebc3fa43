//! ADC channel adapter
//!
//! RP2040 has a single converter multiplexed over GPIO26-29 and the
//! internal temperature sensor. Each gauge owns one [`RpAdcChannel`];
//! the channels share the converter through a `RefCell` since all
//! conversions happen on the thread-mode executor.

use core::cell::RefCell;

use embassy_rp::adc::{Adc, Blocking, Channel, Error};

/// One analog input on the shared converter
pub struct RpAdcChannel<'a, 'd> {
    adc: &'a RefCell<Adc<'d, Blocking>>,
    channel: Channel<'d>,
}

impl<'a, 'd> RpAdcChannel<'a, 'd> {
    pub fn new(adc: &'a RefCell<Adc<'d, Blocking>>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl nina_hal::AdcReader for RpAdcChannel<'_, '_> {
    type Error = Error;

    fn read(&mut self) -> Result<u16, Error> {
        self.adc.borrow_mut().blocking_read(&mut self.channel)
    }
}
