//! GPIO adapters

use embassy_rp::gpio::{Input, Output};

/// Push-pull output driving a `nina_hal::OutputPin`
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl nina_hal::OutputPin for RpOutput<'_> {
    #[inline]
    fn set_high(&mut self) {
        self.0.set_high();
    }

    #[inline]
    fn set_low(&mut self) {
        self.0.set_low();
    }

    #[inline]
    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input read through `nina_hal::InputPin`
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl nina_hal::InputPin for RpInput<'_> {
    #[inline]
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
