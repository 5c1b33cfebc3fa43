//! PWM slice as an edge counter

use embassy_rp::pwm::Pwm;

/// PWM slice in falling-edge input mode, counting on its B pin
///
/// Build the slice with `Pwm::new_input(.., InputMode::FallingEdge, ..)`
/// and the default config (divider 1, top `0xFFFF`) so every edge counts
/// and the counter wraps at 2^16.
pub struct RpPwmCounter<'d>(Pwm<'d>);

impl<'d> RpPwmCounter<'d> {
    pub fn new(pwm: Pwm<'d>) -> Self {
        Self(pwm)
    }
}

impl nina_hal::EdgeCounter for RpPwmCounter<'_> {
    #[inline]
    fn count(&self) -> u16 {
        self.0.counter()
    }
}
