//! Status LED blinks

use nina_hal::OutputPin;

/// OK button press
pub const BLINK_OK_MS: u32 = 100;
/// NEXT button press
pub const BLINK_NEXT_MS: u32 = 200;
/// OK button held past the long-press time
pub const BLINK_LONG_MS: u32 = 500;
/// Wheel speed rising
pub const BLINK_PULSE_MS: u32 = 50;

/// Non-blocking one-shot blinker
///
/// A new blink restarts the timer, so the latest event wins.
pub struct StatusLed<P> {
    pin: P,
    off_at_ms: Option<u32>,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(mut pin: P) -> Self {
        pin.set_low();
        Self {
            pin,
            off_at_ms: None,
        }
    }

    /// Light the LED for `duration_ms`
    pub fn blink(&mut self, duration_ms: u32, now_ms: u32) {
        self.pin.set_high();
        self.off_at_ms = Some(now_ms.wrapping_add(duration_ms));
    }

    /// Turn the LED off once the blink has run out
    pub fn update(&mut self, now_ms: u32) {
        if let Some(off_at) = self.off_at_ms {
            if (now_ms.wrapping_sub(off_at) as i32) >= 0 {
                self.pin.set_low();
                self.off_at_ms = None;
            }
        }
    }
}
