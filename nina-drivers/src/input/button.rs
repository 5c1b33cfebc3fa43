//! Pin-backed debounced button

use nina_core::input::{ButtonState, DebouncedButton};
use nina_hal::gpio::Polarity;
use nina_hal::InputPin;

/// A [`DebouncedButton`] reading its level from an input pin
pub struct PinButton<P> {
    pin: P,
    button: DebouncedButton,
}

impl<P: InputPin> PinButton<P> {
    pub fn new(pin: P, polarity: Polarity, debounce_ms: u32) -> Self {
        Self {
            pin,
            button: DebouncedButton::new(polarity, debounce_ms),
        }
    }

    /// Adopt the current pin level without reporting a press
    pub fn begin(&mut self, now_ms: u32) {
        self.button.begin(self.pin.is_high(), now_ms);
    }

    /// Sample the pin
    pub fn update(&mut self, now_ms: u32) {
        self.button.update(self.pin.is_high(), now_ms);
    }

    pub fn is_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    pub fn was_pressed(&mut self) -> bool {
        self.button.was_pressed()
    }

    pub fn held_for(&self, now_ms: u32) -> u32 {
        self.button.held_for(now_ms)
    }

    pub fn state(&self) -> ButtonState {
        self.button.state()
    }
}
