//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs, plus the polarity helper shared by every
//! switch-like input on the dashboard.

/// Digital output pin
///
/// Used for the data, clock and latch lines of the shift-register chains,
/// so implementations must not block.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Electrical polarity of a switch-like input
///
/// Most dashboard inputs sit behind optocouplers or pull-ups and read
/// low when the switch is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Closed switch pulls the line low
    #[default]
    ActiveLow,
    /// Closed switch drives the line high
    ActiveHigh,
}

impl Polarity {
    /// Translate a raw line level into "switch active"
    #[inline]
    pub fn is_active(self, line_high: bool) -> bool {
        match self {
            Polarity::ActiveLow => !line_high,
            Polarity::ActiveHigh => line_high,
        }
    }

    /// Read a pin and translate it through this polarity
    #[inline]
    pub fn read<P: InputPin + ?Sized>(self, pin: &P) -> bool {
        self.is_active(pin.is_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPin(bool);

    impl InputPin for FixedPin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_polarity_active_low() {
        assert!(Polarity::ActiveLow.is_active(false));
        assert!(!Polarity::ActiveLow.is_active(true));
        assert!(Polarity::ActiveLow.read(&FixedPin(false)));
    }

    #[test]
    fn test_polarity_active_high() {
        assert!(Polarity::ActiveHigh.is_active(true));
        assert!(!Polarity::ActiveHigh.read(&FixedPin(false)));
    }
}
