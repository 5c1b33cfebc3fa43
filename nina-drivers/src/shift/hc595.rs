//! 74HC595 shift register chain
//!
//! Bit-banged over three GPIOs: serial data, shift clock (SRCLK) and latch
//! (RCLK). Data is sampled on the rising clock edge; the outputs follow the
//! shift stage on the rising latch edge.
//!
//! `regs[0]` is the register wired to the MCU. Bits shifted first travel
//! furthest down the chain, so the buffer goes out highest index first, MSB
//! first within each byte.

use nina_core::traits::ShiftOut;
use nina_hal::OutputPin;

/// 74HC595 chain on three output pins
pub struct Hc595Chain<D, C, L> {
    data: D,
    clock: C,
    latch: L,
}

impl<D, C, L> Hc595Chain<D, C, L>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
{
    /// Create a chain driver
    ///
    /// Clock and latch are parked low.
    pub fn new(data: D, clock: C, latch: L) -> Self {
        let mut chain = Self { data, clock, latch };
        chain.clock.set_low();
        chain.latch.set_low();
        chain
    }

    /// Shift one byte, MSB first
    #[inline]
    fn shift_byte(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            self.data.set_state(byte & (1 << bit) != 0);
            self.clock.set_high();
            self.clock.set_low();
        }
    }

    /// Release the pins
    pub fn release(self) -> (D, C, L) {
        (self.data, self.clock, self.latch)
    }
}

impl<D, C, L> ShiftOut for Hc595Chain<D, C, L>
where
    D: OutputPin,
    C: OutputPin,
    L: OutputPin,
{
    fn shift_out(&mut self, regs: &[u8]) {
        self.latch.set_low();
        for &byte in regs.iter().rev() {
            self.shift_byte(byte);
        }
        self.latch.set_high();
    }
}
