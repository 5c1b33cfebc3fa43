//! LED bar tachometer
//!
//! `total_leds` LEDs spread over consecutive registers, LSB first. Channel
//! `c` drives register `c`, so the channel count equals the register count.
//!
//! ```text
//! reg:   0          1          2          3
//! LED:   0..=7      8..=15     16..=23    24..=28 (5 valid bits)
//! ```

use crate::traits::ChannelRenderer;

/// LEDs on the stock tachometer bar
pub const TACH_LEDS: u8 = 29;

/// Full-scale rpm of the stock bar
pub const TACH_MAX_RPM: u32 = 8000;

/// Registers (and channels) of the stock bar
pub const TACH_REGISTERS: usize = registers_for(TACH_LEDS);

/// Registers needed for `leds` LEDs
pub const fn registers_for(leds: u8) -> usize {
    (leds as usize).div_ceil(8)
}

/// Number of lit LEDs for `rate`
///
/// `floor(min(rate, max_rate) * total_leds / max_rate)`. A zero `max_rate`
/// lights nothing.
pub fn lit_for(rate: u32, max_rate: u32, total_leds: u8) -> u8 {
    if max_rate == 0 {
        return 0;
    }
    let rate = rate.min(max_rate) as u64;
    (rate * total_leds as u64 / max_rate as u64) as u8
}

/// Bar graph renderer
#[derive(Debug, Clone)]
pub struct BarRenderer {
    total_leds: u8,
    max_rate: u32,
    lit: u8,
}

impl BarRenderer {
    /// Create a bar of `total_leds` LEDs reading full at `max_rate`
    pub const fn new(total_leds: u8, max_rate: u32) -> Self {
        Self {
            total_leds,
            max_rate,
            lit: 0,
        }
    }

    /// The stock 29-LED, 8000 rpm bar
    pub const fn tachometer() -> Self {
        Self::new(TACH_LEDS, TACH_MAX_RPM)
    }

    /// Set the displayed rate; values above full scale saturate
    pub fn set_rate(&mut self, rate: u32) {
        self.lit = lit_for(rate, self.max_rate, self.total_leds);
    }

    pub fn lit_leds(&self) -> u8 {
        self.lit
    }

    pub fn total_leds(&self) -> u8 {
        self.total_leds
    }

    /// Registers (and channels) this bar spans
    pub fn registers(&self) -> usize {
        registers_for(self.total_leds)
    }

    /// Bit pattern of register `reg`
    pub fn register_bits(&self, reg: usize) -> u8 {
        let first = reg * 8;
        let lit = self.lit as usize;
        if lit <= first {
            return 0;
        }
        let on = (lit - first).min(8);
        if on == 8 {
            0xFF
        } else {
            (1u8 << on) - 1
        }
    }
}

impl Default for BarRenderer {
    fn default() -> Self {
        Self::tachometer()
    }
}

impl ChannelRenderer for BarRenderer {
    fn render(&self, channel: u8, regs: &mut [u8]) {
        let reg = channel as usize;
        if reg >= self.registers() {
            return;
        }
        if let Some(slot) = regs.get_mut(reg) {
            *slot = self.register_bits(reg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lit_bits(bar: &BarRenderer) -> u32 {
        (0..bar.registers() as u8)
            .map(|channel| {
                let mut regs = [0u8; TACH_REGISTERS];
                bar.render(channel, &mut regs);
                // Only the channel's own register may be written
                for (i, &r) in regs.iter().enumerate() {
                    if i != channel as usize {
                        assert_eq!(r, 0);
                    }
                }
                regs[channel as usize].count_ones()
            })
            .sum()
    }

    #[test]
    fn test_stock_geometry() {
        assert_eq!(TACH_REGISTERS, 4);
        assert_eq!(BarRenderer::tachometer().registers(), 4);
    }

    #[test]
    fn test_empty_and_full() {
        let mut bar = BarRenderer::tachometer();
        bar.set_rate(0);
        assert_eq!(lit_bits(&bar), 0);

        bar.set_rate(8000);
        assert_eq!(bar.lit_leds(), 29);
        assert_eq!(bar.register_bits(0), 0xFF);
        assert_eq!(bar.register_bits(2), 0xFF);
        // Last register has 5 valid bits
        assert_eq!(bar.register_bits(3), 0b1_1111);
    }

    #[test]
    fn test_saturates_above_full_scale() {
        let mut bar = BarRenderer::tachometer();
        bar.set_rate(60_000);
        assert_eq!(bar.lit_leds(), 29);
    }

    #[test]
    fn test_partial_register() {
        let mut bar = BarRenderer::tachometer();
        // 3000 * 29 / 8000 = 10.875 -> 10 LEDs
        bar.set_rate(3000);
        assert_eq!(bar.lit_leds(), 10);
        assert_eq!(bar.register_bits(0), 0xFF);
        assert_eq!(bar.register_bits(1), 0b11);
        assert_eq!(bar.register_bits(2), 0);

        let mut regs = [0u8; 4];
        bar.render(1, &mut regs);
        assert_eq!(regs, [0, 0b11, 0, 0]);
    }

    #[test]
    fn test_zero_full_scale_lights_nothing() {
        assert_eq!(lit_for(5000, 0, 29), 0);
    }

    proptest! {
        #[test]
        fn prop_lit_matches_formula(rate in 0u32..20_000) {
            let mut bar = BarRenderer::tachometer();
            bar.set_rate(rate);
            let expected = rate.min(8000) * 29 / 8000;
            prop_assert_eq!(bar.lit_leds() as u32, expected);
            prop_assert_eq!(lit_bits(&bar), expected);
        }

        #[test]
        fn prop_monotonic(a in 0u32..20_000, b in 0u32..20_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(lit_for(lo, 8000, 29) <= lit_for(hi, 8000, 29));
        }
    }
}
