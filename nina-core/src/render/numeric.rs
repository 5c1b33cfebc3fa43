//! Three-digit seven-segment speedometer
//!
//! Two registers per tick:
//!
//! | Register | Content |
//! |----------|---------|
//! | 0 | Digit enable: hundreds = bit 0, tens = bit 1, units = bit 2 |
//! | 1 | Segment pattern for the enabled digit, active low |
//!
//! One channel per digit, channel 0 = hundreds. Leading zeros are blanked by
//! leaving both registers at 0 (digit disabled).

use crate::traits::ChannelRenderer;

/// Registers in the speedometer chain
pub const SPEEDO_REGISTERS: usize = 2;

/// Channels (digits) cycled by the speedometer
pub const SPEEDO_CHANNELS: u8 = 3;

/// Largest displayable value
pub const SPEEDO_MAX: u16 = 999;

/// Segment patterns for 0-9, bit order `dp g f e d c b a`, active low
pub const SEGMENTS: [u8; 10] = [
    0b1100_0000, // 0
    0b1111_1001, // 1
    0b1010_0100, // 2
    0b1011_0000, // 3
    0b1001_1001, // 4
    0b1001_0010, // 5
    0b1000_0010, // 6
    0b1111_1000, // 7
    0b1000_0000, // 8
    0b1001_0000, // 9
];

/// Digit enable bits, indexed by channel
pub const DIGIT_ENABLE: [u8; 3] = [0b001, 0b010, 0b100];

/// Speedometer renderer
#[derive(Debug, Clone, Default)]
pub struct SpeedoRenderer {
    /// Hundreds, tens, units
    digits: [u8; 3],
}

impl SpeedoRenderer {
    pub const fn new() -> Self {
        Self { digits: [0; 3] }
    }

    /// Set the displayed value, clamped to 999
    pub fn set_speed(&mut self, value: u16) {
        let value = value.min(SPEEDO_MAX);
        self.digits = [
            (value / 100) as u8,
            ((value / 10) % 10) as u8,
            (value % 10) as u8,
        ];
    }

    /// Currently displayed value
    pub fn speed(&self) -> u16 {
        let [h, t, u] = self.digits;
        h as u16 * 100 + t as u16 * 10 + u as u16
    }

    fn is_visible(&self, channel: u8) -> bool {
        let [hundreds, tens, _] = self.digits;
        match channel {
            0 => hundreds != 0,
            1 => tens != 0 || hundreds != 0,
            2 => true,
            _ => false,
        }
    }
}

impl ChannelRenderer for SpeedoRenderer {
    fn render(&self, channel: u8, regs: &mut [u8]) {
        if regs.len() < SPEEDO_REGISTERS || !self.is_visible(channel) {
            return;
        }

        let digit = self.digits[channel as usize];
        regs[0] = DIGIT_ENABLE[channel as usize];
        regs[1] = SEGMENTS[digit as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frame(renderer: &SpeedoRenderer, channel: u8) -> [u8; 2] {
        let mut regs = [0u8; 2];
        renderer.render(channel, &mut regs);
        regs
    }

    /// Decode the three channels back to (digit or None) per position
    fn decode(renderer: &SpeedoRenderer) -> [Option<u8>; 3] {
        let mut out = [None; 3];
        for channel in 0..SPEEDO_CHANNELS {
            let [enable, segments] = frame(renderer, channel);
            if enable == 0 {
                assert_eq!(segments, 0, "hidden digit must leave segments blank");
                continue;
            }
            assert_eq!(enable, DIGIT_ENABLE[channel as usize]);
            let digit = SEGMENTS.iter().position(|&s| s == segments).unwrap();
            out[channel as usize] = Some(digit as u8);
        }
        out
    }

    #[test]
    fn test_zero_shows_units_only() {
        let mut speedo = SpeedoRenderer::new();
        speedo.set_speed(0);
        assert_eq!(decode(&speedo), [None, None, Some(0)]);
        assert_eq!(frame(&speedo, 2), [0b100, 0b1100_0000]);
    }

    #[test]
    fn test_internal_zero_is_shown() {
        let mut speedo = SpeedoRenderer::new();
        speedo.set_speed(105);
        assert_eq!(decode(&speedo), [Some(1), Some(0), Some(5)]);
    }

    #[test]
    fn test_two_digits() {
        let mut speedo = SpeedoRenderer::new();
        speedo.set_speed(42);
        assert_eq!(decode(&speedo), [None, Some(4), Some(2)]);
    }

    #[test]
    fn test_clamps_to_999() {
        let mut speedo = SpeedoRenderer::new();
        speedo.set_speed(1234);
        assert_eq!(speedo.speed(), 999);
        assert_eq!(decode(&speedo), [Some(9), Some(9), Some(9)]);
    }

    #[test]
    fn test_out_of_range_channel_is_blank() {
        let mut speedo = SpeedoRenderer::new();
        speedo.set_speed(888);
        assert_eq!(frame(&speedo, 3), [0, 0]);
    }

    #[test]
    fn test_short_buffer_is_left_alone() {
        let mut speedo = SpeedoRenderer::new();
        speedo.set_speed(7);
        let mut regs = [0u8; 1];
        speedo.render(2, &mut regs);
        assert_eq!(regs, [0]);
    }

    proptest! {
        #[test]
        fn prop_every_value_round_trips(value in 0u16..=999) {
            let mut speedo = SpeedoRenderer::new();
            speedo.set_speed(value);

            let digits = decode(&speedo);
            let shown: u16 = digits
                .iter()
                .map(|d| d.unwrap_or(0) as u16)
                .fold(0, |acc, d| acc * 10 + d);
            prop_assert_eq!(shown, value);

            // Leading-zero blanking
            prop_assert_eq!(digits[0].is_some(), value >= 100);
            prop_assert_eq!(digits[1].is_some(), value >= 10);
            prop_assert!(digits[2].is_some());
        }
    }
}
