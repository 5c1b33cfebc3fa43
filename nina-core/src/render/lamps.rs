//! Warning lamp bank
//!
//! Eight lamps on a single register, rendered on one channel.

use crate::traits::ChannelRenderer;

/// Registers in the lamp chain
pub const LAMP_REGISTERS: usize = 1;

/// Channels cycled by the lamp bank
pub const LAMP_CHANNELS: u8 = 1;

/// Lamp positions in the register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Lamp {
    Oil = 0,
    Battery = 1,
    Brakes = 2,
    LowFuel = 3,
    Indicators = 4,
    Headlights = 5,
    FogLights = 6,
    HighBeam = 7,
}

impl Lamp {
    pub const ALL: [Lamp; 8] = [
        Lamp::Oil,
        Lamp::Battery,
        Lamp::Brakes,
        Lamp::LowFuel,
        Lamp::Indicators,
        Lamp::Headlights,
        Lamp::FogLights,
        Lamp::HighBeam,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Lamp bank renderer
#[derive(Debug, Clone, Default)]
pub struct LampBank {
    mask: u8,
}

impl LampBank {
    pub const fn new() -> Self {
        Self { mask: 0 }
    }

    pub fn set_lamp(&mut self, lamp: Lamp, on: bool) {
        if on {
            self.mask |= lamp.bit();
        } else {
            self.mask &= !lamp.bit();
        }
    }

    pub fn is_lit(&self, lamp: Lamp) -> bool {
        self.mask & lamp.bit() != 0
    }

    /// Replace the whole mask
    pub fn set_mask(&mut self, mask: u8) {
        self.mask = mask;
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }
}

impl ChannelRenderer for LampBank {
    fn render(&self, _channel: u8, regs: &mut [u8]) {
        if let Some(reg) = regs.first_mut() {
            *reg = self.mask;
        }
    }
}
