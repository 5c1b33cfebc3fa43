//! Dashboard switch inputs
//!
//! Seven optocoupled inputs from the vehicle loom, all active low. Each one
//! drives a warning lamp directly; the low-fuel lamp comes from the fuel
//! gauge instead.
//!
//! These lines are level signals (lamps mirror them), so they are read
//! without debouncing, and the indicator input follows the flasher relay.

use nina_core::render::Lamp;
use nina_hal::gpio::Polarity;
use nina_hal::InputPin;

/// Number of switch inputs
pub const SWITCH_COUNT: usize = 7;

/// Switch input, in wiring order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Switch {
    Brake,
    Oil,
    Indicators,
    HighBeam,
    Lights,
    Fog,
    /// Alternator D+; active means "not charging"
    Battery,
}

impl Switch {
    pub const ALL: [Switch; SWITCH_COUNT] = [
        Switch::Brake,
        Switch::Oil,
        Switch::Indicators,
        Switch::HighBeam,
        Switch::Lights,
        Switch::Fog,
        Switch::Battery,
    ];

    /// Lamp driven by this switch
    pub const fn lamp(self) -> Lamp {
        match self {
            Switch::Brake => Lamp::Brakes,
            Switch::Oil => Lamp::Oil,
            Switch::Indicators => Lamp::Indicators,
            Switch::HighBeam => Lamp::HighBeam,
            Switch::Lights => Lamp::Headlights,
            Switch::Fog => Lamp::FogLights,
            Switch::Battery => Lamp::Battery,
        }
    }
}

/// Snapshot of all switch inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchStates {
    active: [bool; SWITCH_COUNT],
}

impl SwitchStates {
    pub fn is_active(&self, switch: Switch) -> bool {
        self.active[switch as usize]
    }

    /// Lamp bank mask for these switches
    pub fn lamp_mask(&self) -> u8 {
        Switch::ALL
            .iter()
            .filter(|&&s| self.is_active(s))
            .fold(0, |mask, s| mask | s.lamp().bit())
    }
}

/// The seven switch inputs
///
/// `pins` are in [`Switch::ALL`] order.
pub struct DashSwitches<P> {
    pins: [P; SWITCH_COUNT],
    polarity: Polarity,
    states: SwitchStates,
}

impl<P: InputPin> DashSwitches<P> {
    /// Active-low switches
    pub fn new(pins: [P; SWITCH_COUNT]) -> Self {
        Self::with_polarity(pins, Polarity::ActiveLow)
    }

    pub fn with_polarity(pins: [P; SWITCH_COUNT], polarity: Polarity) -> Self {
        Self {
            pins,
            polarity,
            states: SwitchStates::default(),
        }
    }

    /// Read every input
    pub fn update(&mut self) -> SwitchStates {
        for (state, pin) in self.states.active.iter_mut().zip(self.pins.iter()) {
            *state = self.polarity.read(pin);
        }
        self.states
    }

    /// Last snapshot taken by [`update`](Self::update)
    pub fn states(&self) -> SwitchStates {
        self.states
    }
}
