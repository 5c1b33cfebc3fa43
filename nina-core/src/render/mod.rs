//! Channel renderers for the three multiplexed displays
//!
//! | Renderer | Registers | Channels | Content |
//! |----------|-----------|----------|---------|
//! | [`SpeedoRenderer`] | 2 | 3 | Speed, 3 digits |
//! | [`BarRenderer`] | 4 | 4 | RPM, 29-LED bar |
//! | [`LampBank`] | 1 | 1 | Warning lamps |

pub mod bar;
pub mod lamps;
pub mod numeric;

pub use bar::{BarRenderer, TACH_LEDS, TACH_MAX_RPM, TACH_REGISTERS};
pub use lamps::{Lamp, LampBank, LAMP_CHANNELS, LAMP_REGISTERS};
pub use numeric::{SpeedoRenderer, SPEEDO_CHANNELS, SPEEDO_REGISTERS};
