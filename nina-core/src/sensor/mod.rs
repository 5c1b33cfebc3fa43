//! Pulse sensors
//!
//! - [`PulseCounter`]: interrupt-fed edge counter
//! - [`RateSampler`]: fixed-window rate (tachometer)
//! - [`SpeedSampler`]: calibrated, smoothed vehicle speed
//! - [`Odometer`]: trip distance from speed

pub mod odometer;
pub mod pulse;
pub mod rate;
pub mod speed;

pub use odometer::Odometer;
pub use pulse::{CounterBridge, PulseCounter};
pub use rate::{pulses_to_rate, RateSampler, MINUTE_MS};
pub use speed::{kph_to_x10, SpeedSampler};
