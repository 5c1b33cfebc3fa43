//! Analog sensor drivers

pub mod analog;

pub use analog::{interpolate_temp, AnalogGauges, SensorError};
