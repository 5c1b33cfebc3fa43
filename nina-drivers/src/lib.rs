//! Hardware driver implementations
//!
//! This crate provides concrete drivers over the `nina-hal` traits for the
//! dashboard hardware:
//!
//! - 74HC595 shift register chains (implements `nina_core::traits::ShiftOut`)
//! - Pin-backed debounced buttons and the dashboard switch bank
//! - Coolant temperature and fuel gauges
//! - I2C telemetry link to the satellite board

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod input;
pub mod link;
pub mod sensor;
pub mod shift;
