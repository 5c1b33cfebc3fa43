//! Board-agnostic core logic for the NINA Dash instrument firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Pulse counting and rate/speed sampling ([`sensor`])
//! - Debounced buttons ([`input`])
//! - Multiplex scheduler for shift-register displays ([`mux`])
//! - Speedometer, tachometer bar and lamp renderers ([`render`])
//! - Output traits shared with the drivers ([`traits`])
//! - Configuration type definitions ([`config`])
//!
//! # Timing domains
//!
//! ```text
//!  edge IRQ ──► PulseCounter ──► RateSampler / SpeedSampler ──┐
//!                                                             ▼ (main loop)
//!                                                  renderer setters
//!                                                             │
//!  mux tick ──► MultiplexScheduler::on_tick ──► render ──► ShiftOut
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod mux;
pub mod render;
pub mod sensor;
pub mod traits;
