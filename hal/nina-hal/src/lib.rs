//! NINA Dash Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that are implemented by
//! chip-specific HALs (currently RP2040). The board-agnostic crates
//! (`nina-core`, `nina-drivers`) only ever see these traits, which keeps
//! them testable on the host with mock pins and buses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Firmware (nina-firmware, satellite fw)      │
//! └─────────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────────┐
//! │  nina-core / nina-drivers                    │
//! └─────────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────────┐
//! │  nina-hal (this crate - traits)              │
//! └─────────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ nina-hal-     │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`adc::AdcReader`] - Analog input
//! - [`counter::EdgeCounter`] - Hardware pulse counting
//! - [`i2c::I2cBus`] - I2C bus master operations
//! - [`irq::IrqSource`] - Masking a single interrupt source

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod counter;
pub mod gpio;
pub mod i2c;
pub mod irq;

// Re-export key traits at crate root for convenience
pub use adc::AdcReader;
pub use counter::EdgeCounter;
pub use gpio::{InputPin, OutputPin};
pub use i2c::I2cBus;
pub use irq::{IrqSource, MaskGuard};
