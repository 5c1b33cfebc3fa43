//! RP2040-specific HAL for the dashboard firmware
//!
//! Thin adapters from `embassy-rp` peripherals to the shared `nina-hal`
//! traits, so the board-agnostic drivers can run on the real chip:
//!
//! - GPIO inputs and outputs
//! - Blocking ADC channels sharing the single converter
//! - PWM slices counting pulse edges
//! - I2C master over any `embedded-hal` bus
//! - Masking the interrupt that drives the interrupt executor

#![no_std]

pub mod adc;
pub mod gpio;
pub mod i2c;
pub mod irq;
pub mod pwm;

pub use adc::RpAdcChannel;
pub use gpio::{RpInput, RpOutput};
pub use i2c::EhI2c;
pub use irq::ExecutorIrq;
pub use pwm::RpPwmCounter;
