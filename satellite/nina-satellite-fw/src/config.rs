//! Shared board configuration
//!
//! The satellite takes speed calibration, button timing and its I2C address
//! from the same `dash.toml` the primary is built with.

use defmt::*;

use nina_core::config::{self, DashConfig};

/// Postcard-encoded `nina-firmware/dash.toml`
static EMBEDDED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/dash_config.bin"));

pub fn load() -> DashConfig {
    match config::decode(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Embedded dash.toml rejected: {}, using defaults", e);
            DashConfig::default()
        }
    }
}
