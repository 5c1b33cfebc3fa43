//! Board configuration
//!
//! `build.rs` validates `dash.toml` and embeds it as postcard. Decoding can
//! only fail if the image and the config types drift apart, in which case
//! the built-in defaults are used.

use defmt::*;

use nina_core::config::{self, DashConfig};

/// Postcard-encoded `dash.toml`
static EMBEDDED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/dash_config.bin"));

/// Decode the embedded configuration
pub fn load() -> DashConfig {
    match config::decode(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded dash.toml ({} bytes)", EMBEDDED_CONFIG.len());
            config
        }
        Err(e) => {
            error!("Embedded dash.toml rejected: {}, using defaults", e);
            DashConfig::default()
        }
    }
}
