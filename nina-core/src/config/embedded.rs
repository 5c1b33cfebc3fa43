//! Embedded configuration image
//!
//! Both firmware images carry `dash.toml` as postcard bytes produced by
//! their build scripts. Decoding re-runs [`DashConfig::validate`] so the
//! primary and the satellite accept exactly the same tuning.

use super::types::{ConfigError, DashConfig};

/// Embedded configuration decode errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Bytes do not decode as a `DashConfig`
    Malformed,
    /// Decoded but out of range
    Invalid(ConfigError),
}

impl From<ConfigError> for DecodeError {
    fn from(e: ConfigError) -> Self {
        DecodeError::Invalid(e)
    }
}

/// Decode and validate an embedded configuration image
pub fn decode(bytes: &[u8]) -> Result<DashConfig, DecodeError> {
    let config: DashConfig = postcard::from_bytes(bytes).map_err(|_| DecodeError::Malformed)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(config: &DashConfig) -> ([u8; 256], usize) {
        let mut buf = [0u8; 256];
        let len = postcard::to_slice(config, &mut buf).unwrap().len();
        (buf, len)
    }

    #[test]
    fn test_decode_carries_satellite_tuning() {
        let mut config = DashConfig::default();
        config.speed.meters_per_pulse = 0.75;
        config.speed.alpha = 0.5;
        config.speed.window_ms = 250;
        config.buttons.debounce_ms = 20;
        config.buttons.long_press_ms = 1500;
        config.link.address = 0x30;

        let (buf, len) = encode(&config);
        let decoded = decode(&buf[..len]).unwrap();

        assert_eq!(decoded.speed, config.speed);
        assert_eq!(decoded.buttons, config.buttons);
        assert_eq!(decoded.link.address, 0x30);
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        let mut config = DashConfig::default();
        config.link.address = 0x03;

        let (buf, len) = encode(&config);
        assert_eq!(
            decode(&buf[..len]),
            Err(DecodeError::Invalid(ConfigError::InvalidAddress))
        );
    }

    #[test]
    fn test_decode_rejects_truncated_image() {
        let (buf, len) = encode(&DashConfig::default());
        assert_eq!(decode(&buf[..len / 2]), Err(DecodeError::Malformed));
        assert_eq!(decode(&[]), Err(DecodeError::Malformed));
    }
}
