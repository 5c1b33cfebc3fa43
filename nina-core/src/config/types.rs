//! Configuration type definitions
//!
//! These types hold the board tuning. The firmware build script parses
//! `dash.toml` into [`DashConfig`], validates it and embeds it as
//! postcard-serialized binary data.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum points in the coolant temperature table
pub const MAX_TEMP_POINTS: usize = 8;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A multiplex tick period is zero
    ZeroTickPeriod,
    /// A sampling window is zero
    ZeroWindow,
    /// Pulses per revolution is zero
    ZeroPulsesPerRev,
    /// Tachometer full scale is zero
    ZeroMaxRpm,
    /// Tachometer LED count is zero or exceeds the chain
    InvalidLedCount,
    /// Metres per pulse is not a positive number
    InvalidMetersPerPulse,
    /// A filter coefficient is outside (0, 1]
    InvalidAlpha,
    /// Not a 7-bit, non-reserved I2C address
    InvalidAddress,
    /// Telemetry poll period is zero
    ZeroPollPeriod,
    /// Fuel window empty or inverted
    InvalidFuelWindow,
    /// Low fuel threshold above 100 %
    InvalidLowFuelThreshold,
    /// Temperature table has fewer than two points or is not ascending
    InvalidTempTable,
    /// Temperature range empty or inverted
    InvalidTempRange,
    /// ADC reference voltage or full-scale count is not positive
    InvalidAdc,
}

/// Multiplex tick periods
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MuxConfig {
    /// Speedometer tick (ms)
    pub speedo_tick_ms: u32,
    /// Tachometer bar tick (ms)
    pub tach_tick_ms: u32,
    /// Warning lamp tick (ms)
    pub lamps_tick_ms: u32,
}

impl Default for MuxConfig {
    fn default() -> Self {
        Self {
            speedo_tick_ms: 1,
            tach_tick_ms: 1,
            lamps_tick_ms: 2,
        }
    }
}

/// Engine speed measurement
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RpmConfig {
    /// Sampling window (ms)
    pub window_ms: u32,
    /// Ignition pulses per crank revolution
    pub pulses_per_rev: u32,
}

impl Default for RpmConfig {
    fn default() -> Self {
        Self {
            window_ms: 200,
            pulses_per_rev: 2,
        }
    }
}

/// Tachometer bar geometry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TachConfig {
    /// RPM at which the bar is full
    pub max_rpm: u32,
    /// LEDs on the bar
    pub leds: u8,
}

impl Default for TachConfig {
    fn default() -> Self {
        Self {
            max_rpm: 8000,
            leds: 29,
        }
    }
}

/// Vehicle speed measurement
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpeedConfig {
    /// Sampling window (ms)
    pub window_ms: u32,
    /// Distance per sensor pulse (m)
    pub meters_per_pulse: f32,
    /// Exponential smoothing factor, weight of the newest window
    pub alpha: f32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            window_ms: 100,
            meters_per_pulse: 1609.344 / 3200.0,
            alpha: 0.25,
        }
    }
}

/// Button handling
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ButtonConfig {
    /// Debounce delay (ms)
    pub debounce_ms: u32,
    /// Hold time for a long press (ms)
    pub long_press_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            long_press_ms: 1000,
        }
    }
}

/// Satellite telemetry link
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// Satellite 7-bit I2C address
    pub address: u8,
    /// Poll period (ms)
    pub poll_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            address: 0x42,
            poll_ms: 50,
        }
    }
}

/// One point of the coolant sender curve
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TempPoint {
    /// Voltage at the ADC pin, after the divider
    pub volts: f32,
    /// Temperature at that voltage (°C)
    pub celsius: i16,
}

impl TempPoint {
    pub const fn new(volts: f32, celsius: i16) -> Self {
        Self { volts, celsius }
    }
}

/// Analog gauges (coolant temperature, fuel)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalogConfig {
    /// ADC reference voltage
    pub adc_ref_v: f32,
    /// ADC full-scale count
    pub adc_max: u16,
    /// Low-pass weight of the newest reading
    pub filter_alpha: f32,
    /// Coolant sender curve, ascending in voltage
    pub temp_table: Vec<TempPoint, MAX_TEMP_POINTS>,
    /// Gauge bottom (°C)
    pub temp_min_c: i16,
    /// Gauge top (°C)
    pub temp_max_c: i16,
    /// Fuel sender voltage when empty
    pub fuel_empty_v: f32,
    /// Fuel sender voltage when full
    pub fuel_full_v: f32,
    /// Low fuel lamp threshold (%)
    pub low_fuel_percent: u8,
}

/// Stock coolant sender curve
pub const DEFAULT_TEMP_TABLE: [TempPoint; 6] = [
    TempPoint::new(0.35, 20),
    TempPoint::new(0.55, 40),
    TempPoint::new(0.80, 60),
    TempPoint::new(1.05, 80),
    TempPoint::new(1.30, 100),
    TempPoint::new(1.50, 110),
];

impl Default for AnalogConfig {
    fn default() -> Self {
        let mut temp_table = Vec::new();
        for point in DEFAULT_TEMP_TABLE {
            // Capacity exceeds the default table
            let _ = temp_table.push(point);
        }

        Self {
            adc_ref_v: 3.3,
            adc_max: 4095,
            filter_alpha: 0.1,
            temp_table,
            temp_min_c: 0,
            temp_max_c: 120,
            fuel_empty_v: 0.40,
            fuel_full_v: 1.80,
            low_fuel_percent: 20,
        }
    }
}

/// Complete dashboard configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DashConfig {
    pub mux: MuxConfig,
    pub rpm: RpmConfig,
    pub tach: TachConfig,
    pub speed: SpeedConfig,
    pub buttons: ButtonConfig,
    pub link: LinkConfig,
    pub analog: AnalogConfig,
}

/// Largest LED count the four-register tachometer chain can drive
pub const MAX_TACH_LEDS: u8 = 32;

fn valid_alpha(alpha: f32) -> bool {
    alpha > 0.0 && alpha <= 1.0
}

impl DashConfig {
    /// Check every value the firmware relies on
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mux = &self.mux;
        if mux.speedo_tick_ms == 0 || mux.tach_tick_ms == 0 || mux.lamps_tick_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }

        if self.rpm.window_ms == 0 || self.speed.window_ms == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.rpm.pulses_per_rev == 0 {
            return Err(ConfigError::ZeroPulsesPerRev);
        }

        if self.tach.max_rpm == 0 {
            return Err(ConfigError::ZeroMaxRpm);
        }
        if self.tach.leds == 0 || self.tach.leds > MAX_TACH_LEDS {
            return Err(ConfigError::InvalidLedCount);
        }

        // NaN fails the comparison as well
        if !(self.speed.meters_per_pulse > 0.0) {
            return Err(ConfigError::InvalidMetersPerPulse);
        }
        if !valid_alpha(self.speed.alpha) || !valid_alpha(self.analog.filter_alpha) {
            return Err(ConfigError::InvalidAlpha);
        }

        // 0x00-0x07 and 0x78-0x7F are reserved
        if !(0x08..=0x77).contains(&self.link.address) {
            return Err(ConfigError::InvalidAddress);
        }
        if self.link.poll_ms == 0 {
            return Err(ConfigError::ZeroPollPeriod);
        }

        self.analog.validate()
    }
}

impl AnalogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.adc_ref_v > 0.0) || self.adc_max == 0 {
            return Err(ConfigError::InvalidAdc);
        }
        if !(self.fuel_full_v > self.fuel_empty_v) {
            return Err(ConfigError::InvalidFuelWindow);
        }
        if self.low_fuel_percent > 100 {
            return Err(ConfigError::InvalidLowFuelThreshold);
        }
        if self.temp_max_c <= self.temp_min_c {
            return Err(ConfigError::InvalidTempRange);
        }

        let table = &self.temp_table;
        if table.len() < 2 || table.windows(2).any(|w| !(w[1].volts > w[0].volts)) {
            return Err(ConfigError::InvalidTempTable);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(DashConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_matches_stock_hardware() {
        let config = DashConfig::default();
        assert_eq!(config.mux.lamps_tick_ms, 2);
        assert_eq!(config.rpm.window_ms, 200);
        assert_eq!(config.rpm.pulses_per_rev, 2);
        assert_eq!(config.tach.leds, 29);
        assert_eq!(config.link.address, 0x42);
        assert_eq!(config.analog.temp_table.len(), 6);
        assert!((config.speed.meters_per_pulse - 0.50292).abs() < 1e-4);
    }

    #[test]
    fn test_rejects_zero_tick() {
        let mut config = DashConfig::default();
        config.mux.tach_tick_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickPeriod));
    }

    #[test]
    fn test_rejects_zero_pulses_per_rev() {
        let mut config = DashConfig::default();
        config.rpm.pulses_per_rev = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPulsesPerRev));
    }

    #[test]
    fn test_rejects_bad_calibration() {
        let mut config = DashConfig::default();
        config.speed.meters_per_pulse = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidMetersPerPulse));

        config.speed.meters_per_pulse = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::InvalidMetersPerPulse));
    }

    #[test]
    fn test_rejects_alpha_out_of_range() {
        let mut config = DashConfig::default();
        config.speed.alpha = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::InvalidAlpha));

        let mut config = DashConfig::default();
        config.analog.filter_alpha = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidAlpha));
    }

    #[test]
    fn test_rejects_reserved_address() {
        let mut config = DashConfig::default();
        config.link.address = 0x7F;
        assert_eq!(config.validate(), Err(ConfigError::InvalidAddress));
    }

    #[test]
    fn test_rejects_oversized_bar() {
        let mut config = DashConfig::default();
        config.tach.leds = 33;
        assert_eq!(config.validate(), Err(ConfigError::InvalidLedCount));
    }

    #[test]
    fn test_rejects_inverted_fuel_window() {
        let mut config = DashConfig::default();
        config.analog.fuel_empty_v = 2.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFuelWindow));
    }

    #[test]
    fn test_rejects_unsorted_temp_table() {
        let mut config = DashConfig::default();
        config.analog.temp_table.swap(1, 2);
        assert_eq!(config.validate(), Err(ConfigError::InvalidTempTable));

        config.analog.temp_table.truncate(1);
        assert_eq!(config.validate(), Err(ConfigError::InvalidTempTable));
    }
}
