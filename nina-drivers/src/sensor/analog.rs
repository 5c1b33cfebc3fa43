//! Coolant temperature and fuel level gauges
//!
//! Both senders are resistive and read through a divider on an ADC pin.
//! Readings are low-pass filtered, converted to pin voltage, then:
//!
//! - coolant: linear interpolation over a voltage → °C table, clamped to the
//!   gauge range and mapped to 0-100 %
//! - fuel: linear map of the empty..full voltage window to 0-100 %

use nina_core::config::{AnalogConfig, TempPoint};
use nina_hal::AdcReader;

/// Errors that can occur with analog sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// ADC conversion failed
    ConversionError,
}

/// Temperature for a pin voltage
///
/// Interpolates between the two table points around `volts`; below the
/// first or above the last point the end value is held. `table` must be
/// ascending in voltage and non-empty.
pub fn interpolate_temp(table: &[TempPoint], volts: f32) -> i16 {
    let (Some(first), Some(last)) = (table.first(), table.last()) else {
        return 0;
    };

    if volts <= first.volts {
        return first.celsius;
    }

    for pair in table.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        if volts <= p2.volts {
            let span = (p2.celsius - p1.celsius) as f32;
            let t = p1.celsius as f32 + span * (volts - p1.volts) / (p2.volts - p1.volts);
            return t as i16;
        }
    }

    last.celsius
}

/// Map `value` in `[lo, hi]` to a clamped percentage
fn percent(value: f32, lo: f32, hi: f32) -> u8 {
    let pct = (value - lo) / (hi - lo) * 100.0;
    pct.clamp(0.0, 100.0) as u8
}

/// Coolant and fuel gauges
pub struct AnalogGauges<T, F> {
    temp_adc: T,
    fuel_adc: F,
    config: AnalogConfig,
    /// Filtered raw counts; `None` until the first good reading
    temp_filtered: Option<f32>,
    fuel_filtered: Option<f32>,
}

impl<T: AdcReader, F: AdcReader> AnalogGauges<T, F> {
    pub fn new(temp_adc: T, fuel_adc: F, config: AnalogConfig) -> Self {
        Self {
            temp_adc,
            fuel_adc,
            config,
            temp_filtered: None,
            fuel_filtered: None,
        }
    }

    /// Take one reading from each sender
    ///
    /// The first good reading seeds the filter. A failed conversion leaves
    /// that gauge's value unchanged; the other gauge still updates.
    pub fn update(&mut self) -> Result<(), SensorError> {
        let alpha = self.config.filter_alpha;

        let temp = self.temp_adc.read().map_err(|_| SensorError::ConversionError);
        if let Ok(raw) = temp {
            filter(&mut self.temp_filtered, raw, alpha);
        }

        let fuel = self.fuel_adc.read().map_err(|_| SensorError::ConversionError);
        if let Ok(raw) = fuel {
            filter(&mut self.fuel_filtered, raw, alpha);
        }

        temp.and(fuel).map(|_| ())
    }

    fn volts(&self, counts: f32) -> f32 {
        counts / self.config.adc_max as f32 * self.config.adc_ref_v
    }

    /// Coolant temperature (°C), clamped to the gauge range
    pub fn temp_c(&self) -> i16 {
        let volts = self.volts(self.temp_filtered.unwrap_or(0.0));
        interpolate_temp(&self.config.temp_table, volts)
            .clamp(self.config.temp_min_c, self.config.temp_max_c)
    }

    /// Coolant temperature as gauge position
    pub fn temp_percent(&self) -> u8 {
        percent(
            self.temp_c() as f32,
            self.config.temp_min_c as f32,
            self.config.temp_max_c as f32,
        )
    }

    /// Fuel level
    pub fn fuel_percent(&self) -> u8 {
        let volts = self.volts(self.fuel_filtered.unwrap_or(0.0));
        percent(volts, self.config.fuel_empty_v, self.config.fuel_full_v)
    }

    /// Fuel below the warning threshold
    ///
    /// False until the fuel sender has been read once.
    pub fn is_low_fuel(&self) -> bool {
        self.fuel_filtered.is_some() && self.fuel_percent() < self.config.low_fuel_percent
    }

    pub fn config(&self) -> &AnalogConfig {
        &self.config
    }
}

fn filter(state: &mut Option<f32>, raw: u16, alpha: f32) {
    let raw = raw as f32;
    *state = Some(match *state {
        Some(prev) => prev * (1.0 - alpha) + raw * alpha,
        None => raw,
    });
}

/// Fixed-value ADC for testing
#[cfg(test)]
pub struct DummyAdc(pub Result<u16, SensorError>);

#[cfg(test)]
impl AdcReader for DummyAdc {
    type Error = SensorError;

    fn read(&mut self) -> Result<u16, SensorError> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nina_core::config::DEFAULT_TEMP_TABLE;

    /// Counts for a pin voltage with the default 3.3 V / 4095 scaling
    fn counts(volts: f32) -> u16 {
        (volts / 3.3 * 4095.0 + 0.5) as u16
    }

    fn gauges(temp_v: f32, fuel_v: f32) -> AnalogGauges<DummyAdc, DummyAdc> {
        let mut gauges = AnalogGauges::new(
            DummyAdc(Ok(counts(temp_v))),
            DummyAdc(Ok(counts(fuel_v))),
            AnalogConfig::default(),
        );
        gauges.update().unwrap();
        gauges
    }

    #[test]
    fn test_interpolate_table_points() {
        assert_eq!(interpolate_temp(&DEFAULT_TEMP_TABLE, 0.55), 40);
        assert_eq!(interpolate_temp(&DEFAULT_TEMP_TABLE, 1.50), 110);
    }

    #[test]
    fn test_interpolate_between_points() {
        // 0.80 V is 60, 1.05 V is 80
        assert_eq!(interpolate_temp(&DEFAULT_TEMP_TABLE, 0.93), 70);
    }

    #[test]
    fn test_interpolate_holds_ends() {
        assert_eq!(interpolate_temp(&DEFAULT_TEMP_TABLE, 0.0), 20);
        assert_eq!(interpolate_temp(&DEFAULT_TEMP_TABLE, 3.0), 110);
        assert_eq!(interpolate_temp(&[], 1.0), 0);
    }

    #[test]
    fn test_temp_gauge() {
        let gauges = gauges(1.30, 1.0);
        let t = gauges.temp_c();
        assert!((99..=100).contains(&t), "got {t}");
        // 100 °C on a 0-120 °C gauge
        assert!((82..=83).contains(&gauges.temp_percent()));
    }

    #[test]
    fn test_fuel_window() {
        assert_eq!(gauges(1.0, 0.2).fuel_percent(), 0);
        assert_eq!(gauges(1.0, 2.5).fuel_percent(), 100);

        let half = gauges(1.0, 1.10).fuel_percent();
        assert!((49..=50).contains(&half), "got {half}");
    }

    #[test]
    fn test_low_fuel_threshold() {
        // 0.40 + 0.1 * 1.40 = 0.54 V is 10 %
        assert!(gauges(1.0, 0.54).is_low_fuel());
        assert!(!gauges(1.0, 1.0).is_low_fuel());
    }

    #[test]
    fn test_filter_smooths_step() {
        let mut gauges = AnalogGauges::new(
            DummyAdc(Ok(0)),
            DummyAdc(Ok(1000)),
            AnalogConfig::default(),
        );
        gauges.update().unwrap();
        assert_eq!(gauges.fuel_filtered, Some(1000.0));

        gauges.fuel_adc = DummyAdc(Ok(2000));
        gauges.update().unwrap();
        let filtered = gauges.fuel_filtered.unwrap();
        assert!((filtered - 1100.0).abs() < 0.01, "got {filtered}");
    }

    #[test]
    fn test_failed_read_keeps_value() {
        let mut gauges = AnalogGauges::new(
            DummyAdc(Err(SensorError::ConversionError)),
            DummyAdc(Ok(counts(1.10))),
            AnalogConfig::default(),
        );
        assert_eq!(gauges.update(), Err(SensorError::ConversionError));
        assert!(gauges.temp_filtered.is_none());
        assert!(gauges.fuel_filtered.is_some());
        // Unread coolant sender holds the coldest table point
        assert_eq!(gauges.temp_percent(), 16);
    }

    #[test]
    fn test_no_low_fuel_before_first_reading() {
        let gauges = AnalogGauges::new(
            DummyAdc(Err(SensorError::ConversionError)),
            DummyAdc(Err(SensorError::ConversionError)),
            AnalogConfig::default(),
        );
        assert!(!gauges.is_low_fuel());
    }
}
