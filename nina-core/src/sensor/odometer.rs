//! Trip odometer
//!
//! Integrates vehicle speed over loop time. Volatile: the distance starts at
//! zero on every boot.

/// Speeds at or below this are treated as standstill (sensor noise)
pub const STANDSTILL_KPH: f32 = 0.1;

/// Distance integrator
#[derive(Debug, Clone, Default)]
pub struct Odometer {
    meters: u32,
    /// Sub-metre remainder carried between updates
    fraction_m: f32,
    last_update_ms: Option<u32>,
}

impl Odometer {
    pub const fn new() -> Self {
        Self {
            meters: 0,
            fraction_m: 0.0,
            last_update_ms: None,
        }
    }

    /// Integrate `speed_kph` over the time since the previous update
    ///
    /// The first call only records the timestamp.
    pub fn update(&mut self, speed_kph: f32, now_ms: u32) {
        let Some(last) = self.last_update_ms.replace(now_ms) else {
            return;
        };

        if speed_kph.is_nan() || speed_kph <= STANDSTILL_KPH {
            return;
        }

        let dt_ms = now_ms.wrapping_sub(last);
        // km/h * ms / 3600 = m
        let distance_m = self.fraction_m + speed_kph * dt_ms as f32 / 3600.0;
        let whole = distance_m as u32;
        self.meters = self.meters.saturating_add(whole);
        self.fraction_m = distance_m - whole as f32;
    }

    /// Whole metres travelled
    pub fn meters(&self) -> u32 {
        self.meters
    }

    /// Whole kilometres travelled
    pub fn km(&self) -> u32 {
        self.meters / 1000
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_only_stamps() {
        let mut odo = Odometer::new();
        odo.update(100.0, 5_000);
        assert_eq!(odo.meters(), 0);
    }

    #[test]
    fn test_integrates_distance() {
        let mut odo = Odometer::new();
        odo.update(36.0, 0);
        // 36 km/h = 10 m/s, ten 100 ms steps = 10 m
        for i in 1..=10 {
            odo.update(36.0, i * 100);
        }
        assert_eq!(odo.meters(), 10);
    }

    #[test]
    fn test_keeps_sub_metre_remainder() {
        let mut odo = Odometer::new();
        odo.update(3.6, 0);
        // 1 m/s in 10 ms steps: 1 cm each, truncation would lose everything
        let mut now = 0;
        for _ in 0..250 {
            now += 10;
            odo.update(3.6, now);
        }
        assert_eq!(odo.meters(), 2);
    }

    #[test]
    fn test_standstill_does_not_drift() {
        let mut odo = Odometer::new();
        odo.update(0.05, 0);
        odo.update(0.05, 3_600_000);
        assert_eq!(odo.meters(), 0);
    }

    #[test]
    fn test_km_and_reset() {
        let mut odo = Odometer::new();
        odo.update(120.0, 0);
        odo.update(120.0, 60_000); // one minute at 120 = 2 km
        assert_eq!(odo.km(), 2);

        odo.reset();
        assert_eq!(odo.meters(), 0);
        odo.update(120.0, 70_000);
        assert_eq!(odo.meters(), 0);
    }
}
