//! Vehicle speed from a wheel-speed pulse sensor
//!
//! Unlike [`RateSampler`](super::RateSampler) the speed window is divided by
//! the time that actually elapsed since the previous sample, so a late poll
//! does not read as a speed spike. The raw value is then smoothed with a
//! single-pole exponential filter.

use nina_hal::IrqSource;

use super::pulse::PulseCounter;

/// Metres per sensor pulse for a 3200 pulses-per-mile sender
pub const DEFAULT_METERS_PER_PULSE: f32 = 1609.344 / 3200.0;

/// Default smoothing factor (weight of the newest sample)
pub const DEFAULT_ALPHA: f32 = 0.25;

/// Default sampling window
pub const DEFAULT_WINDOW_MS: u32 = 100;

/// m/s to km/h
const MPS_TO_KPH: f32 = 3.6;

/// Smoothed speed sampler
#[derive(Debug)]
pub struct SpeedSampler<'a> {
    counter: &'a PulseCounter,
    window_ms: u32,
    meters_per_pulse: f32,
    alpha: f32,
    window_start_ms: u32,
    raw_kph: f32,
    smoothed_kph: f32,
    /// Pulses drained since the last calibration reset
    drained: u32,
}

impl<'a> SpeedSampler<'a> {
    /// Create a sampler with explicit calibration
    ///
    /// `alpha` is clamped to `[0, 1]`. A non-positive `meters_per_pulse`
    /// falls back to [`DEFAULT_METERS_PER_PULSE`].
    pub fn new(counter: &'a PulseCounter, window_ms: u32, meters_per_pulse: f32, alpha: f32) -> Self {
        let meters_per_pulse = if meters_per_pulse > 0.0 {
            meters_per_pulse
        } else {
            DEFAULT_METERS_PER_PULSE
        };

        Self {
            counter,
            window_ms,
            meters_per_pulse,
            alpha: alpha.clamp(0.0, 1.0),
            window_start_ms: 0,
            raw_kph: 0.0,
            smoothed_kph: 0.0,
            drained: 0,
        }
    }

    /// Create a sampler with the stock calibration
    pub fn with_defaults(counter: &'a PulseCounter) -> Self {
        Self::new(counter, DEFAULT_WINDOW_MS, DEFAULT_METERS_PER_PULSE, DEFAULT_ALPHA)
    }

    /// Start the first window at `now_ms`, discarding earlier pulses
    pub fn begin<S: IrqSource + ?Sized>(&mut self, source: &mut S, now_ms: u32) {
        self.counter.reset(source);
        self.window_start_ms = now_ms;
    }

    /// Close the window if it has elapsed
    ///
    /// Returns the smoothed speed in km/h when a window closed.
    pub fn sample_window<S: IrqSource + ?Sized>(
        &mut self,
        source: &mut S,
        now_ms: u32,
    ) -> Option<f32> {
        let dt_ms = now_ms.wrapping_sub(self.window_start_ms);
        if dt_ms < self.window_ms || dt_ms == 0 {
            return None;
        }

        let pulses = self.counter.take(source);
        self.drained = self.drained.wrapping_add(pulses);
        self.window_start_ms = now_ms;

        let meters = pulses as f32 * self.meters_per_pulse;
        let seconds = dt_ms as f32 / 1000.0;
        self.raw_kph = meters / seconds * MPS_TO_KPH;
        self.smoothed_kph = self.alpha * self.raw_kph + (1.0 - self.alpha) * self.smoothed_kph;

        Some(self.smoothed_kph)
    }

    /// Smoothed speed in km/h
    pub fn current_speed(&self) -> f32 {
        self.smoothed_kph
    }

    /// Unsmoothed speed of the last window in km/h
    pub fn raw_speed(&self) -> f32 {
        self.raw_kph
    }

    /// Smoothed speed in tenths of km/h, rounded and saturated to `u16`
    pub fn speed_x10(&self) -> u16 {
        kph_to_x10(self.smoothed_kph)
    }

    /// Change the calibration
    ///
    /// Non-positive values are ignored.
    pub fn set_meters_per_pulse(&mut self, meters_per_pulse: f32) {
        if meters_per_pulse > 0.0 {
            self.meters_per_pulse = meters_per_pulse;
        }
    }

    pub fn meters_per_pulse(&self) -> f32 {
        self.meters_per_pulse
    }

    /// Pulses seen since the last [`reset_pulses`](Self::reset_pulses)
    ///
    /// Includes pulses of the window still in progress.
    pub fn pulses_since_reset(&self) -> u32 {
        self.drained.wrapping_add(self.counter.peek())
    }

    /// Restart the calibration pulse count
    ///
    /// The in-progress window is untouched, only the count baseline moves.
    pub fn reset_pulses(&mut self) {
        self.drained = 0u32.wrapping_sub(self.counter.peek());
    }
}

/// km/h to tenths of km/h, rounded and saturated
///
/// Rounded rather than truncated so float error just below a tenth, as in
/// 89.99998 for an exact 90 km/h window, does not drop a digit.
pub fn kph_to_x10(kph: f32) -> u16 {
    if kph.is_nan() || kph <= 0.0 {
        return 0;
    }
    let scaled = kph * 10.0 + 0.5;
    if scaled >= u16::MAX as f32 {
        u16::MAX
    } else {
        scaled as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::pulse::tests::MockIrq;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_raw_speed_uses_actual_elapsed_time() {
        let counter = PulseCounter::new();
        let mut irq = MockIrq::default();
        // 1 m/pulse, no smoothing
        let mut sampler = SpeedSampler::new(&counter, 100, 1.0, 1.0);
        sampler.begin(&mut irq, 0);

        for _ in 0..5 {
            counter.on_edge();
        }
        // 5 m in 200 ms = 25 m/s = 90 km/h
        let speed = sampler.sample_window(&mut irq, 200).unwrap();
        assert!(approx(speed, 90.0), "got {speed}");
        assert_eq!(sampler.speed_x10(), 900);
    }

    #[test]
    fn test_smoothing_converges() {
        let counter = PulseCounter::new();
        let mut irq = MockIrq::default();
        let mut sampler = SpeedSampler::new(&counter, 100, 1.0, 0.25);
        sampler.begin(&mut irq, 0);

        // Steady 36 km/h: 1 pulse per 100 ms
        counter.on_edge();
        let first = sampler.sample_window(&mut irq, 100).unwrap();
        assert!(approx(first, 9.0), "first window weighted by alpha, got {first}");

        let mut now = 100;
        for _ in 0..60 {
            counter.on_edge();
            now += 100;
            sampler.sample_window(&mut irq, now);
        }
        assert!(approx(sampler.current_speed(), 36.0));
        assert!(approx(sampler.raw_speed(), 36.0));
    }

    #[test]
    fn test_early_sample_is_noop() {
        let counter = PulseCounter::new();
        let mut irq = MockIrq::default();
        let mut sampler = SpeedSampler::with_defaults(&counter);
        sampler.begin(&mut irq, 0);

        counter.on_edge();
        assert_eq!(sampler.sample_window(&mut irq, 99), None);
        assert_eq!(counter.peek(), 1);
    }

    #[test]
    fn test_set_meters_per_pulse_ignores_non_positive() {
        let counter = PulseCounter::new();
        let mut sampler = SpeedSampler::with_defaults(&counter);

        sampler.set_meters_per_pulse(0.0);
        sampler.set_meters_per_pulse(-2.0);
        assert_eq!(sampler.meters_per_pulse(), DEFAULT_METERS_PER_PULSE);

        sampler.set_meters_per_pulse(0.4);
        assert_eq!(sampler.meters_per_pulse(), 0.4);
    }

    #[test]
    fn test_constructor_rejects_bad_calibration() {
        let counter = PulseCounter::new();
        let sampler = SpeedSampler::new(&counter, 100, -1.0, 3.0);
        assert_eq!(sampler.meters_per_pulse(), DEFAULT_METERS_PER_PULSE);
    }

    #[test]
    fn test_pulses_since_reset_spans_windows() {
        let counter = PulseCounter::new();
        let mut irq = MockIrq::default();
        let mut sampler = SpeedSampler::with_defaults(&counter);
        sampler.begin(&mut irq, 0);

        for _ in 0..10 {
            counter.on_edge();
        }
        sampler.sample_window(&mut irq, 100);
        for _ in 0..3 {
            counter.on_edge();
        }
        assert_eq!(sampler.pulses_since_reset(), 13);

        sampler.reset_pulses();
        assert_eq!(sampler.pulses_since_reset(), 0);
        counter.on_edge();
        sampler.sample_window(&mut irq, 200);
        assert_eq!(sampler.pulses_since_reset(), 1);
    }

    #[test]
    fn test_kph_to_x10() {
        assert_eq!(kph_to_x10(0.0), 0);
        assert_eq!(kph_to_x10(-4.0), 0);
        assert_eq!(kph_to_x10(f32::NAN), 0);
        assert_eq!(kph_to_x10(12.34), 123);
        assert_eq!(kph_to_x10(12.36), 124);
        assert_eq!(kph_to_x10(1.0e6), u16::MAX);
    }

    #[test]
    fn test_kph_to_x10_absorbs_float_error() {
        assert_eq!(kph_to_x10(89.99998), 900);
        assert_eq!(kph_to_x10(0.04), 0);
        assert_eq!(kph_to_x10(0.05), 1);
    }
}
