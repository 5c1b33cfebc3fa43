//! Windowed pulse-rate sampler
//!
//! Converts the pulses accumulated by a [`PulseCounter`] over a fixed
//! window into a rate:
//!
//! ```text
//! rate = pulses / pulses_per_unit / (window_ms / unit_ms)
//!      = pulses * unit_ms / (pulses_per_unit * window_ms)
//! ```
//!
//! For the tachometer `unit_ms` is one minute and the result is RPM. The
//! arithmetic is integer and truncating, in 64 bits so a full 32-bit pulse
//! count cannot overflow the numerator.

use nina_hal::IrqSource;

use super::pulse::PulseCounter;

/// Milliseconds per minute, the unit time for RPM
pub const MINUTE_MS: u32 = 60_000;

/// Rate from a pulse count over a window
///
/// Returns 0 for a zero-length window or zero pulses-per-unit rather than
/// dividing by zero. Saturates at `u32::MAX`.
pub fn pulses_to_rate(pulses: u32, pulses_per_unit: u32, window_ms: u32, unit_ms: u32) -> u32 {
    let denominator = pulses_per_unit as u64 * window_ms as u64;
    if denominator == 0 {
        return 0;
    }

    let rate = pulses as u64 * unit_ms as u64 / denominator;
    rate.min(u32::MAX as u64) as u32
}

/// Fixed-window rate sampler over one pulse counter
///
/// Owned by the polling loop. The counter itself is shared with the
/// interrupt handler, the sampler is not.
#[derive(Debug)]
pub struct RateSampler<'a> {
    counter: &'a PulseCounter,
    window_ms: u32,
    pulses_per_unit: u32,
    unit_ms: u32,
    window_start_ms: u32,
    rate: u32,
}

impl<'a> RateSampler<'a> {
    /// Create a sampler
    ///
    /// # Arguments
    /// - `counter`: Pulse counter fed by the sensor's edge interrupt
    /// - `window_ms`: Sampling window
    /// - `pulses_per_unit`: Pulses per revolution (or per distance unit)
    /// - `unit_ms`: Time unit of the resulting rate
    pub const fn new(
        counter: &'a PulseCounter,
        window_ms: u32,
        pulses_per_unit: u32,
        unit_ms: u32,
    ) -> Self {
        Self {
            counter,
            window_ms,
            pulses_per_unit,
            unit_ms,
            window_start_ms: 0,
            rate: 0,
        }
    }

    /// Create an RPM sampler
    pub const fn rpm(counter: &'a PulseCounter, window_ms: u32, pulses_per_rev: u32) -> Self {
        Self::new(counter, window_ms, pulses_per_rev, MINUTE_MS)
    }

    /// Start the first window at `now_ms`
    ///
    /// Pulses that arrived before this call are discarded.
    pub fn begin<S: IrqSource + ?Sized>(&mut self, source: &mut S, now_ms: u32) {
        self.counter.reset(source);
        self.window_start_ms = now_ms;
        self.rate = 0;
    }

    /// Close the window if it has elapsed
    ///
    /// Returns the new rate when a window closed, `None` when called early.
    /// `source` is the edge interrupt feeding the counter; it is masked only
    /// for the drain.
    pub fn sample_window<S: IrqSource + ?Sized>(
        &mut self,
        source: &mut S,
        now_ms: u32,
    ) -> Option<u32> {
        let elapsed = now_ms.wrapping_sub(self.window_start_ms);
        if elapsed < self.window_ms {
            return None;
        }

        let pulses = self.counter.take(source);
        self.rate = pulses_to_rate(pulses, self.pulses_per_unit, self.window_ms, self.unit_ms);
        self.window_start_ms = now_ms;

        Some(self.rate)
    }

    /// Rate computed at the end of the last window
    pub fn current_rate(&self) -> u32 {
        self.rate
    }

    /// Configured window length
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }
}
