//! Debounced push button
//!
//! Polled at loop cadence with the raw line level. A level has to stay
//! unchanged for the debounce delay before it is committed; every change of
//! the raw level restarts the timer, so contact bounce never reaches the
//! committed state.

use nina_hal::gpio::Polarity;

/// Default debounce delay
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Committed line state as seen by the debouncer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Raw level differs from the committed one and is still settling
    Unstable,
    /// Line committed low
    StableLow,
    /// Line committed high
    StableHigh,
}

/// Debounced button with a pending-press count
#[derive(Debug, Clone)]
pub struct DebouncedButton {
    polarity: Polarity,
    debounce_ms: u32,
    /// Last raw line level
    raw_high: bool,
    /// When the raw line last changed
    raw_since_ms: u32,
    /// Committed line level
    stable_high: bool,
    /// When the committed level was first seen on the raw line
    stable_since_ms: u32,
    /// Committed presses not yet consumed
    pending_presses: u8,
}

impl DebouncedButton {
    /// Create a button, released, with no pending press
    pub const fn new(polarity: Polarity, debounce_ms: u32) -> Self {
        // Released line level for this polarity
        let idle_high = matches!(polarity, Polarity::ActiveLow);
        Self {
            polarity,
            debounce_ms,
            raw_high: idle_high,
            raw_since_ms: 0,
            stable_high: idle_high,
            stable_since_ms: 0,
            pending_presses: 0,
        }
    }

    /// Active-low button with the default delay
    pub const fn active_low() -> Self {
        Self::new(Polarity::ActiveLow, DEFAULT_DEBOUNCE_MS)
    }

    /// Adopt the current line level as stable
    ///
    /// Does not count a press, so a button held through start-up is not
    /// reported as one.
    pub fn begin(&mut self, line_high: bool, now_ms: u32) {
        self.raw_high = line_high;
        self.raw_since_ms = now_ms;
        self.stable_high = line_high;
        self.stable_since_ms = now_ms;
        self.pending_presses = 0;
    }

    /// Feed one raw sample
    pub fn update(&mut self, line_high: bool, now_ms: u32) {
        if line_high != self.raw_high {
            self.raw_high = line_high;
            self.raw_since_ms = now_ms;
        }

        if self.raw_high != self.stable_high
            && now_ms.wrapping_sub(self.raw_since_ms) >= self.debounce_ms
        {
            self.stable_high = self.raw_high;
            self.stable_since_ms = self.raw_since_ms;

            if self.polarity.is_active(self.stable_high) {
                self.pending_presses = self.pending_presses.saturating_add(1);
            }
        }
    }

    /// Committed pressed level
    pub fn is_pressed(&self) -> bool {
        self.polarity.is_active(self.stable_high)
    }

    /// Consume one pending press
    ///
    /// True once per committed press, so presses committed between two
    /// calls are each reported.
    pub fn was_pressed(&mut self) -> bool {
        if self.pending_presses == 0 {
            return false;
        }
        self.pending_presses -= 1;
        true
    }

    /// How long the committed press has been held, 0 when released
    pub fn held_for(&self, now_ms: u32) -> u32 {
        if self.is_pressed() {
            now_ms.wrapping_sub(self.stable_since_ms)
        } else {
            0
        }
    }

    pub fn state(&self) -> ButtonState {
        match (self.raw_high == self.stable_high, self.stable_high) {
            (false, _) => ButtonState::Unstable,
            (true, true) => ButtonState::StableHigh,
            (true, false) => ButtonState::StableLow,
        }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }
}

impl Default for DebouncedButton {
    fn default() -> Self {
        Self::active_low()
    }
}
