//! Interrupt-fed pulse counter
//!
//! One counter per physical pulse line. A hardware edge counter counts the
//! line; a high-priority task moves its deltas in through a
//! [`CounterBridge`], and the polling loop drains the total once per
//! sampling window.
//!
//! ```text
//!   PWM slice ──► CounterBridge::sync() ──► [ AtomicU32 ] ──► take(irq) ──► sampler
//!                                               ▲               │
//!                                               └── masked ─────┘
//! ```
//!
//! The read and the clear happen under one [`MaskGuard`] on the interrupt
//! source that feeds this counter, so an edge lands either in the drained
//! value or in the next window, never in both and never in neither.

use nina_hal::{EdgeCounter, IrqSource, MaskGuard};
use portable_atomic::{AtomicU32, Ordering};

/// Edge counter shared between an interrupt handler and the polling loop
///
/// Designed to live in a `static`:
///
/// ```
/// use nina_core::sensor::PulseCounter;
///
/// static RPM_PULSES: PulseCounter = PulseCounter::new();
/// RPM_PULSES.on_edge();
/// assert_eq!(RPM_PULSES.peek(), 1);
/// ```
#[derive(Debug)]
pub struct PulseCounter {
    count: AtomicU32,
}

impl Default for PulseCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseCounter {
    /// Create a counter at zero
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Record one edge
    ///
    /// Interrupt context only. Wraps at `u32::MAX`.
    #[inline(always)]
    pub fn on_edge(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record `edges` edges at once
    ///
    /// Interrupt context only. Wraps at `u32::MAX`.
    #[inline(always)]
    pub fn add(&self, edges: u32) {
        self.count.fetch_add(edges, Ordering::Relaxed);
    }

    /// Read and zero the counter with `source` masked
    ///
    /// `source` must be the interrupt that calls [`on_edge`](Self::on_edge)
    /// for this counter. The mask is held only across the swap.
    pub fn take<S: IrqSource + ?Sized>(&self, source: &mut S) -> u32 {
        let _guard = MaskGuard::new(source);
        self.count.swap(0, Ordering::AcqRel)
    }

    /// Read without clearing
    ///
    /// Used for calibration-by-distance, where the operator drives a known
    /// distance and reads the accumulated count.
    pub fn peek(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }

    /// Zero the counter with `source` masked
    pub fn reset<S: IrqSource + ?Sized>(&self, source: &mut S) {
        let _guard = MaskGuard::new(source);
        self.count.store(0, Ordering::Release);
    }
}

/// Feeds a [`PulseCounter`] from a free-running hardware counter
///
/// The hardware keeps counting while the polling loop has the interrupt
/// masked; only the transfer is deferred. [`sync`](Self::sync) must run at
/// least once per 2^16 edges.
pub struct CounterBridge<C> {
    counter: C,
    last: u16,
}

impl<C: EdgeCounter> CounterBridge<C> {
    /// Start from the counter's current value
    pub fn new(counter: C) -> Self {
        let last = counter.count();
        Self { counter, last }
    }

    /// Move the edges seen since the last sync into `pulses`
    ///
    /// Interrupt context only. Returns the number of edges moved.
    pub fn sync(&mut self, pulses: &PulseCounter) -> u32 {
        let now = self.counter.count();
        let edges = now.wrapping_sub(self.last) as u32;
        self.last = now;
        pulses.add(edges);
        edges
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::cell::Cell;

    /// Hardware counter the test advances by hand
    #[derive(Debug, Default)]
    pub struct MockCounter(pub Cell<u16>);

    impl MockCounter {
        pub fn advance(&self, edges: u16) {
            self.0.set(self.0.get().wrapping_add(edges));
        }
    }

    impl EdgeCounter for MockCounter {
        fn count(&self) -> u16 {
            self.0.get()
        }
    }

    /// Interrupt source that records every mask transition
    #[derive(Debug, Default)]
    pub struct MockIrq {
        pub masked: bool,
        pub mask_calls: u32,
    }

    impl IrqSource for MockIrq {
        fn mask(&mut self) {
            assert!(!self.masked, "nested mask");
            self.masked = true;
            self.mask_calls += 1;
        }

        fn unmask(&mut self) {
            assert!(self.masked, "unmask without mask");
            self.masked = false;
        }
    }

    #[test]
    fn test_take_drains_counter() {
        let counter = PulseCounter::new();
        let mut irq = MockIrq::default();

        for _ in 0..17 {
            counter.on_edge();
        }

        assert_eq!(counter.take(&mut irq), 17);
        assert_eq!(counter.take(&mut irq), 0);
        assert_eq!(irq.mask_calls, 2);
        assert!(!irq.masked);
    }

    #[test]
    fn test_edges_after_take_go_to_next_window() {
        let counter = PulseCounter::new();
        let mut irq = MockIrq::default();

        counter.on_edge();
        counter.on_edge();
        assert_eq!(counter.take(&mut irq), 2);

        counter.on_edge();
        assert_eq!(counter.peek(), 1);
        assert_eq!(counter.take(&mut irq), 1);
    }

    #[test]
    fn test_counter_wraps() {
        let counter = PulseCounter {
            count: AtomicU32::new(u32::MAX),
        };
        let mut irq = MockIrq::default();

        counter.on_edge();
        assert_eq!(counter.take(&mut irq), 0);
    }

    #[test]
    fn test_reset() {
        let counter = PulseCounter::new();
        let mut irq = MockIrq::default();

        counter.on_edge();
        counter.reset(&mut irq);
        assert_eq!(counter.peek(), 0);
        assert!(!irq.masked);
    }

    #[test]
    fn test_bridge_starts_from_current_count() {
        let hw = MockCounter(Cell::new(500));
        let pulses = PulseCounter::new();
        let mut bridge = CounterBridge::new(&hw);

        assert_eq!(bridge.sync(&pulses), 0);
        hw.advance(7);
        assert_eq!(bridge.sync(&pulses), 7);
        assert_eq!(pulses.peek(), 7);
    }

    #[test]
    fn test_bridge_handles_hardware_wrap() {
        let hw = MockCounter(Cell::new(u16::MAX - 2));
        let pulses = PulseCounter::new();
        let mut bridge = CounterBridge::new(&hw);

        hw.advance(10);
        assert_eq!(hw.count(), 7);
        assert_eq!(bridge.sync(&pulses), 10);
        assert_eq!(pulses.peek(), 10);
    }

    #[test]
    fn test_edges_during_mask_are_kept() {
        let hw = MockCounter::default();
        let pulses = PulseCounter::new();
        let mut irq = MockIrq::default();
        let mut bridge = CounterBridge::new(&hw);

        // Burst while the loop holds the mask: the bridge cannot run, the
        // hardware keeps counting
        {
            let _guard = MaskGuard::new(&mut irq);
            hw.advance(3_000);
        }
        bridge.sync(&pulses);
        hw.advance(5);
        bridge.sync(&pulses);

        assert_eq!(pulses.take(&mut irq), 3_005);
    }

    #[test]
    fn test_concurrent_edges_are_never_lost() {
        use std::sync::Arc;
        use std::thread;

        // Host stand-in for the edge interrupt: a thread hammering on_edge
        // while the "main loop" drains. Masking is a no-op here; the atomic
        // swap alone must keep the total exact.
        struct NoIrq;
        impl IrqSource for NoIrq {
            fn mask(&mut self) {}
            fn unmask(&mut self) {}
        }

        let counter = Arc::new(PulseCounter::new());
        let producer = {
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..100_000 {
                    counter.on_edge();
                }
            })
        };

        let mut total = 0u64;
        while !producer.is_finished() {
            total += counter.take(&mut NoIrq) as u64;
        }
        producer.join().unwrap();
        total += counter.take(&mut NoIrq) as u64;

        assert_eq!(total, 100_000);
    }
}
