//! Interrupt source masking
//!
//! Values shared between an interrupt handler and the polling loop are
//! read-modify-written by the loop only while the one interrupt source that
//! writes them is masked. This module names that source explicitly instead
//! of reaching for a global "disable all interrupts".

/// A single maskable interrupt source
///
/// Implementations must make `mask` take effect before returning: once it
/// returns, the handler for this source will not start until `unmask`.
pub trait IrqSource {
    /// Prevent the interrupt from being serviced
    fn mask(&mut self);

    /// Allow the interrupt to be serviced again
    ///
    /// A request that arrived while masked is serviced right after this call.
    fn unmask(&mut self);
}

impl<T: IrqSource + ?Sized> IrqSource for &mut T {
    fn mask(&mut self) {
        (**self).mask();
    }

    fn unmask(&mut self) {
        (**self).unmask();
    }
}

/// RAII critical section over one interrupt source
///
/// The source is masked on construction and unmasked on drop, so the masked
/// window is exactly the guard's scope.
pub struct MaskGuard<'a, S: IrqSource + ?Sized> {
    source: &'a mut S,
}

impl<'a, S: IrqSource + ?Sized> MaskGuard<'a, S> {
    /// Mask `source` until the guard is dropped
    pub fn new(source: &'a mut S) -> Self {
        source.mask();
        Self { source }
    }
}

impl<S: IrqSource + ?Sized> Drop for MaskGuard<'_, S> {
    fn drop(&mut self) {
        self.source.unmask();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockIrq {
        masked: bool,
        mask_calls: u32,
        unmask_calls: u32,
    }

    impl IrqSource for MockIrq {
        fn mask(&mut self) {
            self.masked = true;
            self.mask_calls += 1;
        }

        fn unmask(&mut self) {
            self.masked = false;
            self.unmask_calls += 1;
        }
    }

    #[test]
    fn test_guard_masks_for_scope() {
        let mut irq = MockIrq::default();
        {
            let guard = MaskGuard::new(&mut irq);
            assert!(guard.source.masked);
        }
        assert!(!irq.masked);
        assert_eq!(irq.mask_calls, 1);
        assert_eq!(irq.unmask_calls, 1);
    }

    #[test]
    fn test_guard_through_reference() {
        let mut irq = MockIrq::default();
        let mut source = &mut irq;
        drop(MaskGuard::new(&mut source));
        assert_eq!(irq.mask_calls, 1);
        assert!(!irq.masked);
    }
}
