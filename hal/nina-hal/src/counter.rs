//! Hardware edge counters

/// Free-running 16-bit edge counter
///
/// Counts edges in hardware, so no edge is lost while interrupts are
/// masked. The count wraps at 2^16 and is never cleared by the reader.
pub trait EdgeCounter {
    /// Current count
    fn count(&self) -> u16;
}

impl<T: EdgeCounter + ?Sized> EdgeCounter for &T {
    fn count(&self) -> u16 {
        (**self).count()
    }
}
