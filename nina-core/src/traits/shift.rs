//! Shift-register output chain

/// A chain of serial-in/parallel-out registers sharing one latch
///
/// `regs[0]` is the register wired to the MCU, higher indices sit further
/// down the chain. Implementations shift the buffer out highest index first,
/// MSB first, and latch exactly once after the last bit so the outputs change
/// together.
pub trait ShiftOut {
    /// Shift `regs` into the chain and latch
    ///
    /// Called from the multiplex tick; must not block.
    fn shift_out(&mut self, regs: &[u8]);
}

impl<T: ShiftOut + ?Sized> ShiftOut for &mut T {
    fn shift_out(&mut self, regs: &[u8]) {
        (**self).shift_out(regs);
    }
}
