//! Interrupt source masking for the interrupt executor
//!
//! Edge counting and the multiplex ticks run on an
//! `embassy_executor::InterruptExecutor` pended through a software
//! interrupt. Masking that one NVIC line holds back every task on the
//! executor without touching the time driver or other peripherals.

use embassy_rp::interrupt::{Interrupt, InterruptExt};

/// NVIC line of an interrupt executor
#[derive(Clone, Copy)]
pub struct ExecutorIrq {
    irq: Interrupt,
}

impl ExecutorIrq {
    pub const fn new(irq: Interrupt) -> Self {
        Self { irq }
    }
}

impl nina_hal::IrqSource for ExecutorIrq {
    fn mask(&mut self) {
        self.irq.disable();
        // Make sure the disable has landed before touching shared state
        cortex_m::asm::dsb();
        cortex_m::asm::isb();
    }

    fn unmask(&mut self) {
        // SAFETY: the executor's handler was installed before the first
        // mask and only re-enables the line it already owned.
        unsafe { self.irq.enable() };
    }
}
