//! State shared between tasks
//!
//! The multiplex schedulers are touched from two executors: the tick tasks
//! on the interrupt executor and the dashboard loop in thread mode. Both
//! sides go through a critical-section mutex and keep the locked work short.
//! Pulse counters are plain atomics written by the count task.

use core::cell::{Cell, RefCell};

use defmt::Format;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicU32, Ordering};

use nina_core::mux::MultiplexScheduler;
use nina_core::render::{
    BarRenderer, LampBank, SpeedoRenderer, LAMP_REGISTERS, SPEEDO_REGISTERS, TACH_REGISTERS,
};
use nina_core::sensor::PulseCounter;
use nina_core::traits::ChannelRenderer;
use nina_drivers::link::LinkStats;
use nina_drivers::shift::Hc595Chain;
use nina_hal_rp2040::RpOutput;

/// A 74HC595 chain on three GPIOs
pub type Chain = Hc595Chain<RpOutput<'static>, RpOutput<'static>, RpOutput<'static>>;

pub type SpeedoMux = MultiplexScheduler<SpeedoRenderer, Chain, SPEEDO_REGISTERS>;
pub type TachMux = MultiplexScheduler<BarRenderer, Chain, TACH_REGISTERS>;
pub type LampMux = MultiplexScheduler<LampBank, Chain, LAMP_REGISTERS>;

/// A scheduler installed at boot
pub type MuxCell<M> = Mutex<CriticalSectionRawMutex, RefCell<Option<M>>>;

pub static SPEEDO: MuxCell<SpeedoMux> = Mutex::new(RefCell::new(None));
pub static TACH: MuxCell<TachMux> = Mutex::new(RefCell::new(None));
pub static LAMPS: MuxCell<LampMux> = Mutex::new(RefCell::new(None));

/// Ignition pulses, counted on the interrupt executor
pub static RPM_PULSES: PulseCounter = PulseCounter::new();

/// Run `f` on the renderer of an installed scheduler
///
/// Returns `None` before the scheduler is installed or while it has no
/// renderer.
pub fn with_renderer<R, const N: usize, U>(
    cell: &MuxCell<MultiplexScheduler<R, Chain, N>>,
    f: impl FnOnce(&mut R) -> U,
) -> Option<U>
where
    R: ChannelRenderer,
{
    cell.lock(|mux| mux.borrow_mut().as_mut()?.renderer_mut().map(f))
}

/// Tick timing of one multiplexer
pub struct TickHealth {
    ticks: AtomicU32,
    overruns: AtomicU32,
    worst_us: AtomicU32,
}

impl TickHealth {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            overruns: AtomicU32::new(0),
            worst_us: AtomicU32::new(0),
        }
    }

    /// Record one tick that took `elapsed_us` against a `period_us` budget
    pub fn record(&self, elapsed_us: u32, period_us: u32) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        if elapsed_us > period_us {
            self.overruns.fetch_add(1, Ordering::Relaxed);
        }
        self.worst_us.fetch_max(elapsed_us, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TickReport {
        TickReport {
            ticks: self.ticks.load(Ordering::Relaxed),
            overruns: self.overruns.load(Ordering::Relaxed),
            worst_us: self.worst_us.load(Ordering::Relaxed),
        }
    }
}

#[derive(Clone, Copy, Format)]
pub struct TickReport {
    pub ticks: u32,
    pub overruns: u32,
    pub worst_us: u32,
}

pub static SPEEDO_HEALTH: TickHealth = TickHealth::new();
pub static TACH_HEALTH: TickHealth = TickHealth::new();
pub static LAMPS_HEALTH: TickHealth = TickHealth::new();

/// Dashboard readings published by the main loop for the status log
#[derive(Clone, Copy, Format)]
pub struct DashStatus {
    pub uptime_s: u32,
    pub rpm: u32,
    pub speed_x10: u16,
    pub odometer_m: u32,
    pub temp_c: i16,
    pub temp_percent: u8,
    pub fuel_percent: u8,
    pub lamp_mask: u8,
    pub link_up: bool,
    pub link: LinkStats,
}

/// Latest dashboard readings, `None` until the main loop has run once
pub static STATUS: Mutex<CriticalSectionRawMutex, Cell<Option<DashStatus>>> =
    Mutex::new(Cell::new(None));

/// Ask the status task for an immediate report
pub static STATUS_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();
