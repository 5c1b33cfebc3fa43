//! Multiplex tick tasks
//!
//! One task per display, each on its own `Ticker`. A tick locks the
//! scheduler, renders and shifts one channel, and is timed against the
//! tick period.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use nina_core::mux::MultiplexScheduler;
use nina_core::traits::ChannelRenderer;

use crate::channels::{
    Chain, MuxCell, TickHealth, LAMPS, LAMPS_HEALTH, SPEEDO, SPEEDO_HEALTH, TACH, TACH_HEALTH,
};

#[embassy_executor::task]
pub async fn speedo_mux_task(period_ms: u32) {
    drive("speedo", &SPEEDO, &SPEEDO_HEALTH, period_ms).await
}

#[embassy_executor::task]
pub async fn tach_mux_task(period_ms: u32) {
    drive("tach", &TACH, &TACH_HEALTH, period_ms).await
}

#[embassy_executor::task]
pub async fn lamps_mux_task(period_ms: u32) {
    drive("lamps", &LAMPS, &LAMPS_HEALTH, period_ms).await
}

async fn drive<R, const N: usize>(
    name: &'static str,
    cell: &'static MuxCell<MultiplexScheduler<R, Chain, N>>,
    health: &'static TickHealth,
    period_ms: u32,
) -> !
where
    R: ChannelRenderer,
{
    info!("{} mux task started ({} ms tick)", name, period_ms);

    let period = Duration::from_millis(period_ms as u64);
    let period_us = period.as_micros() as u32;
    let mut ticker = Ticker::every(period);

    loop {
        ticker.next().await;

        let started = Instant::now();
        cell.lock(|mux| {
            if let Some(mux) = mux.borrow_mut().as_mut() {
                mux.on_tick();
            }
        });
        health.record(started.elapsed().as_micros() as u32, period_us);
    }
}
