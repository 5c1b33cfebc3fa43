//! Periodic status log
//!
//! Prints the latest dashboard readings and multiplexer timing once per
//! second, or right away when the satellite's NEXT button asks for it.

use defmt::*;
use embassy_futures::select::select;
use embassy_time::{Duration, Ticker};

use crate::channels::{LAMPS_HEALTH, SPEEDO_HEALTH, STATUS, STATUS_REQUEST, TACH_HEALTH};

const STATUS_PERIOD_MS: u64 = 1000;

#[embassy_executor::task]
pub async fn status_task() {
    let mut ticker = Ticker::every(Duration::from_millis(STATUS_PERIOD_MS));

    loop {
        select(ticker.next(), STATUS_REQUEST.wait()).await;

        let Some(status) = STATUS.lock(|cell| cell.get()) else {
            trace!("No dashboard readings yet");
            continue;
        };

        info!("=== Dashboard Status === uptime {} s", status.uptime_s);
        info!(
            "rpm {} | speed {}.{} km/h | trip {} m",
            status.rpm,
            status.speed_x10 / 10,
            status.speed_x10 % 10,
            status.odometer_m
        );
        info!(
            "coolant {} C ({}%) | fuel {}% | lamps {=u8:08b}",
            status.temp_c, status.temp_percent, status.fuel_percent, status.lamp_mask
        );
        info!(
            "link {} | frames ok {} bad {} | bus errors {}",
            if status.link_up { "up" } else { "down" },
            status.link.frames.accepted,
            status.link.frames.rejected,
            status.link.bus_errors
        );
        info!(
            "mux speedo {} | tach {} | lamps {}",
            SPEEDO_HEALTH.snapshot(),
            TACH_HEALTH.snapshot(),
            LAMPS_HEALTH.snapshot()
        );
    }
}
