//! Pulse edge counting

use embassy_time::{Duration, Ticker};

use nina_core::sensor::CounterBridge;
use nina_hal_rp2040::RpPwmCounter;

use crate::channels::RPM_PULSES;

/// Transfer period from the PWM counter into `RPM_PULSES`
const COUNT_SYNC_MS: u64 = 1;

/// Count ignition pulses
///
/// The coil signal comes through an optocoupler, one falling edge per
/// spark. The PWM slice counts the edges in hardware; this task only moves
/// the count across, so edges arriving while the loop masks this executor
/// are transferred on the next sync.
#[embassy_executor::task]
pub async fn rpm_count_task(counter: RpPwmCounter<'static>) {
    let mut bridge = CounterBridge::new(counter);
    let mut ticker = Ticker::every(Duration::from_millis(COUNT_SYNC_MS));

    loop {
        ticker.next().await;
        bridge.sync(&RPM_PULSES);
    }
}
