//! Dashboard main loop
//!
//! Runs on the thread-mode executor at a fixed cadence and owns every
//! polled input:
//!
//! - the rpm window sampler (masks the interrupt executor while draining
//!   the pulse counter)
//! - dash switches and the analog gauges, combined into the lamp mask
//! - the satellite link: speed for the speedometer and odometer, button
//!   presses
//!
//! Results are pushed into the renderers of the three multiplexers.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::interrupt;
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker};

use nina_core::config::DashConfig;
use nina_core::render::Lamp;
use nina_core::sensor::{Odometer, RateSampler};
use nina_drivers::input::DashSwitches;
use nina_drivers::link::{LinkError, TelemetryLink};
use nina_drivers::sensor::AnalogGauges;
use nina_hal_rp2040::{EhI2c, ExecutorIrq, RpAdcChannel, RpInput};

use crate::channels::{
    with_renderer, DashStatus, LAMPS, RPM_PULSES, SPEEDO, STATUS, STATUS_REQUEST, TACH,
};

/// Loop cadence
const LOOP_PERIOD_MS: u64 = 10;

/// Analog gauge refresh period
const ANALOG_PERIOD_MS: u32 = 100;

/// Without a good frame for this long the speedometer drops to zero
const LINK_TIMEOUT_MS: u32 = 1000;

pub type SatelliteLink = TelemetryLink<EhI2c<I2c<'static, I2C0, Blocking>>>;
pub type Gauges = AnalogGauges<RpAdcChannel<'static, 'static>, RpAdcChannel<'static, 'static>>;

/// Polled inputs owned by the dashboard loop
pub struct DashIo {
    pub switches: DashSwitches<RpInput<'static>>,
    pub gauges: Gauges,
    pub link: SatelliteLink,
}

#[embassy_executor::task]
pub async fn dashboard_task(mut io: DashIo, config: DashConfig) {
    info!("Dashboard task started");

    // SWI_IRQ_1 runs the interrupt executor, which hosts the pulse count task
    let mut irq = ExecutorIrq::new(interrupt::SWI_IRQ_1);
    let mut rpm = RateSampler::rpm(&RPM_PULSES, config.rpm.window_ms, config.rpm.pulses_per_rev);
    let mut odometer = Odometer::new();

    let start = Instant::now();
    rpm.begin(&mut irq, 0);

    let mut last_poll_ms = 0u32;
    let mut last_analog_ms = 0u32;
    let mut last_frame_ms: Option<u32> = None;
    let mut link_up = false;

    let mut ticker = Ticker::every(Duration::from_millis(LOOP_PERIOD_MS));

    loop {
        ticker.next().await;
        let now_ms = start.elapsed().as_millis() as u32;

        // Tachometer
        if let Some(rate) = rpm.sample_window(&mut irq, now_ms) {
            with_renderer(&TACH, |bar| bar.set_rate(rate));
        }

        // Satellite link
        if now_ms.wrapping_sub(last_poll_ms) >= config.link.poll_ms {
            last_poll_ms = now_ms;
            match io.link.poll() {
                Ok(events) => {
                    last_frame_ms = Some(now_ms);
                    if !link_up {
                        info!("Satellite link up");
                        link_up = true;
                    }
                    if events.a_pressed {
                        info!("OK pressed, trip reset at {} m", odometer.meters());
                        odometer.reset();
                    }
                    if events.b_pressed {
                        STATUS_REQUEST.signal(());
                    }
                }
                Err(LinkError::Bus(e)) => {
                    if link_up {
                        warn!("Satellite link lost: {}", e);
                        link_up = false;
                    }
                }
                Err(LinkError::Packet(e)) => {
                    debug!("Dropped satellite frame: {}", e);
                }
            }
        }

        let fresh = last_frame_ms.is_some_and(|t| now_ms.wrapping_sub(t) < LINK_TIMEOUT_MS);
        let speed_x10 = match io.link.last() {
            Some(packet) if fresh => packet.speed_x10,
            _ => 0,
        };
        with_renderer(&SPEEDO, |speedo| speedo.set_speed(speed_x10.saturating_add(5) / 10));
        odometer.update(speed_x10 as f32 / 10.0, now_ms);

        // Gauges
        if now_ms.wrapping_sub(last_analog_ms) >= ANALOG_PERIOD_MS {
            last_analog_ms = now_ms;
            if let Err(e) = io.gauges.update() {
                warn!("Analog read failed: {}", e);
            }
        }

        // Lamps
        let mut mask = io.switches.update().lamp_mask();
        if io.gauges.is_low_fuel() {
            mask |= Lamp::LowFuel.bit();
        }
        with_renderer(&LAMPS, |lamps| lamps.set_mask(mask));

        let status = DashStatus {
            uptime_s: now_ms / 1000,
            rpm: rpm.current_rate(),
            speed_x10,
            odometer_m: odometer.meters(),
            temp_c: io.gauges.temp_c(),
            temp_percent: io.gauges.temp_percent(),
            fuel_percent: io.gauges.fuel_percent(),
            lamp_mask: mask,
            link_up,
            link: io.link.stats(),
        };
        STATUS.lock(|cell| cell.set(Some(status)));
    }
}
