//! NINA Dash Satellite Firmware
//!
//! Firmware for the steering-wheel satellite (RP2040). Reads the OK and
//! NEXT buttons and the wheel-speed hall sensor, and answers the primary's
//! telemetry reads as an I2C target at the `[link]` address of `dash.toml`.
//!
//! The hall pulse count transfer and the I2C target run on an
//! `InterruptExecutor` so a read from the primary is answered without
//! waiting for the main loop.
//! The main loop rebuilds the telemetry frame every pass and publishes it
//! whole, so a read always sees a coherent frame.

#![no_std]
#![no_main]

mod config;
mod led;

use core::cell::Cell;

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c;
use embassy_rp::i2c_slave::{self, Command, I2cSlave};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::{self, InputMode, Pwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Instant, Ticker};
use portable_atomic::{AtomicU32, Ordering};
use {defmt_rtt as _, panic_probe as _};

use nina_core::config::{ButtonConfig, SpeedConfig};
use nina_core::sensor::{CounterBridge, PulseCounter, SpeedSampler};
use nina_drivers::input::PinButton;
use nina_hal::gpio::Polarity;
use nina_hal_rp2040::{ExecutorIrq, RpInput, RpOutput, RpPwmCounter};
use nina_protocol::{Frame, TelemetryPacket, FRAME_LEN};

use crate::led::{StatusLed, BLINK_LONG_MS, BLINK_NEXT_MS, BLINK_OK_MS, BLINK_PULSE_MS};

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main loop period
const LOOP_PERIOD_MS: u64 = 10;

/// Speed rise that flashes the LED (km/h per loop pass)
const PULSE_BLINK_KPH: f32 = 0.5;

/// Status log period
const LOG_PERIOD_MS: u32 = 1000;

/// Transfer period from the PWM counter into `SPEED_PULSES`
const COUNT_SYNC_MS: u64 = 1;

/// Hall sensor edges
static SPEED_PULSES: PulseCounter = PulseCounter::new();

/// Frame handed to the primary on every read
static FRAME: Mutex<CriticalSectionRawMutex, Cell<Frame>> = Mutex::new(Cell::new([0; FRAME_LEN]));

/// Reads answered since boot
static READS_SERVED: AtomicU32 = AtomicU32::new(0);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("NINA satellite firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = config::load();

    // Nothing pressed, standing still until the first loop pass
    publish(&TelemetryPacket::default());

    // I2C target (I2C0: SDA=GPIO16, SCL=GPIO17)
    let mut target_config = i2c_slave::Config::default();
    target_config.addr = config.link.address as u16;
    let target = I2cSlave::new(p.I2C0, p.PIN_17, p.PIN_16, Irqs, target_config);

    // Hall sensor (GPIO5, PWM slice 2 channel B), open collector
    let hall = RpPwmCounter::new(Pwm::new_input(
        p.PWM_SLICE2,
        p.PIN_5,
        Pull::Up,
        InputMode::FallingEdge,
        pwm::Config::default(),
    ));

    // High priority executor for pulse counts and bus requests
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let fast = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    fast.spawn(speed_count_task(hall)).unwrap();
    fast.spawn(i2c_target_task(target)).unwrap();

    // Buttons to ground (GPIO3 OK, GPIO4 NEXT), status LED on GPIO25
    let ok = Input::new(p.PIN_3, Pull::Up);
    let next = Input::new(p.PIN_4, Pull::Up);
    let led = Output::new(p.PIN_25, Level::Low);

    spawner
        .spawn(satellite_task(ok, next, led, config.buttons, config.speed))
        .unwrap();

    info!("All tasks spawned, satellite at {=u8:#x}", config.link.address);
}

fn publish(packet: &TelemetryPacket) {
    let frame = packet.to_frame();
    FRAME.lock(|cell| cell.set(frame));
}

/// Count hall sensor pulses, one falling edge each
///
/// The PWM slice counts in hardware; this task moves the count across.
#[embassy_executor::task]
async fn speed_count_task(counter: RpPwmCounter<'static>) {
    let mut bridge = CounterBridge::new(counter);
    let mut ticker = Ticker::every(Duration::from_millis(COUNT_SYNC_MS));

    loop {
        ticker.next().await;
        bridge.sync(&SPEED_PULSES);
    }
}

/// Answer telemetry reads from the primary
///
/// Reads get the latest frame, padded with zeros if the primary clocks
/// more bytes than a frame. Writes are drained and dropped.
#[embassy_executor::task]
async fn i2c_target_task(mut target: I2cSlave<'static, I2C0>) {
    info!("I2C target task started");

    let mut scratch = [0u8; 16];
    loop {
        match target.listen(&mut scratch).await {
            Ok(Command::Read) | Ok(Command::WriteRead(_)) => {
                let frame = FRAME.lock(|cell| cell.get());
                match target.respond_and_fill(&frame, 0x00).await {
                    Ok(()) => {
                        READS_SERVED.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(e) => warn!("I2C read response failed: {}", e),
                }
            }
            Ok(Command::Write(len)) | Ok(Command::GeneralCall(len)) => {
                trace!("Dropped {} written bytes", len);
            }
            Err(e) => warn!("I2C target error: {}", e),
        }
    }
}

/// Buttons, speed sampling, status LED and frame publication
#[embassy_executor::task]
async fn satellite_task(
    ok: Input<'static>,
    next: Input<'static>,
    led: Output<'static>,
    buttons: ButtonConfig,
    speed_config: SpeedConfig,
) {
    info!("Satellite loop started, debounce {} ms", buttons.debounce_ms);

    let mut ok = PinButton::new(RpInput::new(ok), Polarity::ActiveLow, buttons.debounce_ms);
    let mut next = PinButton::new(RpInput::new(next), Polarity::ActiveLow, buttons.debounce_ms);
    let mut led = StatusLed::new(RpOutput::new(led));

    // SWI_IRQ_1 runs the interrupt executor, which hosts the count task
    let mut irq = ExecutorIrq::new(interrupt::SWI_IRQ_1);
    let mut speed = SpeedSampler::new(
        &SPEED_PULSES,
        speed_config.window_ms,
        speed_config.meters_per_pulse,
        speed_config.alpha,
    );

    let start = Instant::now();
    ok.begin(0);
    next.begin(0);
    speed.begin(&mut irq, 0);

    let mut long_press_reported = false;
    let mut last_speed = 0.0f32;
    let mut last_log_ms = 0u32;

    let mut ticker = Ticker::every(Duration::from_millis(LOOP_PERIOD_MS));

    loop {
        ticker.next().await;
        let now_ms = start.elapsed().as_millis() as u32;

        ok.update(now_ms);
        next.update(now_ms);
        speed.sample_window(&mut irq, now_ms);
        led.update(now_ms);

        if ok.was_pressed() {
            led.blink(BLINK_OK_MS, now_ms);
        }

        if ok.is_pressed() {
            if !long_press_reported && ok.held_for(now_ms) >= buttons.long_press_ms {
                long_press_reported = true;
                debug!("OK long press");
                led.blink(BLINK_LONG_MS, now_ms);
            }
        } else {
            long_press_reported = false;
        }

        if next.was_pressed() {
            led.blink(BLINK_NEXT_MS, now_ms);
        }

        let kph = speed.current_speed();
        if kph > last_speed + PULSE_BLINK_KPH {
            led.blink(BLINK_PULSE_MS, now_ms);
        }
        last_speed = kph;

        publish(&TelemetryPacket::new(
            ok.is_pressed(),
            next.is_pressed(),
            speed.speed_x10(),
        ));

        if now_ms.wrapping_sub(last_log_ms) >= LOG_PERIOD_MS {
            last_log_ms = now_ms;
            info!(
                "speed {} km/h | ok {} | next {} | reads served {}",
                kph,
                ok.is_pressed(),
                next.is_pressed(),
                READS_SERVED.load(Ordering::Relaxed)
            );
        }
    }
}
