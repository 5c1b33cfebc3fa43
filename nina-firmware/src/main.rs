//! NINA Dash - Instrument Cluster Firmware
//!
//! Main firmware binary for the RP2040 "brain" board. Drives the
//! multiplexed speedometer, tachometer bar and warning lamps, reads the
//! dash switches and analog senders, and polls the steering-wheel
//! satellite over I2C.
//!
//! Two executors:
//!
//! - an `InterruptExecutor` on `SWI_IRQ_1` for the time-critical work: the
//!   three multiplex tick tasks and the ignition pulse count transfer
//! - the thread-mode executor for the dashboard loop and the status log

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::adc::{self, Adc, Blocking};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::pwm::{self, InputMode, Pwm};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use nina_core::mux::MultiplexScheduler;
use nina_core::render::{BarRenderer, LampBank, SpeedoRenderer, LAMP_CHANNELS, SPEEDO_CHANNELS};
use nina_drivers::input::DashSwitches;
use nina_drivers::link::TelemetryLink;
use nina_drivers::sensor::AnalogGauges;
use nina_drivers::shift::Hc595Chain;
use nina_hal::i2c::I2cConfig;
use nina_hal_rp2040::{EhI2c, RpAdcChannel, RpInput, RpOutput, RpPwmCounter};

mod channels;
mod config;
mod tasks;

use channels::{Chain, LampMux, SpeedoMux, TachMux};

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

// The ADC is shared by the coolant and fuel channels
static ADC: StaticCell<RefCell<Adc<'static, Blocking>>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("NINA Dash firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Shift register chains, one data/clock/latch triple each
    // Pin assignments are board-specific (speedo: GPIO2-4, tach: GPIO5-7, lamps: GPIO8-10)
    let speedo_chain = chain(
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
    );
    let tach_chain = chain(
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
    );
    let lamp_chain = chain(
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
        Output::new(p.PIN_10, Level::Low),
    );

    let bar = BarRenderer::new(config.tach.leds, config.tach.max_rpm);
    let tach_channels = bar.registers() as u8;

    let mut speedo: SpeedoMux =
        MultiplexScheduler::with_renderer(speedo_chain, SPEEDO_CHANNELS, SpeedoRenderer::new());
    let mut tach: TachMux = MultiplexScheduler::with_renderer(tach_chain, tach_channels, bar);
    let mut lamps: LampMux =
        MultiplexScheduler::with_renderer(lamp_chain, LAMP_CHANNELS, LampBank::new());

    // Clear whatever the registers powered up with before the first tick
    speedo.blank();
    tach.blank();
    lamps.blank();
    speedo.start();
    tach.start();
    lamps.start();

    channels::SPEEDO.lock(|m| *m.borrow_mut() = Some(speedo));
    channels::TACH.lock(|m| *m.borrow_mut() = Some(tach));
    channels::LAMPS.lock(|m| *m.borrow_mut() = Some(lamps));
    info!(
        "Displays initialized: tach {} LEDs over {} registers",
        config.tach.leds, tach_channels
    );

    // Dash switches behind optocouplers, active low
    // Pin assignments are board-specific (GPIO11-15, GPIO18-19)
    let switches = DashSwitches::new([
        RpInput::new(Input::new(p.PIN_11, Pull::Up)), // brake
        RpInput::new(Input::new(p.PIN_12, Pull::Up)), // oil
        RpInput::new(Input::new(p.PIN_13, Pull::Up)), // indicators
        RpInput::new(Input::new(p.PIN_14, Pull::Up)), // high beam
        RpInput::new(Input::new(p.PIN_15, Pull::Up)), // lights
        RpInput::new(Input::new(p.PIN_18, Pull::Up)), // fog
        RpInput::new(Input::new(p.PIN_19, Pull::Up)), // battery (alternator D+)
    ]);

    // Coolant and fuel senders (GPIO26, GPIO27)
    let converter: &'static RefCell<_> =
        ADC.init(RefCell::new(Adc::new_blocking(p.ADC, adc::Config::default())));
    let gauges = AnalogGauges::new(
        RpAdcChannel::new(converter, adc::Channel::new_pin(p.PIN_26, Pull::None)),
        RpAdcChannel::new(converter, adc::Channel::new_pin(p.PIN_27, Pull::None)),
        config.analog.clone(),
    );
    info!("ADC initialized");

    // Satellite link (I2C0: SDA=GPIO16, SCL=GPIO17)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::STANDARD.frequency;
    let bus = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, i2c_config);
    let link = TelemetryLink::new(EhI2c::new(bus), config.link.address);
    info!("I2C initialized, satellite at {=u8:#x}", config.link.address);

    // Ignition pulses (GPIO21, PWM slice 2 channel B)
    let rpm_counter = RpPwmCounter::new(Pwm::new_input(
        p.PWM_SLICE2,
        p.PIN_21,
        Pull::Up,
        InputMode::FallingEdge,
        pwm::Config::default(),
    ));

    // High priority executor for ticks and pulse counts
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let fast = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    fast.spawn(tasks::speedo_mux_task(config.mux.speedo_tick_ms)).unwrap();
    fast.spawn(tasks::tach_mux_task(config.mux.tach_tick_ms)).unwrap();
    fast.spawn(tasks::lamps_mux_task(config.mux.lamps_tick_ms)).unwrap();
    fast.spawn(tasks::rpm_count_task(rpm_counter)).unwrap();

    let io = tasks::DashIo {
        switches,
        gauges,
        link,
    };
    spawner.spawn(tasks::dashboard_task(io, config)).unwrap();
    spawner.spawn(tasks::status_task()).unwrap();

    info!("All tasks spawned, firmware running");
}

fn chain(data: Output<'static>, clock: Output<'static>, latch: Output<'static>) -> Chain {
    Hc595Chain::new(
        RpOutput::new(data),
        RpOutput::new(clock),
        RpOutput::new(latch),
    )
}
