// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Scripted demo: blink, spin one way, spin back, blink, then let the supervisor reset the board.

#![no_main]
#![no_std]

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{self, Serial},
};
use stm32f7xx_hal as hal;

use dotbot::{
    board::Clock,
    drivers::DifferentialDrive,
    heartbeat::Heartbeat,
    hw::{self, BoardPins, IndependentWatchdog, Led, TickTimer, Usart},
    sequence::{Progress, Sequencer, SPIN},
    time::Periodic,
    Config,
};

const SUPERVISOR_TIMEOUT_MS: u32 = 1_000;
const WAKEUP_HZ: u32 = 1_000;

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // RCC / clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let timer_hz = clocks.sysclk().raw();

    let mut pins = BoardPins::new(dp.GPIOA, dp.GPIOD);

    let usart_cfg = serial::Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        usart_cfg,
    );
    hw::usart::init(Usart::new(serial), log::LevelFilter::Info);

    let clock = TickTimer::tim2(dp.TIM2, timer_hz);
    let config = Config::default().with_tick_hz(hw::clock::TICK_HZ);

    let mut drive = DifferentialDrive::tim4(
        dp.TIM4,
        timer_hz,
        &mut pins.left.nsleep,
        &mut pins.left.disable,
        &mut pins.right.nsleep,
        &mut pins.right.disable,
    );
    let mut led = Led::active_low(pins.leds.yellow);

    let iwdg = IndependentWatchdog::start(dp.IWDG, SUPERVISOR_TIMEOUT_MS);
    let mut heartbeat = Heartbeat::new(iwdg);

    cp.SYST.set_clock_source(SystClkSource::Core);
    cp.SYST.set_reload(timer_hz / WAKEUP_HZ - 1);
    cp.SYST.clear_current();
    cp.SYST.enable_counter();
    cp.SYST.enable_interrupt();

    let mut sequencer = Sequencer::new(SPIN, config.tick_hz);
    let mut heartbeat_timer = Periodic::new(config.heartbeat_period(), clock.now());

    loop {
        cortex_m::asm::wfi();

        let now = clock.now();
        if heartbeat_timer.poll(now) {
            heartbeat.beat();
        }
        if sequencer.poll(now, &mut drive, &mut led) == Progress::Finished {
            heartbeat.disable();
        }
    }
}

#[exception]
fn SysTick() {}
