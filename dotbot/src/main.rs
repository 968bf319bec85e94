// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Reactive DotBot firmware: drive from radio commands, stop on silence, advertise, stay alive.

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::peripheral::{syst::SystClkSource, NVIC};
use cortex_m_rt::{entry, exception};
use critical_section::Mutex;
use heapless::spsc::{Producer, Queue};
use panic_halt as _;
use static_cell::StaticCell;

use hal::{
    can::Can,
    pac::{self, interrupt},
    prelude::*,
    serial::{self, Serial},
};
use stm32f7xx_hal as hal;

use dotbot::{
    board::Clock,
    drivers::DifferentialDrive,
    heartbeat::Heartbeat,
    hw::{
        self,
        can::{CanRx, BTR_500K_16MHZ},
        BoardPins, CanBus, IndependentWatchdog, Led, TickTimer, Usart,
    },
    protocol::Packet,
    sync::EventCounter,
    time::Periodic,
    Config, Robot,
};

const PACKET_QUEUE_LEN: usize = 8;
const SUPERVISOR_TIMEOUT_MS: u32 = 1_000;
const WAKEUP_HZ: u32 = 1_000;

type PacketProducer = Producer<'static, Packet, PACKET_QUEUE_LEN>;

static PACKETS: StaticCell<Queue<Packet, PACKET_QUEUE_LEN>> = StaticCell::new();
static CAN_RX: Mutex<RefCell<Option<(CanRx<pac::CAN1>, PacketProducer)>>> =
    Mutex::new(RefCell::new(None));
static PACKETS_DROPPED: EventCounter = EventCounter::new();
static RX_OVERRUNS: EventCounter = EventCounter::new();

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks: HSI 16 MHz, APB1 undivided, so the timers run at sysclk
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let timer_hz = clocks.sysclk().raw();

    let mut pins = BoardPins::new(dp.GPIOA, dp.GPIOD);

    // USART1 (DBG) as the log sink
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

    // Motors
    let drive = DifferentialDrive::tim4(
        dp.TIM4,
        timer_hz,
        &mut pins.left.nsleep,
        &mut pins.left.disable,
        &mut pins.right.nsleep,
        &mut pins.right.disable,
    );

    // LEDs
    let status = Led::active_low(pins.leds.yellow);
    #[cfg(feature = "rgb-led")]
    let rgb = hw::IndicatorLeds::new(
        Led::active_low(pins.leds.red),
        Led::active_low(pins.leds.green),
    );
    #[cfg(not(feature = "rgb-led"))]
    let rgb = dotbot::board::NoRgbLed;

    // CAN1: receive half to the FIFO0 interrupt, transmit half to the robot
    let can1 = Can::new(dp.CAN1, &mut rcc.apb1, (pins.can1.tx, pins.can1.rx));
    let mut bus = CanBus::new(can1, BTR_500K_16MHZ);
    bus.accept_all();
    bus.listen_fifo0();
    let (can_tx, can_rx) = bus.split();

    let (producer, mut consumer) = PACKETS.init(Queue::new()).split();
    critical_section::with(|cs| {
        CAN_RX.borrow_ref_mut(cs).replace((can_rx, producer));
    });
    unsafe { NVIC::unmask(pac::Interrupt::CAN1_RX0) };

    let mut robot = Robot::new(
        hw::uid::device_id(),
        &config,
        drive,
        rgb,
        status,
        can_tx,
    );
    let iwdg = IndependentWatchdog::start(dp.IWDG, SUPERVISOR_TIMEOUT_MS);
    let mut heartbeat = Heartbeat::new(iwdg);

    // SysTick only wakes the loop; the periods below are measured on TIM2
    cp.SYST.set_clock_source(SystClkSource::Core);
    cp.SYST.set_reload(timer_hz / WAKEUP_HZ - 1);
    cp.SYST.clear_current();
    cp.SYST.enable_counter();
    cp.SYST.enable_interrupt();

    let start = clock.now();
    let mut watchdog_timer = Periodic::new(config.watchdog_period(), start);
    let mut beacon_timer = Periodic::new(config.beacon_period(), start);
    let mut heartbeat_timer = Periodic::new(config.heartbeat_period(), start);

    loop {
        cortex_m::asm::wfi();

        while let Some(packet) = consumer.dequeue() {
            robot.handle_packet(&packet, clock.now());
        }

        let now = clock.now();
        if watchdog_timer.poll(now) {
            robot.check_watchdog(now);
            report_rx_losses();
        }
        if beacon_timer.poll(now) {
            robot.on_beacon_timer();
        }
        if heartbeat_timer.poll(now) {
            heartbeat.beat();
        }
        robot.flush_beacon();
    }
}

fn report_rx_losses() {
    let dropped = PACKETS_DROPPED.take();
    if dropped > 0 {
        log::warn!("packet queue full, dropped {}", dropped);
    }
    let overruns = RX_OVERRUNS.take();
    if overruns > 0 {
        log::warn!("can: {} receive FIFO overruns", overruns);
    }
}

#[exception]
fn SysTick() {}

// Never logs: a log line takes milliseconds on the USART.
#[interrupt]
fn CAN1_RX0() {
    critical_section::with(|cs| {
        let mut slot = CAN_RX.borrow_ref_mut(cs);
        let Some((rx, producer)) = slot.as_mut() else {
            return;
        };
        loop {
            match rx.receive_packet() {
                Ok(Some(packet)) => {
                    if producer.enqueue(packet).is_err() {
                        PACKETS_DROPPED.record();
                    }
                }
                Ok(None) => break,
                Err(_) => RX_OVERRUNS.record(),
            }
        }
    });
}
