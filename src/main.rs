// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Inverter firmware for the NUCLEO-F767ZI.
//!
//! - `USART3` interrupt: bytes → `RX_RING`.
//! - Main loop: `RX_RING` → frame decoder → `COMMANDS`, user button → `DRIVE`, heartbeat LED,
//!   optional simulated sensor.
//! - `TIM6_DAC` interrupt: `DRIVE` + `COMMANDS` → modulator → TIM1/TIM8 compare registers.

#![no_main]
#![no_std]

use core::cell::RefCell;
use core::fmt::Write;

use cortex_m::peripheral::NVIC;
use cortex_m_rt::{entry, exception, ExceptionFrame};
use critical_section::Mutex;
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;
use panic_halt as _;

use hal::{
    pac::{self, interrupt, Interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use inverter::config::{
    BUTTON_POLL_MS, HEARTBEAT_PERIOD_MS, RAMP_TICKS, SINE_FREQ_HZ, TICK_LED_DIVIDER, UART_BAUD, UPDATE_FREQ_HZ,
};
use inverter::control::{command::publish_sample, CommandChannel};
use inverter::hw::{
    bridge_timers, BlinkLed, BoardPins, BridgeTimers, CycleDelay, Led, LinkRx, TickTimer, Usart,
};
use inverter::modulation::{DriveRequests, Modulator, TickOutcome};
use inverter::protocol::{FrameDecoder, RxRing};

static RX_RING: RxRing = RxRing::new();
static COMMANDS: CommandChannel = CommandChannel::new();
static DRIVE: DriveRequests = DriveRequests::new();

/// Everything the tick handler owns.
struct TickContext {
    modulator: Modulator<BridgeTimers>,
    timer: TickTimer,
    led: BlinkLed<'B', 7>,
}

static G_TICK: Mutex<RefCell<Option<TickContext>>> = Mutex::new(RefCell::new(None));
static G_LINK_RX: Mutex<RefCell<Option<LinkRx>>> = Mutex::new(RefCell::new(None));

const TICK_PRIORITY: u8 = 0x20;
const USART_PRIORITY: u8 = 0x40;

/// Kernel clock of the timers on an APB bus: doubled whenever the APB prescaler divides.
fn timer_clock(pclk_hz: u32, hclk_hz: u32) -> u32 {
    if pclk_hz == hclk_hz {
        pclk_hz
    } else {
        pclk_hz * 2
    }
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(216.MHz()).freeze();
    let hclk = clocks.hclk().raw();
    let apb1_timer_clk = timer_clock(clocks.pclk1().raw(), hclk);
    let apb2_timer_clk = timer_clock(clocks.pclk2().raw(), hclk);

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);
    let mut heartbeat = BlinkLed::new(Led::new(pins.leds.green), HEARTBEAT_PERIOD_MS);
    let tick_led = BlinkLed::new(Led::new(pins.leds.blue), TICK_LED_DIVIDER);
    let mut fault_led = Led::new(pins.leds.red);
    let button = pins.user_button;

    // USART3: status console out, sensor frames in
    let usart_cfg = Config {
        baud_rate: UART_BAUD.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        usart_cfg,
    );
    let (tx, rx) = serial.split();
    let mut usart = Usart::new(tx);
    let link_rx = LinkRx::new(rx);

    usart.println("");
    usart.println("inverter: boot");
    let _ = writeln!(
        usart,
        "  output {} Hz, tick {} Hz, ramp {} ticks\r",
        SINE_FREQ_HZ, UPDATE_FREQ_HZ, RAMP_TICKS
    );

    // Bridge timers and tick timer
    let bridge = match BridgeTimers::new(dp.TIM1, dp.TIM8, apb2_timer_clk) {
        Ok(t) => t,
        Err(e) => {
            fault_led.on();
            defmt::panic!("bridge timers: {}", e);
        }
    };
    let mut tick_timer = match TickTimer::new(dp.TIM6, apb1_timer_clk, UPDATE_FREQ_HZ) {
        Ok(t) => t,
        Err(e) => {
            fault_led.on();
            defmt::panic!("tick timer: {}", e);
        }
    };
    // Gate pins are already in their timer AF; keep them claimed
    let _bridge_pins = pins.bridge;

    let mut delay = CycleDelay::new(clocks.sysclk().raw());
    #[cfg_attr(not(feature = "manual-soft-start"), allow(unused_mut))]
    let mut modulator = Modulator::new(bridge, RAMP_TICKS);
    let _ = writeln!(
        usart,
        "  carrier arr {}\r",
        modulator.bridge().max_count()
    );
    defmt::info!("modulator ready, arr={}", modulator.bridge().max_count());

    // Fixed 50 % duty bring-up; the sine drive takes over on the first button press
    #[cfg(feature = "manual-soft-start")]
    {
        usart.println("inverter: manual soft-start");
        modulator.bridge_mut().manual_soft_start(
            &mut delay,
            inverter::config::MANUAL_SOFT_START_STEPS,
            inverter::config::MANUAL_SOFT_START_MS,
        );
    }

    tick_timer.start();
    critical_section::with(|cs| {
        G_TICK.borrow(cs).replace(Some(TickContext {
            modulator,
            timer: tick_timer,
            led: tick_led,
        }));
        G_LINK_RX.borrow(cs).replace(Some(link_rx));
    });

    unsafe {
        cp.NVIC.set_priority(Interrupt::TIM6_DAC, TICK_PRIORITY);
        cp.NVIC.set_priority(Interrupt::USART3, USART_PRIORITY);
        NVIC::unmask(Interrupt::TIM6_DAC);
        NVIC::unmask(Interrupt::USART3);
    }

    let mut driving = !cfg!(feature = "manual-soft-start");
    if driving {
        DRIVE.request_start();
        usart.println("inverter: soft-start requested");
    }
    let mut button_was_down = false;
    let mut ms: u32 = 0;

    let mut decoder = FrameDecoder::new(&RX_RING);

    #[cfg(feature = "sim-sensor")]
    let mut sim = inverter::protocol::SimulatedSensor::new(inverter::config::SIM_PERIOD_MS);

    loop {
        #[cfg(feature = "sim-sensor")]
        if let Some(frame) = sim.poll(1) {
            // USART3 is the other producer
            critical_section::with(|_| RX_RING.push_slice(frame.bytes()));
        }

        while let Some(sample) = decoder.try_decode_frame() {
            let cmd = publish_sample(&COMMANDS, &sample);
            let _ = writeln!(
                usart,
                "frame: level {}%\r",
                (cmd.level() * 100.0 + 0.5) as u32
            );
        }

        // B1 toggles the drive, sampled slower than contact bounce
        ms = ms.wrapping_add(1);
        let button_down = if ms % BUTTON_POLL_MS == 0 {
            button.is_high()
        } else {
            button_was_down
        };
        if button_down && !button_was_down {
            driving = !driving;
            if driving {
                DRIVE.request_start();
                usart.println("button: start");
            } else {
                DRIVE.request_stop();
                usart.println("button: stop");
            }
        }
        button_was_down = button_down;

        heartbeat.tick();
        delay.delay_ms(1);
    }
}

#[interrupt]
fn TIM6_DAC() {
    static mut CTX: Option<TickContext> = None;

    if CTX.is_none() {
        *CTX = critical_section::with(|cs| G_TICK.borrow(cs).take());
    }
    let Some(ctx) = CTX.as_mut() else {
        return;
    };

    ctx.timer.clear_update();
    if ctx.modulator.service(&DRIVE, &COMMANDS) == TickOutcome::Stopped {
        defmt::info!("soft-stop complete");
    }
    ctx.led.tick();
}

#[interrupt]
fn USART3() {
    static mut RX: Option<LinkRx> = None;

    if RX.is_none() {
        *RX = critical_section::with(|cs| G_LINK_RX.borrow(cs).take());
    }
    if let Some(rx) = RX.as_mut() {
        rx.service(&RX_RING);
    }
}

#[exception]
unsafe fn HardFault(_ef: &ExceptionFrame) -> ! {
    cortex_m::interrupt::disable();
    bridge_timers::emergency_off();
    loop {
        cortex_m::asm::nop();
    }
}
