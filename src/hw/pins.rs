// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the NUCLEO-F767ZI inverter setup.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpioc, gpiod, gpioe, Alternate, Floating, Input, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub user_button: gpioc::PC13<Input<Floating>>, // B1, active-high
    pub usart3: Usart3Pins,
    pub bridge: BridgePins,
}

/// User LEDs LD1..LD3
pub struct LedPins {
    pub green: gpiob::PB0<Output<PushPull>>,
    pub blue: gpiob::PB7<Output<PushPull>>,
    pub red: gpiob::PB14<Output<PushPull>>,
}

/// USART3 TX/RX, routed to the ST-LINK virtual COM port
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// Gate driver inputs, one complementary pair per leg
pub struct BridgePins {
    pub leg1_high: gpioe::PE9<Alternate<1>>, // TIM1_CH1
    pub leg1_low: gpioe::PE8<Alternate<1>>,  // TIM1_CH1N
    pub leg2_high: gpioc::PC6<Alternate<3>>, // TIM8_CH1
    pub leg2_low: gpioa::PA5<Alternate<3>>,  // TIM8_CH1N
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpioc: pac::GPIOC,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            leds: LedPins {
                green: gpiob.pb0.into_push_pull_output(),
                blue: gpiob.pb7.into_push_pull_output(),
                red: gpiob.pb14.into_push_pull_output(),
            },

            user_button: gpioc.pc13.into_floating_input(),

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            bridge: BridgePins {
                leg1_high: gpioe.pe9.into_alternate::<1>(),
                leg1_low: gpioe.pe8.into_alternate::<1>(),
                leg2_high: gpioc.pc6.into_alternate::<3>(),
                leg2_low: gpioa.pa5.into_alternate::<3>(),
            },
        }
    }
}
