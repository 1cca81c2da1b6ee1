// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status LEDs.
//!
//! [`Led`] is a plain on/off output. [`BlinkLed`] toggles once every `divider` calls to
//! [`BlinkLed::tick`], which turns a fast periodic event (the modulation tick, the main loop) into
//! a visible blink.

use stm32f7xx_hal::gpio::{Output, Pin, PinState, PushPull};

/// LED on a push-pull output, active-high as on the Nucleo user LEDs.
pub struct Led<const P: char, const N: u8> {
    pin: Pin<P, N, Output<PushPull>>,
    is_on: bool,
}

impl<const P: char, const N: u8> Led<P, N> {
    /// Wrap the pin and turn the LED off.
    pub fn new(mut pin: Pin<P, N, Output<PushPull>>) -> Self {
        pin.set_state(PinState::Low);
        Self { pin, is_on: false }
    }

    /// Drive the LED logically ON (true) or OFF (false).
    pub fn set(&mut self, on: bool) {
        self.pin
            .set_state(if on { PinState::High } else { PinState::Low });
        self.is_on = on;
    }

    #[inline]
    pub fn on(&mut self) {
        self.set(true);
    }

    #[inline]
    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn toggle(&mut self) {
        self.set(!self.is_on);
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn free(self) -> Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

/// LED that toggles every `divider` ticks.
pub struct BlinkLed<const P: char, const N: u8> {
    led: Led<P, N>,
    divider: u32,
    count: u32,
}

impl<const P: char, const N: u8> BlinkLed<P, N> {
    pub fn new(led: Led<P, N>, divider: u32) -> Self {
        Self {
            led,
            divider: divider.max(1),
            count: 0,
        }
    }

    /// Count one event. Returns true when the LED toggled.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.divider {
            self.count = 0;
            self.led.toggle();
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn led_mut(&mut self) -> &mut Led<P, N> {
        &mut self.led
    }
}
