// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Modulation tick on TIM6.
//!
//! TIM6 is a basic timer with no outputs. It raises `TIM6_DAC` on every update event at the
//! modulation tick rate and runs for the whole life of the firmware.

use stm32f7xx_hal::pac;

use crate::timing::{self, TimingError};

pub struct TickTimer {
    tim: pac::TIM6,
}

impl TickTimer {
    /// Enable TIM6 and program it for `tick_hz`. The counter is left stopped.
    ///
    /// `timer_clk_hz` is the APB1 timer kernel clock.
    pub fn new(tim6: pac::TIM6, timer_clk_hz: u32, tick_hz: u32) -> Result<Self, TimingError> {
        let params = timing::solve(timer_clk_hz, tick_hz)?;

        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim6en().set_bit());

        let tim = tim6;
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| unsafe { w.bits(params.psc as u32) });
        tim.arr.write(|w| unsafe { w.bits(params.arr as u32) });

        // Only counter overflow raises the interrupt, then latch PSC/ARR
        tim.cr1.modify(|_, w| w.urs().set_bit().arpe().set_bit());
        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.modify(|_, w| w.uif().clear_bit());

        tim.dier.modify(|_, w| w.uie().set_bit());

        debug!("tick timer: psc={} arr={}", params.psc, params.arr);
        Ok(Self { tim })
    }

    #[inline]
    pub fn start(&mut self) {
        self.tim.cnt.write(|w| unsafe { w.bits(0) });
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    #[inline]
    pub fn stop(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().clear_bit());
    }

    /// Acknowledge the update interrupt. Call first thing in the handler.
    #[inline]
    pub fn clear_update(&mut self) {
        self.tim.sr.modify(|_, w| w.uif().clear_bit());
    }

    #[inline]
    pub fn free(self) -> pac::TIM6 {
        self.tim
    }
}
