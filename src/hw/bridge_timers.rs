// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! TIM1 + TIM8 as the two bridge legs.
//!
//! Both timers run edge-aligned PWM mode 1 on channel 1 with the complementary output (CH1N)
//! enabled and a fixed dead time inserted by the break/dead-time unit. Compare and auto-reload
//! registers are preloaded, so a new duty takes effect at the next update event.
//!
//! Registers are driven directly through the PAC, the HAL PWM wrapper has no complementary
//! output support on this family.

use stm32f7xx_hal::pac;

use crate::config::{CARRIER_FREQ_HZ, DEAD_TIME_TICKS};
use crate::drivers::TimerPair;
use crate::timing::{self, TimerParams, TimingError};

pub struct BridgeTimers {
    tim1: pac::TIM1,
    tim8: pac::TIM8,
    arr: u16,
}

impl BridgeTimers {
    /// Enable, reset and configure both timers for the carrier frequency.
    ///
    /// `timer_clk_hz` is the APB2 timer kernel clock. Counters and outputs are left off.
    pub fn new(tim1: pac::TIM1, tim8: pac::TIM8, timer_clk_hz: u32) -> Result<Self, TimingError> {
        let params = timing::solve(timer_clk_hz, CARRIER_FREQ_HZ)?;

        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr
            .modify(|_, w| w.tim1en().set_bit().tim8en().set_bit());
        rcc.apb2rstr
            .modify(|_, w| w.tim1rst().set_bit().tim8rst().set_bit());
        rcc.apb2rstr
            .modify(|_, w| w.tim1rst().clear_bit().tim8rst().clear_bit());

        configure_leg(&tim1, params, DEAD_TIME_TICKS);
        configure_leg(&tim8, params, DEAD_TIME_TICKS);

        debug!(
            "bridge timers: psc={} arr={} dtg={}",
            params.psc, params.arr, DEAD_TIME_TICKS
        );

        Ok(Self {
            tim1,
            tim8,
            arr: params.arr,
        })
    }

    /// Release both timers. Outputs are gated off first.
    pub fn free(mut self) -> (pac::TIM1, pac::TIM8) {
        self.disable_main_output();
        self.stop_counters();
        (self.tim1, self.tim8)
    }

    #[inline]
    fn legs(&self) -> [&pac::tim1::RegisterBlock; 2] {
        [&self.tim1, &self.tim8]
    }
}

fn configure_leg(tim: &pac::tim1::RegisterBlock, params: TimerParams, dead_time: u8) {
    // Disable counter while configuring
    tim.cr1.modify(|_, w| w.cen().clear_bit());

    // Edge-aligned, up-counting, ARR preload
    tim.cr1.modify(|_, w| unsafe { w.cms().bits(0b00) }.dir().clear_bit().arpe().set_bit());

    tim.psc.write(|w| unsafe { w.bits(params.psc as u32) });
    tim.arr.write(|w| unsafe { w.bits(params.arr as u32) });

    // CH1 output, PWM mode 1, CCR preload
    tim.ccmr1_output()
        .modify(|_, w| unsafe { w.cc1s().bits(0b00).oc1m().bits(0b110) }.oc1pe().set_bit());

    // Both polarities active-high, outputs disabled until start
    tim.ccer.modify(|_, w| {
        w.cc1p()
            .clear_bit()
            .cc1np()
            .clear_bit()
            .cc1e()
            .clear_bit()
            .cc1ne()
            .clear_bit()
    });

    // Dead time, off-state selection in run mode, MOE cleared
    tim.bdtr.modify(|_, w| {
        unsafe { w.dtg().bits(dead_time) }
            .ossr()
            .set_bit()
            .aoe()
            .clear_bit()
            .moe()
            .clear_bit()
    });

    tim.ccr1().write(|w| unsafe { w.bits(0) });
    tim.cnt.write(|w| unsafe { w.bits(0) });

    // Load PSC/ARR/CCR now, without raising an update interrupt
    tim.cr1.modify(|_, w| w.urs().set_bit());
    tim.egr.write(|w| w.ug().set_bit());
    tim.sr.modify(|_, w| w.uif().clear_bit());
}

impl TimerPair for BridgeTimers {
    fn latch_preload(&mut self) {
        for tim in self.legs() {
            tim.egr.write(|w| w.ug().set_bit());
        }
    }

    fn reset_counters(&mut self) {
        for tim in self.legs() {
            tim.cnt.write(|w| unsafe { w.bits(0) });
        }
    }

    fn enable_outputs(&mut self) {
        for tim in self.legs() {
            tim.ccer.modify(|_, w| w.cc1e().set_bit().cc1ne().set_bit());
        }
    }

    fn disable_outputs(&mut self) {
        for tim in self.legs() {
            tim.ccer.modify(|_, w| w.cc1e().clear_bit().cc1ne().clear_bit());
        }
    }

    fn enable_main_output(&mut self) {
        for tim in self.legs() {
            tim.bdtr.modify(|_, w| w.moe().set_bit());
        }
    }

    fn disable_main_output(&mut self) {
        for tim in self.legs() {
            tim.bdtr.modify(|_, w| w.moe().clear_bit());
        }
    }

    fn start_counters(&mut self) {
        for tim in self.legs() {
            tim.cr1.modify(|_, w| w.cen().set_bit());
        }
    }

    fn stop_counters(&mut self) {
        for tim in self.legs() {
            tim.cr1.modify(|_, w| w.cen().clear_bit());
        }
    }

    fn set_compare(&mut self, value: u16) {
        for tim in self.legs() {
            tim.ccr1().write(|w| unsafe { w.bits(value as u32) });
        }
    }

    #[inline]
    fn max_count(&self) -> u16 {
        self.arr
    }
}

/// Gate both bridge legs off without owning the timers.
///
/// For fault handlers only, where the owning [`BridgeTimers`] is unreachable.
pub fn emergency_off() {
    let tim1 = unsafe { &*pac::TIM1::ptr() };
    let tim8 = unsafe { &*pac::TIM8::ptr() };
    for tim in [tim1, tim8] {
        tim.bdtr.modify(|_, w| w.moe().clear_bit());
        tim.cr1.modify(|_, w| w.cen().clear_bit());
    }
}
