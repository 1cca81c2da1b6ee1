// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Inverter bridge driver.
//!
//! The bridge is two switch legs, each driven by one advanced-control timer with complementary
//! outputs (CHx + CHxN). The two timers have no hardware master/slave link, so they are kept in
//! lockstep by running their start and stop sequences back to back inside one critical section.
//! The residual skew is a few instructions, negligible next to the carrier period.
//!
//! The register-level operations live behind [`TimerPair`], implemented once per target (see
//! `hw::bridge_timers`) and by a recording fake in the tests.

use embedded_hal::delay::DelayNs;

/// Register-level capability of the two bridge timers.
///
/// Every method acts on both timers, first leg then second leg.
pub trait TimerPair {
    /// Generate an update event so preloaded PSC/ARR/CCR values become active.
    fn latch_preload(&mut self);

    /// Set both counters to zero.
    fn reset_counters(&mut self);

    /// Enable main and complementary channel outputs (CCxE + CCxNE).
    fn enable_outputs(&mut self);

    /// Disable main and complementary channel outputs.
    fn disable_outputs(&mut self);

    /// Set the master output-enable bit (BDTR.MOE).
    fn enable_main_output(&mut self);

    /// Clear the master output-enable bit. Gates the pins regardless of counter state.
    fn disable_main_output(&mut self);

    /// Start both counters (CR1.CEN).
    fn start_counters(&mut self);

    /// Stop both counters.
    fn stop_counters(&mut self);

    /// Write the same compare value to both legs.
    fn set_compare(&mut self, value: u16);

    /// Counter top value (ARR). Compare values above this are never written.
    fn max_count(&self) -> u16;
}

/// Logical state of the bridge outputs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeState {
    Stopped,
    Running,
}

pub struct BridgeDriver<T: TimerPair> {
    timers: T,
    state: BridgeState,
}

impl<T: TimerPair> BridgeDriver<T> {
    /// Wrap already-configured timers. The bridge is assumed stopped.
    pub fn new(timers: T) -> Self {
        Self {
            timers,
            state: BridgeState::Stopped,
        }
    }

    /// Release the timers.
    pub fn free(self) -> T {
        self.timers
    }

    #[inline]
    pub fn state(&self) -> BridgeState {
        self.state
    }

    #[inline]
    pub fn max_count(&self) -> u16 {
        self.timers.max_count()
    }

    #[inline]
    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Energize the bridge.
    ///
    /// Runs atomically, in this order: zero both compares, latch preload, reset counters, enable
    /// channel outputs, set MOE, start counters. Outputs are therefore wired with a zero duty and
    /// a zero counter before anything counts, so the first pulse has a defined width.
    ///
    /// No-op when already running. Returns whether the sequence ran.
    pub fn start(&mut self) -> bool {
        if self.state == BridgeState::Running {
            return false;
        }

        let timers = &mut self.timers;
        critical_section::with(|_| {
            timers.set_compare(0);
            timers.latch_preload();
            timers.reset_counters();
            timers.enable_outputs();
            timers.enable_main_output();
            timers.start_counters();
        });

        self.state = BridgeState::Running;
        info!("bridge: started");
        true
    }

    /// De-energize the bridge.
    ///
    /// Runs atomically, in this order: clear MOE, stop counters, disable channel outputs, reset
    /// counters. The sequence always runs, even if the bridge is believed stopped.
    ///
    /// Returns whether the bridge was running.
    pub fn stop(&mut self) -> bool {
        let timers = &mut self.timers;
        critical_section::with(|_| {
            timers.disable_main_output();
            timers.stop_counters();
            timers.disable_outputs();
            timers.reset_counters();
        });

        let was_running = self.state == BridgeState::Running;
        self.state = BridgeState::Stopped;
        info!("bridge: stopped");
        was_running
    }

    /// Write a duty compare value to both legs, clamped to the counter top.
    #[inline]
    pub fn set_compare(&mut self, value: u16) {
        let max = self.timers.max_count();
        self.timers.set_compare(value.min(max));
    }

    /// Experimental fixed-duty soft-start, independent of the sine modulator.
    ///
    /// Starts the bridge at zero duty, then raises the compare value linearly to 50 % of the
    /// carrier period in `steps` increments spread over `duration_ms`. Blocks the caller for the
    /// whole ramp.
    pub fn manual_soft_start<D: DelayNs>(&mut self, delay: &mut D, steps: u32, duration_ms: u32) {
        let steps = steps.max(1);
        let target = (self.timers.max_count() as u32 + 1) / 2;
        let step_delay_ms = duration_ms / steps;

        self.start();

        for step in 1..=steps {
            let ccr = target * step / steps;
            self.set_compare(ccr as u16);
            delay.delay_ms(step_delay_ms);
        }
        debug!("bridge: manual soft-start done at {}", target);
    }
}
