// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Sine-weighted PWM modulator.
//!
//! Ties the sine table, the amplitude ramp and the bridge driver together. [`Modulator::service`]
//! is the tick-handler entry point: it runs once per modulation tick (table length × output
//! frequency), never blocks and never allocates.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! // task context
//! DRIVE.request_start();
//! COMMANDS.publish(ControlCommand::from_sample(&sample));
//!
//! // tick interrupt
//! modulator.service(&DRIVE, &COMMANDS);
//! ```
//!
//! Start/Stop requested from task context go through [`DriveRequests`] and are applied at the top
//! of the next tick, so the ramp state is only ever touched from the tick context. Stop is
//! cooperative: the bridge is switched off `ramp_ticks` ticks later, not when `stop()` returns.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::config::SINE_SAMPLES;
use crate::control::{CommandChannel, ControlCommand, RampController, RampEvent, RampPhase};
use crate::drivers::{BridgeDriver, BridgeState, TimerPair};
use crate::modulation::SineTable;

/// Start/stop request posted from task context.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DriveRequest {
    Start = 1,
    Stop = 2,
}

const NO_REQUEST: u8 = 0;

/// Single-slot request register. The newest request replaces an unapplied older one.
pub struct DriveRequests {
    pending: AtomicU8,
}

impl DriveRequests {
    pub const fn new() -> Self {
        Self {
            pending: AtomicU8::new(NO_REQUEST),
        }
    }

    #[inline]
    pub fn request_start(&self) {
        self.pending.store(DriveRequest::Start as u8, Ordering::Release);
    }

    #[inline]
    pub fn request_stop(&self) {
        self.pending.store(DriveRequest::Stop as u8, Ordering::Release);
    }

    /// Take the pending request, if any.
    #[inline]
    pub fn take(&self) -> Option<DriveRequest> {
        match self.pending.swap(NO_REQUEST, Ordering::AcqRel) {
            1 => Some(DriveRequest::Start),
            2 => Some(DriveRequest::Stop),
            _ => None,
        }
    }
}

impl Default for DriveRequests {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one modulation tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Nothing to do, the bridge is off.
    Idle,
    /// The soft-stop finished on this tick and the bridge was switched off.
    Stopped,
    /// `value` was written to both compare registers for table entry `index`.
    Duty { index: usize, value: u16 },
}

pub struct Modulator<T: TimerPair, const N: usize = SINE_SAMPLES> {
    table: SineTable<N>,
    ramp: RampController,
    bridge: BridgeDriver<T>,
    tick_index: usize,
    /// Commanded level, multiplies the ramp envelope.
    level: f32,
}

impl<T: TimerPair, const N: usize> Modulator<T, N> {
    /// Build the sine table for the bridge timer period and clear all state.
    ///
    /// The bridge is left stopped with zero compare values.
    pub fn new(timers: T, ramp_ticks: u32) -> Self {
        let mut bridge = BridgeDriver::new(timers);
        bridge.set_compare(0);

        Self {
            table: SineTable::new(bridge.max_count()),
            ramp: RampController::new(ramp_ticks),
            bridge,
            tick_index: 0,
            level: ControlCommand::FULL.level(),
        }
    }

    /// Begin a soft-start.
    ///
    /// Restarts the table from index 0 and energizes the bridge at zero duty if it is off. No-op
    /// while already starting or running. Returns whether anything changed.
    pub fn start(&mut self) -> bool {
        if !self.ramp.start() {
            return false;
        }

        self.tick_index = 0;
        if !self.bridge.start() {
            // Restart during soft-stop: bridge is still live, just drop back to zero duty.
            self.bridge.set_compare(0);
        }
        info!("modulator: start");
        true
    }

    /// Begin a soft-stop. The bridge turns off when the ramp reaches zero.
    pub fn stop(&mut self) -> bool {
        let changed = self.ramp.stop();
        if changed {
            info!("modulator: stop requested");
        }
        changed
    }

    /// Set the commanded level that scales the ramp envelope.
    #[inline]
    pub fn set_command(&mut self, cmd: ControlCommand) {
        self.level = cmd.level();
    }

    /// One modulation tick.
    pub fn update(&mut self) -> TickOutcome {
        if self.ramp.advance() == RampEvent::ReachedZero {
            self.bridge.stop();
            return TickOutcome::Stopped;
        }

        if !self.ramp.is_active() {
            return TickOutcome::Idle;
        }

        let index = self.tick_index;
        let value = self.table.scaled(index, self.amplitude());
        self.bridge.set_compare(value);
        self.tick_index = (index + 1) % N;

        TickOutcome::Duty { index, value }
    }

    /// Tick-handler entry point: apply pending requests and the newest command, then tick.
    pub fn service(&mut self, requests: &DriveRequests, commands: &CommandChannel) -> TickOutcome {
        match requests.take() {
            Some(DriveRequest::Start) => {
                self.start();
            }
            Some(DriveRequest::Stop) => {
                self.stop();
            }
            None => {}
        }

        if let Some(cmd) = commands.take() {
            self.set_command(cmd);
        }

        self.update()
    }

    /// Effective amplitude: ramp envelope × commanded level.
    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.ramp.amplitude() * self.level
    }

    #[inline]
    pub fn phase(&self) -> RampPhase {
        self.ramp.phase()
    }

    #[inline]
    pub fn bridge_state(&self) -> BridgeState {
        self.bridge.state()
    }

    #[inline]
    pub fn tick_index(&self) -> usize {
        self.tick_index
    }

    #[inline]
    pub fn table(&self) -> &SineTable<N> {
        &self.table
    }

    #[inline]
    pub fn bridge(&self) -> &BridgeDriver<T> {
        &self.bridge
    }

    /// Direct access for the experimental manual soft-start and diagnostics.
    #[inline]
    pub fn bridge_mut(&mut self) -> &mut BridgeDriver<T> {
        &mut self.bridge
    }
}
