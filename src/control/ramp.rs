// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Soft-start / soft-stop amplitude ramp.
//!
//! ```text
//!   Idle ──start()──▶ Starting ──(amplitude = 1)──▶ Running
//!    ▲                   │                            │
//!    │                 stop()                       stop()
//!    │                   ▼                            │
//!    └──(amplitude = 0)── Stopping ◀──────────────────┘
//! ```
//!
//! The amplitude is held as an integer tick count in `[0, ramp_ticks]` and exposed as
//! `ticks / ramp_ticks`, so both end points are hit exactly after `ramp_ticks` advances with no
//! float drift.
//!
//! Owned by the modulation tick: `advance()` is called once per tick, `start()` / `stop()` are
//! applied from within the same context.

/// Ramp state machine phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampPhase {
    Idle,
    Starting,
    Running,
    Stopping,
}

/// What happened during one `advance()`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampEvent {
    /// No phase change.
    None,
    /// Soft-start finished; amplitude is now exactly 1.0.
    ReachedFull,
    /// Soft-stop finished; amplitude is now exactly 0.0 and the bridge must be stopped.
    ReachedZero,
}

pub struct RampController {
    phase: RampPhase,
    /// Current amplitude in ticks, `0..=ramp_ticks`.
    level: u32,
    ramp_ticks: u32,
}

impl RampController {
    /// Create an idle ramp that spans `ramp_ticks` ticks end to end (minimum 1).
    pub const fn new(ramp_ticks: u32) -> Self {
        Self {
            phase: RampPhase::Idle,
            level: 0,
            ramp_ticks: if ramp_ticks == 0 { 1 } else { ramp_ticks },
        }
    }

    /// Begin a soft-start from zero amplitude.
    ///
    /// No-op while already Starting or Running. Returns whether the ramp was (re)started.
    pub fn start(&mut self) -> bool {
        match self.phase {
            RampPhase::Starting | RampPhase::Running => false,
            RampPhase::Idle | RampPhase::Stopping => {
                self.phase = RampPhase::Starting;
                self.level = 0;
                debug!("ramp: starting");
                true
            }
        }
    }

    /// Begin a soft-stop from the current amplitude.
    ///
    /// Only valid from Starting or Running; otherwise a no-op. Returns whether the phase changed.
    pub fn stop(&mut self) -> bool {
        match self.phase {
            RampPhase::Starting | RampPhase::Running => {
                self.phase = RampPhase::Stopping;
                debug!("ramp: stopping from {}", self.level);
                true
            }
            RampPhase::Idle | RampPhase::Stopping => false,
        }
    }

    /// Step the amplitude by one tick in the current direction.
    pub fn advance(&mut self) -> RampEvent {
        match self.phase {
            RampPhase::Idle | RampPhase::Running => RampEvent::None,
            RampPhase::Starting => {
                self.level = (self.level + 1).min(self.ramp_ticks);
                if self.level == self.ramp_ticks {
                    self.phase = RampPhase::Running;
                    debug!("ramp: running");
                    RampEvent::ReachedFull
                } else {
                    RampEvent::None
                }
            }
            RampPhase::Stopping => {
                self.level = self.level.saturating_sub(1);
                if self.level == 0 {
                    self.phase = RampPhase::Idle;
                    debug!("ramp: idle");
                    RampEvent::ReachedZero
                } else {
                    RampEvent::None
                }
            }
        }
    }

    #[inline]
    pub fn phase(&self) -> RampPhase {
        self.phase
    }

    /// Current amplitude in `[0.0, 1.0]`.
    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.level as f32 / self.ramp_ticks as f32
    }

    #[inline]
    pub fn ramp_ticks(&self) -> u32 {
        self.ramp_ticks
    }

    /// True while the bridge should be producing output.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase != RampPhase::Idle
    }
}
