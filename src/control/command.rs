// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Amplitude command handoff between the decode loop and the modulation tick.
//!
//! [`CommandChannel`] is a single-slot mailbox: a write replaces whatever is there, a read sees
//! the newest value or nothing. Writers never block and there is no queue. The slot is a single
//! `AtomicU32` holding the `f32` bit pattern, so a reader can never observe a torn value.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::protocol::SensorSample;

/// Empty-slot marker. A NaN pattern, never produced by a valid level.
const EMPTY: u32 = u32::MAX;

/// Normalized amplitude target in `[0.0, 1.0]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlCommand {
    level: f32,
}

impl ControlCommand {
    /// Full-scale command.
    pub const FULL: Self = Self { level: 1.0 };

    /// Build a command, clamping `level` into `[0.0, 1.0]` (NaN maps to 0).
    pub fn new(level: f32) -> Self {
        let level = if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        };
        Self { level }
    }

    /// Linear map of sensor channel 0: `raw[0] / 255`.
    pub fn from_sample(sample: &SensorSample) -> Self {
        Self {
            level: sample.raw()[0] as f32 / 255.0,
        }
    }

    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }
}

/// Single-slot, overwrite-on-write command mailbox.
pub struct CommandChannel {
    slot: AtomicU32,
}

impl CommandChannel {
    pub const fn new() -> Self {
        Self {
            slot: AtomicU32::new(EMPTY),
        }
    }

    /// Store `cmd`, discarding any unread previous command.
    #[inline]
    pub fn publish(&self, cmd: ControlCommand) {
        self.slot.store(cmd.level.to_bits(), Ordering::Release);
    }

    /// Take the pending command, leaving the slot empty.
    #[inline]
    pub fn take(&self) -> Option<ControlCommand> {
        Self::decode(self.slot.swap(EMPTY, Ordering::AcqRel))
    }

    /// Look at the pending command without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<ControlCommand> {
        Self::decode(self.slot.load(Ordering::Acquire))
    }

    fn decode(bits: u32) -> Option<ControlCommand> {
        if bits == EMPTY {
            None
        } else {
            Some(ControlCommand {
                level: f32::from_bits(bits),
            })
        }
    }
}

impl Default for CommandChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a decoded sample to a command and publish it. Returns the published command.
pub fn publish_sample(channel: &CommandChannel, sample: &SensorSample) -> ControlCommand {
    let cmd = ControlCommand::from_sample(sample);
    channel.publish(cmd);
    trace!("command level {}", cmd.level());
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(first: u8) -> SensorSample {
        SensorSample::new([first, 0, 0, 0, 0, 0, 0, 0, 0])
    }

    #[test]
    fn mapping_is_linear_over_a_byte() {
        assert_eq!(ControlCommand::from_sample(&sample(0)).level(), 0.0);
        assert_eq!(ControlCommand::from_sample(&sample(255)).level(), 1.0);
        let mid = ControlCommand::from_sample(&sample(51)).level();
        assert!((mid - 0.2).abs() < 1e-6);
    }

    #[test]
    fn empty_until_published() {
        let ch = CommandChannel::new();
        assert_eq!(ch.peek(), None);
        assert_eq!(ch.take(), None);
    }

    #[test]
    fn newest_value_wins() {
        let ch = CommandChannel::new();
        publish_sample(&ch, &sample(10));
        publish_sample(&ch, &sample(20));
        publish_sample(&ch, &sample(255));

        assert_eq!(ch.peek(), Some(ControlCommand::FULL));
        assert_eq!(ch.take(), Some(ControlCommand::FULL));
        assert_eq!(ch.take(), None);
    }

    #[test]
    fn new_clamps_out_of_range() {
        assert_eq!(ControlCommand::new(1.5).level(), 1.0);
        assert_eq!(ControlCommand::new(-0.5).level(), 0.0);
        assert_eq!(ControlCommand::new(f32::NAN).level(), 0.0);
    }
}
