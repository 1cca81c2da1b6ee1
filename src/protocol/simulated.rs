// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Stand-in sensor for bench testing without the measurement board.
//!
//! Produces the same constant reading on every call, framed exactly as the real sender frames
//! it, so the whole receive path (ring, decoder, control mapping) is exercised.

use crate::protocol::messages::{RawFrame, SensorSample, PAYLOAD_LEN};

/// Reading reported by the simulated sensor.
pub const SIMULATED_PAYLOAD: [u8; PAYLOAD_LEN] = [10, 20, 30, 40, 50, 60, 70, 80, 90];

pub struct SimulatedSensor {
    frame: RawFrame,
    period_ms: u32,
    elapsed_ms: u32,
}

impl SimulatedSensor {
    /// Emit one frame every `period_ms`.
    pub fn new(period_ms: u32) -> Self {
        Self {
            frame: RawFrame::encode(&SensorSample::new(SIMULATED_PAYLOAD)),
            period_ms,
            elapsed_ms: 0,
        }
    }

    /// Advance the simulated clock by `dt_ms`. Returns the frame when one is due.
    pub fn poll(&mut self, dt_ms: u32) -> Option<&RawFrame> {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if self.elapsed_ms < self.period_ms {
            return None;
        }
        self.elapsed_ms -= self.period_ms;
        Some(&self.frame)
    }
}
