// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Sensor telemetry frame format.
//!
//! A frame is 10 bytes with no delimiter or length field:
//!
//! | Byte | Content |
//! | ---- | ------- |
//! | 0..9 | Payload (9 raw sensor values) |
//! | 9    | Checksum: XOR of the payload bytes, seeded with [`CHECKSUM_SEED`] |
//!
//! Receivers synchronize purely on the checksum.

/// XOR seed of the frame checksum.
pub const CHECKSUM_SEED: u8 = 0x55;

/// Payload bytes per frame.
pub const PAYLOAD_LEN: usize = 9;

/// Total bytes per frame (payload + checksum).
pub const FRAME_LEN: usize = PAYLOAD_LEN + 1;

/// Checksum over a payload.
#[inline]
pub fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(CHECKSUM_SEED, |cs, &b| cs ^ b)
}

/// One decoded set of sensor readings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSample {
    raw: [u8; PAYLOAD_LEN],
}

impl SensorSample {
    pub const fn new(raw: [u8; PAYLOAD_LEN]) -> Self {
        Self { raw }
    }

    #[inline]
    pub fn raw(&self) -> &[u8; PAYLOAD_LEN] {
        &self.raw
    }

    /// Single channel reading. Channel 0 carries the amplitude command.
    #[inline]
    pub fn channel(&self, idx: usize) -> Option<u8> {
        self.raw.get(idx).copied()
    }
}

/// A complete frame as it appears on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawFrame {
    bytes: [u8; FRAME_LEN],
}

impl RawFrame {
    /// Build a valid frame carrying `sample`.
    pub fn encode(sample: &SensorSample) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[..PAYLOAD_LEN].copy_from_slice(sample.raw());
        bytes[PAYLOAD_LEN] = checksum(sample.raw());
        Self { bytes }
    }

    /// Wrap 10 received bytes without validating them.
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        checksum(&self.bytes[..PAYLOAD_LEN]) == self.bytes[PAYLOAD_LEN]
    }

    /// Payload of a valid frame, `None` on checksum mismatch.
    pub fn decode(&self) -> Option<SensorSample> {
        if !self.is_valid() {
            return None;
        }
        let mut raw = [0u8; PAYLOAD_LEN];
        raw.copy_from_slice(&self.bytes[..PAYLOAD_LEN]);
        Some(SensorSample::new(raw))
    }
}
