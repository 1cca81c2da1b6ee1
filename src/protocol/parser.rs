// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Frame decoder for the sensor telemetry link.
//!
//! Frames have no start marker, so the decoder works on a sliding 10-byte window over the receive
//! ring. A window whose checksum matches is consumed whole; a window that does not match costs
//! exactly one byte. The ring therefore always drains, even under sustained line noise, and the
//! decoder never waits for more than one frame's worth of data.

use crate::protocol::messages::{SensorSample, CHECKSUM_SEED, FRAME_LEN, PAYLOAD_LEN};
use crate::protocol::ring_buffer::RxRing;

/// Consumer-side decoder bound to a receive ring.
pub struct FrameDecoder<'a, const N: usize> {
    ring: &'a RxRing<N>,
}

impl<'a, const N: usize> FrameDecoder<'a, N> {
    pub fn new(ring: &'a RxRing<N>) -> Self {
        Self { ring }
    }

    /// Try to pull one frame off the ring.
    ///
    /// - Fewer than [`FRAME_LEN`] bytes buffered: returns `None`, consumes nothing.
    /// - Checksum match: consumes the frame and returns its payload.
    /// - Checksum mismatch: consumes one byte and returns `None`.
    pub fn try_decode_frame(&mut self) -> Option<SensorSample> {
        if self.ring.len() < FRAME_LEN {
            return None;
        }

        let cs = (0..PAYLOAD_LEN).fold(CHECKSUM_SEED, |cs, i| cs ^ self.ring.peek(i));

        if cs != self.ring.peek(PAYLOAD_LEN) {
            // Resync: drop the oldest byte and try again on the next call.
            self.ring.advance(1);
            return None;
        }

        let mut raw = [0u8; PAYLOAD_LEN];
        for (i, b) in raw.iter_mut().enumerate() {
            *b = self.ring.peek(i);
        }
        self.ring.advance(FRAME_LEN);

        Some(SensorSample::new(raw))
    }

    /// Decode until the ring holds no complete frame, returning the last valid sample seen.
    ///
    /// Bounded by the ring contents: every iteration consumes at least one byte.
    pub fn drain_latest(&mut self) -> Option<SensorSample> {
        let mut latest = None;
        while self.ring.len() >= FRAME_LEN {
            if let Some(sample) = self.try_decode_frame() {
                latest = Some(sample);
            }
        }
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::RawFrame;

    const PAYLOAD: [u8; PAYLOAD_LEN] = [10, 20, 30, 40, 50, 60, 70, 80, 90];

    #[test]
    fn needs_a_full_frame() {
        let ring: RxRing<32> = RxRing::new();
        let frame = RawFrame::encode(&SensorSample::new(PAYLOAD));
        ring.push_slice(&frame.bytes()[..FRAME_LEN - 1]);

        let mut dec = FrameDecoder::new(&ring);
        assert_eq!(dec.try_decode_frame(), None);
        assert_eq!(ring.len(), FRAME_LEN - 1);

        ring.push(frame.bytes()[FRAME_LEN - 1]);
        assert_eq!(dec.try_decode_frame(), Some(SensorSample::new(PAYLOAD)));
        assert!(ring.is_empty());
    }

    #[test]
    fn mismatch_drops_exactly_one_byte() {
        let ring: RxRing<32> = RxRing::new();
        let mut bytes = *RawFrame::encode(&SensorSample::new(PAYLOAD)).bytes();
        bytes[PAYLOAD_LEN] ^= 0xFF;
        ring.push_slice(&bytes);
        ring.push(0);

        let mut dec = FrameDecoder::new(&ring);
        assert_eq!(dec.try_decode_frame(), None);
        assert_eq!(ring.len(), FRAME_LEN);
    }

    #[test]
    fn drain_latest_keeps_newest() {
        let ring: RxRing<64> = RxRing::new();
        for level in [1u8, 2, 3] {
            let mut raw = PAYLOAD;
            raw[0] = level;
            ring.push_slice(RawFrame::encode(&SensorSample::new(raw)).bytes());
        }

        let mut dec = FrameDecoder::new(&ring);
        let latest = dec.drain_latest().unwrap();
        assert_eq!(latest.channel(0), Some(3));
        assert!(ring.is_empty());
    }
}
