// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Precomputed sine duty table.
//!
//! One full electrical cycle sampled at `N` points, offset and scaled into `0..=max_count` so it
//! can be written straight into a compare register:
//!
//! `table[i] = round((sin(2πi/N) · 0.5 + 0.5) · max_count)`

use core::f32::consts::PI;

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::SINE_SAMPLES;

pub struct SineTable<const N: usize = SINE_SAMPLES> {
    samples: [u16; N],
    max_count: u16,
}

impl<const N: usize> SineTable<N> {
    /// Build the table for a timer whose counter tops out at `max_count` (ARR).
    pub fn new(max_count: u16) -> Self {
        let mut samples = [0u16; N];
        let scale = max_count as f32;

        for (i, s) in samples.iter_mut().enumerate() {
            let theta = 2.0 * PI * i as f32 / N as f32;
            let v = (theta.sin() * 0.5 + 0.5) * scale;
            *s = ((v + 0.5) as u16).min(max_count);
        }

        Self { samples, max_count }
    }

    /// Compare value at `idx` (wrapped to the table length).
    #[inline]
    pub fn get(&self, idx: usize) -> u16 {
        self.samples[idx % N]
    }

    /// Compare value at `idx` scaled by `amplitude` in `[0, 1]`.
    #[inline]
    pub fn scaled(&self, idx: usize, amplitude: f32) -> u16 {
        let amplitude = amplitude.clamp(0.0, 1.0);
        (self.get(idx) as f32 * amplitude) as u16
    }

    #[inline]
    pub fn max_count(&self) -> u16 {
        self.max_count
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.samples
    }
}
