// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time configuration.
//!
//! There is no runtime configuration surface; every tunable lives here.

/// Number of points per full sine wave.
pub const SINE_SAMPLES: usize = 100;

/// Desired output frequency (Hz).
pub const SINE_FREQ_HZ: u32 = 50;

/// Total soft-ramp time (ms), used for both soft-start and soft-stop.
pub const SOFT_MS: u32 = 1000;

/// Modulation tick rate (Hz): one sine table entry per tick.
pub const UPDATE_FREQ_HZ: u32 = SINE_SAMPLES as u32 * SINE_FREQ_HZ;

/// Number of ticks for a full 0 -> 1 (or 1 -> 0) ramp.
pub const RAMP_TICKS: u32 = UPDATE_FREQ_HZ * SOFT_MS / 1000;

/// PWM carrier frequency of both bridge timers (Hz).
pub const CARRIER_FREQ_HZ: u32 = 16_000;

/// Bridge dead-time in timer clock cycles (BDTR.DTG, linear range).
pub const DEAD_TIME_TICKS: u8 = 100;

/// Receive ring buffer capacity (bytes).
pub const RX_BUFFER_SIZE: usize = 128;

/// Telemetry link baud rate.
pub const UART_BAUD: u32 = 115_200;

/// Period between simulated sensor frames (ms).
pub const SIM_PERIOD_MS: u32 = 50;

/// Steps of the experimental manual soft-start.
pub const MANUAL_SOFT_START_STEPS: u32 = 100;

/// Duration of the experimental manual soft-start (ms).
pub const MANUAL_SOFT_START_MS: u32 = 1000;

/// Heartbeat LED toggle period (ms).
pub const HEARTBEAT_PERIOD_MS: u32 = 500;

/// User button sampling period (ms).
pub const BUTTON_POLL_MS: u32 = 20;

/// Ticks between toggles of the tick activity LED (toggles twice a second).
pub const TICK_LED_DIVIDER: u32 = UPDATE_FREQ_HZ / 2;

const _: () = assert!(RAMP_TICKS > 0, "ramp must span at least one tick");
const _: () = assert!(SINE_SAMPLES > 0);
