// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Level Drivers
//!
//! This module contains drivers that sit above the raw register layer and below the modulation
//! logic.
//!
//! ## Existing drivers
//!
//! - [`bridge`] – Full bridge on two complementary PWM timers, with atomic start/stop.

pub mod bridge;

pub use bridge::{BridgeDriver, BridgeState, TimerPair};
