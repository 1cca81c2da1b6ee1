// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Inverter Firmware
//!
//! This crate drives a single-phase inverter bridge: it receives sensor telemetry over a serial
//! link, turns it into an amplitude command, and synthesizes a sine-weighted PWM pattern on two
//! complementary timer legs with soft-start and soft-stop ramping. The board target is an
//! STM32F767 (NUCLEO-F767ZI).
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Compile-time tunables (table size, output frequency, ramp duration, ...) |
//! | [`timing`] | Prescaler / auto-reload solver for the carrier and tick timers |
//! | [`protocol`] | Serial frame format, receive ring buffer and frame decoder |
//! | [`control`] | Command handoff and the soft-start/soft-stop ramp |
//! | [`modulation`] | Sine table and the per-tick modulator |
//! | [`drivers`] | Bridge driver over a pair of complementary PWM timers |
//! | `hw` | MCU-level timer, USART and LED wrappers (`board` feature only) |
//!
//! Everything outside `hw` is hardware-agnostic and is tested on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod drivers;
pub mod modulation;
pub mod protocol;
pub mod timing;

#[cfg(feature = "board")]
pub mod hw;
