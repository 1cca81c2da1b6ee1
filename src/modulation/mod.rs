// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Sine Modulation
//!
//! - [`sine_table`] - Duty lookup over one electrical cycle.
//! - [`modulator`] - Per-tick update tying the table, the ramp and the bridge together.

pub mod modulator;
pub mod sine_table;

pub use modulator::{DriveRequest, DriveRequests, Modulator, TickOutcome};
pub use sine_table::SineTable;
