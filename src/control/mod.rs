// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Layer
//!
//! Open-loop amplitude control for the inverter.
//!
//! ## Modules
//!
//! - [`command`] - Sensor-to-amplitude mapping and the single-slot command mailbox.
//! - [`ramp`] - Soft-start / soft-stop amplitude state machine.

pub mod command;
pub mod ramp;

pub use command::{CommandChannel, ControlCommand};
pub use ramp::{RampController, RampEvent, RampPhase};
