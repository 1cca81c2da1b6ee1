// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Sensor Link Protocol
//!
//! - [`messages`] - Frame layout, checksum and `SensorSample`.
//! - [`ring_buffer`] - Interrupt-fed byte ring (single producer, single consumer).
//! - [`parser`] - Checksum-synchronized frame decoder.
//! - [`simulated`] - Constant-reading stand-in for the sensor board.

pub mod messages;
pub mod parser;
pub mod ring_buffer;
pub mod simulated;

pub use messages::{RawFrame, SensorSample};
pub use parser::FrameDecoder;
pub use ring_buffer::RxRing;
pub use simulated::SimulatedSensor;
