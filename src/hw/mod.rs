// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Board Support
//!
//! Peripheral wrappers for the NUCLEO-F767ZI. Only built with the `board` feature.
//!
//! - [`bridge_timers`] - TIM1/TIM8 complementary PWM, the [`TimerPair`](crate::drivers::TimerPair)
//!   implementation.
//! - [`tick_timer`] - TIM6 modulation tick.
//! - [`usart`] - USART3 status console and frame RX.
//! - [`led`] - User LEDs.
//! - [`delay`] - Core-clock busy-wait delay.
//! - [`pins`] - Pin map.

pub mod bridge_timers;
pub mod delay;
pub mod led;
pub mod pins;
pub mod tick_timer;
pub mod usart;

pub use bridge_timers::BridgeTimers;
pub use delay::CycleDelay;
pub use led::{BlinkLed, Led};
pub use pins::BoardPins;
pub use tick_timer::TickTimer;
pub use usart::{LinkRx, Usart};
