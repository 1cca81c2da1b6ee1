// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Shared test doubles.

#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use inverter::drivers::TimerPair;

/// One register-level operation on the bridge timers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Latch,
    ResetCounters,
    OutputsOn,
    OutputsOff,
    MoeOn,
    MoeOff,
    CountersOn,
    CountersOff,
    Compare(u16),
}

/// Records every operation and mirrors the register state it would leave behind.
#[derive(Debug)]
pub struct FakeTimerPair {
    pub ops: Vec<Op>,
    pub arr: u16,
    pub compare: u16,
    pub counting: bool,
    pub outputs: bool,
    pub moe: bool,
}

impl FakeTimerPair {
    pub fn new(arr: u16) -> Self {
        Self {
            ops: Vec::new(),
            arr,
            compare: 0xFFFF,
            counting: false,
            outputs: false,
            moe: false,
        }
    }

    /// Number of times `op` was issued.
    pub fn count(&self, op: Op) -> usize {
        self.ops.iter().filter(|&&o| o == op).count()
    }

    /// Compare values written, in order.
    pub fn compares(&self) -> Vec<u16> {
        self.ops
            .iter()
            .filter_map(|o| match o {
                Op::Compare(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn is_live(&self) -> bool {
        self.counting && self.outputs && self.moe
    }
}

impl TimerPair for FakeTimerPair {
    fn latch_preload(&mut self) {
        self.ops.push(Op::Latch);
    }

    fn reset_counters(&mut self) {
        self.ops.push(Op::ResetCounters);
    }

    fn enable_outputs(&mut self) {
        self.outputs = true;
        self.ops.push(Op::OutputsOn);
    }

    fn disable_outputs(&mut self) {
        self.outputs = false;
        self.ops.push(Op::OutputsOff);
    }

    fn enable_main_output(&mut self) {
        self.moe = true;
        self.ops.push(Op::MoeOn);
    }

    fn disable_main_output(&mut self) {
        self.moe = false;
        self.ops.push(Op::MoeOff);
    }

    fn start_counters(&mut self) {
        self.counting = true;
        self.ops.push(Op::CountersOn);
    }

    fn stop_counters(&mut self) {
        self.counting = false;
        self.ops.push(Op::CountersOff);
    }

    fn set_compare(&mut self, value: u16) {
        self.compare = value;
        self.ops.push(Op::Compare(value));
    }

    fn max_count(&self) -> u16 {
        self.arr
    }
}

/// Delay that only records what was asked of it.
#[derive(Debug, Default)]
pub struct CountingDelay {
    pub calls: u32,
    pub total_ms: u32,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ms += ns / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ms += ms;
    }
}
