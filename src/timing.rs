// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Timer period solver.
//!
//! Finds a prescaler / auto-reload pair for a 16-bit STM32 timer so that the update event fires at
//! the requested frequency. The smallest prescaler that fits is chosen, which keeps the
//! auto-reload (and therefore the PWM resolution) as large as possible.

/// Reasons a frequency cannot be produced by a 16-bit timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Requested frequency was zero.
    ZeroFrequency,
    /// Requested frequency needs fewer than two timer clocks per period.
    FrequencyTooHigh,
}

/// Prescaler and auto-reload register values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerParams {
    pub psc: u16,
    pub arr: u16,
}

impl TimerParams {
    /// Update frequency actually produced from `timer_clk_hz`.
    pub fn frequency_hz(&self, timer_clk_hz: u32) -> u32 {
        let period = (self.psc as u64 + 1) * (self.arr as u64 + 1);
        (timer_clk_hz as u64 / period) as u32
    }
}

/// Compute `(psc, arr)` for an up-counting timer clocked at `timer_clk_hz`.
pub fn solve(timer_clk_hz: u32, freq_hz: u32) -> Result<TimerParams, TimingError> {
    if freq_hz == 0 {
        return Err(TimingError::ZeroFrequency);
    }

    let ticks = timer_clk_hz / freq_hz;
    if ticks < 2 {
        return Err(TimingError::FrequencyTooHigh);
    }

    // Smallest prescaler that brings the period under 2^16. A u32 tick count always fits in
    // 16 + 16 bits, so the prescaler cannot overflow.
    let psc = (ticks - 1) / 0x1_0000;

    let arr = ticks / (psc + 1) - 1;

    Ok(TimerParams {
        psc: psc as u16,
        arr: arr as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrier_fits_without_prescaler() {
        // 216 MHz APB2 timer clock, 16 kHz carrier
        let p = solve(216_000_000, 16_000).unwrap();
        assert_eq!(p.psc, 0);
        assert_eq!(p.arr, 13_499);
        assert_eq!(p.frequency_hz(216_000_000), 16_000);
    }

    #[test]
    fn tick_timer_needs_prescaler() {
        // 108 MHz APB1 timer clock, 5 kHz tick
        let p = solve(108_000_000, 5_000).unwrap();
        assert_eq!(p.psc, 0);
        assert_eq!(p.arr, 21_599);

        let slow = solve(108_000_000, 50).unwrap();
        assert!(slow.psc > 0);
        assert_eq!(slow.frequency_hz(108_000_000), 50);
    }

    #[test]
    fn rejects_impossible_frequencies() {
        assert_eq!(solve(1_000_000, 0), Err(TimingError::ZeroFrequency));
        assert_eq!(solve(1_000_000, 1_000_000), Err(TimingError::FrequencyTooHigh));
    }

    #[test]
    fn slowest_possible_period_still_fits() {
        let p = solve(u32::MAX, 1).unwrap();
        assert_eq!(p.psc, 0xFFFF);
        assert_eq!(p.arr, 0xFFFE);
    }
}
