// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Modulator tests against a recording fake of the bridge timers.

mod common;

use common::{FakeTimerPair, Op};
use inverter::config::{RAMP_TICKS, SINE_SAMPLES};
use inverter::control::{CommandChannel, ControlCommand, RampPhase};
use inverter::drivers::BridgeState;
use inverter::modulation::{DriveRequests, Modulator, TickOutcome};

const ARR: u16 = 999;
const RAMP: u32 = 20;

fn modulator() -> Modulator<FakeTimerPair> {
    Modulator::new(FakeTimerPair::new(ARR), RAMP)
}

/// Run the modulator until the soft-start completes.
fn run_to_full(m: &mut Modulator<FakeTimerPair>) {
    m.start();
    for _ in 0..RAMP {
        m.update();
    }
    assert_eq!(m.phase(), RampPhase::Running);
}

#[test]
fn test_init_leaves_bridge_off_at_zero_duty() {
    let m = modulator();
    assert_eq!(m.phase(), RampPhase::Idle);
    assert_eq!(m.bridge_state(), BridgeState::Stopped);
    assert_eq!(m.bridge().timers().ops, [Op::Compare(0)]);
    assert_eq!(m.table().len(), SINE_SAMPLES);
    assert_eq!(m.table().max_count(), ARR);
}

#[test]
fn test_idle_ticks_do_nothing() {
    let mut m = modulator();
    for _ in 0..10 {
        assert_eq!(m.update(), TickOutcome::Idle);
    }
    assert_eq!(m.bridge().timers().ops.len(), 1);
}

#[test]
fn test_start_wires_outputs_at_zero_duty_before_counting() {
    let mut m = modulator();
    assert!(m.start());
    assert_eq!(m.bridge_state(), BridgeState::Running);

    let ops = &m.bridge().timers().ops;
    let zero = ops.iter().rposition(|&o| o == Op::Compare(0)).unwrap();
    let outputs = ops.iter().position(|&o| o == Op::OutputsOn).unwrap();
    let moe = ops.iter().position(|&o| o == Op::MoeOn).unwrap();
    let count = ops.iter().position(|&o| o == Op::CountersOn).unwrap();
    let reset = ops.iter().position(|&o| o == Op::ResetCounters).unwrap();

    assert!(zero < outputs);
    assert!(reset < outputs);
    assert!(outputs < moe);
    assert!(moe < count);
    assert!(m.bridge().timers().is_live());
}

#[test]
fn test_soft_start_is_monotonic_and_reaches_full_exactly() {
    let mut m = modulator();
    m.start();

    let mut prev = m.amplitude();
    for tick in 1..=RAMP {
        m.update();
        let a = m.amplitude();
        assert!(a >= prev, "amplitude fell at tick {tick}");
        assert!(a <= 1.0);
        prev = a;
        if tick < RAMP {
            assert!(a < 1.0);
        }
    }
    assert_eq!(m.amplitude(), 1.0);
    assert_eq!(m.phase(), RampPhase::Running);
}

#[test]
fn test_duty_follows_table_times_amplitude() {
    let mut m = modulator();
    m.start();

    for _ in 0..3 * SINE_SAMPLES {
        let expected_index = m.tick_index();
        match m.update() {
            TickOutcome::Duty { index, value } => {
                assert_eq!(index, expected_index);
                assert!(value <= ARR);
                let ideal = m.table().get(index) as f32 * m.amplitude();
                assert!((value as f32 - ideal).abs() <= 1.0);
                assert_eq!(m.bridge().timers().compare, value);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn test_tick_index_wraps_over_table() {
    let mut m = modulator();
    run_to_full(&mut m);
    let start = m.tick_index();
    for _ in 0..SINE_SAMPLES {
        m.update();
    }
    assert_eq!(m.tick_index(), start);
}

#[test]
fn test_full_scale_peak_matches_table() {
    let mut m = modulator();
    run_to_full(&mut m);

    let mut peak = 0;
    for _ in 0..SINE_SAMPLES {
        if let TickOutcome::Duty { value, .. } = m.update() {
            peak = peak.max(value);
        }
    }
    // Table uses the target's approximate sine; allow 1 % at the crest.
    assert!(peak >= ARR - ARR / 100);
    assert!(peak <= ARR);
}

#[test]
fn test_soft_stop_stops_bridge_exactly_once() {
    let mut m = modulator();
    run_to_full(&mut m);
    assert!(m.stop());

    let mut prev = m.amplitude();
    let mut stopped_at = None;
    for tick in 1..=RAMP + 10 {
        let outcome = m.update();
        assert!(m.amplitude() <= prev);
        prev = m.amplitude();
        if outcome == TickOutcome::Stopped {
            assert!(stopped_at.is_none());
            stopped_at = Some(tick);
        }
    }

    assert_eq!(stopped_at, Some(RAMP));
    assert_eq!(m.amplitude(), 0.0);
    assert_eq!(m.phase(), RampPhase::Idle);
    assert_eq!(m.bridge_state(), BridgeState::Stopped);

    let timers = m.bridge().timers();
    assert_eq!(timers.count(Op::MoeOff), 1);
    assert!(!timers.is_live());
}

#[test]
fn test_no_duty_writes_after_stop_until_restart() {
    let mut m = modulator();
    run_to_full(&mut m);
    m.stop();
    for _ in 0..RAMP {
        m.update();
    }
    let writes = m.bridge().timers().compares().len();

    for _ in 0..50 {
        assert_eq!(m.update(), TickOutcome::Idle);
    }
    assert_eq!(m.bridge().timers().compares().len(), writes);

    assert!(m.start());
    assert!(matches!(m.update(), TickOutcome::Duty { index: 0, .. }));
}

#[test]
fn test_redundant_start_and_stop_change_nothing() {
    let mut m = modulator();
    assert!(!m.stop());
    assert_eq!(m.phase(), RampPhase::Idle);
    assert_eq!(m.bridge().timers().ops.len(), 1);

    m.start();
    m.update();
    let ops = m.bridge().timers().ops.len();
    let amplitude = m.amplitude();
    let index = m.tick_index();

    assert!(!m.start());
    assert_eq!(m.bridge().timers().ops.len(), ops);
    assert_eq!(m.amplitude(), amplitude);
    assert_eq!(m.tick_index(), index);
}

#[test]
fn test_restart_during_soft_stop_keeps_bridge_live() {
    let mut m = modulator();
    run_to_full(&mut m);
    m.stop();
    for _ in 0..RAMP / 2 {
        m.update();
    }

    assert!(m.start());
    assert_eq!(m.phase(), RampPhase::Starting);
    assert_eq!(m.amplitude(), 0.0);
    assert_eq!(m.bridge().timers().count(Op::CountersOn), 1);
    assert_eq!(m.bridge().timers().compare, 0);
    assert!(m.bridge().timers().is_live());
}

#[test]
fn test_service_applies_requests_and_commands() {
    let mut m = modulator();
    let drive = DriveRequests::new();
    let commands = CommandChannel::new();

    assert_eq!(m.service(&drive, &commands), TickOutcome::Idle);

    drive.request_start();
    commands.publish(ControlCommand::new(0.5));
    for _ in 0..RAMP {
        m.service(&drive, &commands);
    }
    assert_eq!(m.phase(), RampPhase::Running);
    assert_eq!(m.amplitude(), 0.5);

    drive.request_stop();
    let mut stops = 0;
    for _ in 0..2 * RAMP {
        if m.service(&drive, &commands) == TickOutcome::Stopped {
            stops += 1;
        }
    }
    assert_eq!(stops, 1);
    assert_eq!(m.bridge_state(), BridgeState::Stopped);
}

#[test]
fn test_command_scales_duty() {
    let mut m = modulator();
    run_to_full(&mut m);
    m.set_command(ControlCommand::new(0.25));

    for _ in 0..SINE_SAMPLES {
        if let TickOutcome::Duty { index, value } = m.update() {
            let ideal = m.table().get(index) as f32 * 0.25;
            assert!((value as f32 - ideal).abs() <= 1.0);
        }
    }
}

#[test]
fn test_default_ramp_spans_configured_ticks() {
    let mut m: Modulator<FakeTimerPair> = Modulator::new(FakeTimerPair::new(ARR), RAMP_TICKS);
    m.start();
    for _ in 0..RAMP_TICKS - 1 {
        m.update();
    }
    assert_eq!(m.phase(), RampPhase::Starting);
    m.update();
    assert_eq!(m.phase(), RampPhase::Running);
    assert_eq!(m.amplitude(), 1.0);
}
