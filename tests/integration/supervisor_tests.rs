//! Integration tests for the supervisor → edge detector → FSM → relay
//! pipeline.
//!
//! These run on the host and verify the full polling chain from a sampled
//! input level down to a relay write, using scripted mock GPIO and
//! explicit monotonic timestamps — no real hardware, no real time.

use crate::mock_hw::{MockGpio, RecordingSink};

use trigguard::app::events::AppEvent;
use trigguard::app::service::ChannelSupervisor;
use trigguard::config::{ChannelConfig, SystemConfig};
use trigguard::fsm::StateId;
use trigguard::pins;

/// Windows from the testable-properties scenarios: confirm 20s,
/// second rise 15s.
fn test_config(channel_count: usize) -> SystemConfig {
    let mut config = SystemConfig::default();
    config.channels.clear();
    for i in 0..channel_count {
        config
            .channels
            .push(ChannelConfig {
                input_gpio: pins::INPUT_GPIOS[i],
                relay_gpio: pins::RELAY_GPIOS[i],
                confirm_window_secs: 20,
                second_rise_window_secs: 15,
                stuck_high_timeout_secs: 20,
            })
            .unwrap();
    }
    config
}

fn make(channel_count: usize) -> (ChannelSupervisor, MockGpio, RecordingSink) {
    let mut sup = ChannelSupervisor::new(&test_config(channel_count)).unwrap();
    let mut hw = MockGpio::new(channel_count);
    let mut sink = RecordingSink::new();
    sup.seed_initial_states(&mut hw, &mut sink);
    (sup, hw, sink)
}

fn tick_at_secs(
    sup: &mut ChannelSupervisor,
    hw: &mut MockGpio,
    sink: &mut RecordingSink,
    secs: u64,
) {
    sup.tick(secs * 1000, hw, sink);
}

// ── Standard double-pulse scenario ────────────────────────────

#[test]
fn double_pulse_energises_relay_at_second_rise_and_not_before() {
    let (mut sup, mut hw, mut sink) = make(1);
    assert_eq!(hw.relay_level(0), Some(false), "seed drives relay low");

    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 0);
    assert_eq!(sup.state_of(0), Some(StateId::AwaitingDip));
    assert_eq!(hw.relay_level(0), Some(false));

    hw.set_level(0, false);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 5);
    assert_eq!(sup.state_of(0), Some(StateId::AwaitingConfirm));
    assert_eq!(hw.relay_level(0), Some(false), "not before the second rise");

    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 10);
    assert_eq!(sup.state_of(0), Some(StateId::On));
    assert_eq!(hw.relay_level(0), Some(true), "high at t=10s");
}

// ── Stuck-high fallback ───────────────────────────────────────

#[test]
fn stuck_high_input_forces_relay_on_at_confirm_window() {
    let (mut sup, mut hw, mut sink) = make(1);

    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 0);

    // Input never falls. One second short of the window: still off.
    tick_at_secs(&mut sup, &mut hw, &mut sink, 19);
    assert_eq!(hw.relay_level(0), Some(false), "not earlier than 20s");

    tick_at_secs(&mut sup, &mut hw, &mut sink, 20);
    assert_eq!(sup.state_of(0), Some(StateId::On));
    assert_eq!(hw.relay_level(0), Some(true), "fallback fires at 20s exactly");
}

// ── Spurious dip with no confirming rise ──────────────────────

#[test]
fn spurious_dip_resets_and_relay_stays_released() {
    let (mut sup, mut hw, mut sink) = make(1);

    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 0);
    hw.set_level(0, false);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 3);
    assert_eq!(sup.state_of(0), Some(StateId::AwaitingConfirm));

    // Past the second-rise window (15s after the fall at t=3).
    tick_at_secs(&mut sup, &mut hw, &mut sink, 18);
    assert_eq!(sup.state_of(0), Some(StateId::Idle));

    // Stays released indefinitely.
    for t in [30, 60, 600] {
        tick_at_secs(&mut sup, &mut hw, &mut sink, t);
        assert_eq!(hw.relay_level(0), Some(false));
    }

    // Ready for a fresh rising edge.
    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 700);
    assert_eq!(sup.state_of(0), Some(StateId::AwaitingDip));
}

// ── Re-arm on drop from On ────────────────────────────────────

#[test]
fn drop_from_on_requires_full_cycle_again() {
    let (mut sup, mut hw, mut sink) = make(1);

    // Reach On via the double pulse.
    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 0);
    hw.set_level(0, false);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 5);
    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 10);
    assert_eq!(sup.state_of(0), Some(StateId::On));

    // Source goes fully low: immediate reset, relay released.
    hw.set_level(0, false);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 100);
    assert_eq!(sup.state_of(0), Some(StateId::Idle));
    assert_eq!(hw.relay_level(0), Some(false));

    // A single rise is not enough — no memory of the prior confirmation.
    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 110);
    assert_eq!(sup.state_of(0), Some(StateId::AwaitingDip));
    assert_eq!(hw.relay_level(0), Some(false));
}

// ── Redundant hardware writes are suppressed ──────────────────

#[test]
fn quiet_input_writes_relay_exactly_once() {
    let (mut sup, mut hw, mut sink) = make(1);

    for t in 0..50 {
        tick_at_secs(&mut sup, &mut hw, &mut sink, t);
    }
    // Only the seed write; the level never changed after that.
    assert_eq!(hw.write_count(0), 1);
}

// ── Initial state seeding ─────────────────────────────────────

#[test]
fn input_high_at_startup_starts_on_without_a_low_pulse() {
    let config = test_config(1);
    let mut sup = ChannelSupervisor::new(&config).unwrap();
    let mut hw = MockGpio::new(1);
    let mut sink = RecordingSink::new();

    hw.set_level(0, true);
    sup.seed_initial_states(&mut hw, &mut sink);

    assert_eq!(sup.state_of(0), Some(StateId::On));
    assert_eq!(hw.writes, vec![(0, true)], "no transient low drive");

    // The steady level produces no edge on the first tick.
    sup.tick(200, &mut hw, &mut sink);
    assert_eq!(sup.state_of(0), Some(StateId::On));
}

#[test]
fn seed_read_failure_is_fail_safe_idle() {
    let config = test_config(1);
    let mut sup = ChannelSupervisor::new(&config).unwrap();
    let mut hw = MockGpio::new(1);
    let mut sink = RecordingSink::new();

    hw.set_level(0, true);
    hw.failing_reads.push(0);
    sup.seed_initial_states(&mut hw, &mut sink);

    assert_eq!(sup.state_of(0), Some(StateId::Idle));
    assert_eq!(hw.relay_level(0), Some(false));
    assert_eq!(sink.gpio_faults(), 1);
}

#[test]
fn seed_failure_then_recovery_on_high_line_turns_on() {
    let config = test_config(1);
    let mut sup = ChannelSupervisor::new(&config).unwrap();
    let mut hw = MockGpio::new(1);
    let mut sink = RecordingSink::new();

    hw.set_level(0, true);
    hw.failing_reads.push(0);
    sup.seed_initial_states(&mut hw, &mut sink);
    assert_eq!(sup.state_of(0), Some(StateId::Idle));

    // Reads recover; the line has been high the whole time. The first
    // successful read must seed the channel, not baseline it silently.
    hw.failing_reads.clear();
    tick_at_secs(&mut sup, &mut hw, &mut sink, 1);
    assert_eq!(sup.state_of(0), Some(StateId::On));
    assert_eq!(hw.relay_level(0), Some(true));

    // Stays on through edge-less ticks, indefinitely.
    for t in [2, 100, 10_000] {
        tick_at_secs(&mut sup, &mut hw, &mut sink, t);
        assert_eq!(sup.state_of(0), Some(StateId::On));
        assert_eq!(hw.relay_level(0), Some(true));
    }
}

#[test]
fn seed_failure_then_recovery_on_low_line_baselines_quietly() {
    let config = test_config(1);
    let mut sup = ChannelSupervisor::new(&config).unwrap();
    let mut hw = MockGpio::new(1);
    let mut sink = RecordingSink::new();

    hw.failing_reads.push(0);
    sup.seed_initial_states(&mut hw, &mut sink);

    hw.failing_reads.clear();
    tick_at_secs(&mut sup, &mut hw, &mut sink, 1);
    assert_eq!(sup.state_of(0), Some(StateId::Idle));
    assert_eq!(hw.relay_level(0), Some(false));

    // The late baseline behaves like a normal seed: the next rise counts.
    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 2);
    assert_eq!(sup.state_of(0), Some(StateId::AwaitingDip));
}

// ── Multi-channel independence ────────────────────────────────

#[test]
fn channels_do_not_influence_each_other() {
    let (mut sup, mut hw, mut sink) = make(3);

    // Channel 2 sits high from the start of the run; channel 1 stays low.
    hw.set_level(2, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 0);
    assert_eq!(sup.state_of(2), Some(StateId::AwaitingDip));

    // Drive channel 0 through the full double pulse.
    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 1);
    hw.set_level(0, false);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 5);
    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 10);

    assert_eq!(sup.state_of(0), Some(StateId::On));
    assert_eq!(hw.relay_level(0), Some(true));

    // Channel 1 never left Idle, channel 2 is still waiting for its dip.
    assert_eq!(sup.state_of(1), Some(StateId::Idle));
    assert_eq!(hw.relay_level(1), Some(false));
    assert_eq!(sup.state_of(2), Some(StateId::AwaitingDip));
    assert_eq!(hw.relay_level(2), Some(false));
}

// ── Per-channel I/O failure recovery ──────────────────────────

#[test]
fn read_failure_skips_only_that_channel_for_the_tick() {
    let (mut sup, mut hw, mut sink) = make(2);

    hw.failing_reads.push(0);
    hw.set_level(1, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 0);

    // Channel 0 skipped, channel 1 advanced.
    assert_eq!(sup.state_of(0), Some(StateId::Idle));
    assert_eq!(sup.state_of(1), Some(StateId::AwaitingDip));
    assert_eq!(sink.gpio_faults(), 1);

    // Reads recover: channel 0 picks up on the next tick.
    hw.failing_reads.clear();
    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 1);
    assert_eq!(sup.state_of(0), Some(StateId::AwaitingDip));
}

#[test]
fn failed_relay_write_is_retried_next_tick() {
    let (mut sup, mut hw, mut sink) = make(1);

    // Drive to On while the relay write is failing.
    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 0);
    hw.set_level(0, false);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 5);
    hw.failing_writes.push(0);
    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 10);

    assert_eq!(sup.state_of(0), Some(StateId::On));
    assert_eq!(hw.relay_level(0), Some(false), "write failed, relay unchanged");
    assert_eq!(sup.output_of(0), Some(false), "cache reflects hardware, not intent");

    // Write path recovers: the retry happens on an otherwise edge-less tick.
    hw.failing_writes.clear();
    tick_at_secs(&mut sup, &mut hw, &mut sink, 11);
    assert_eq!(hw.relay_level(0), Some(true));
    assert!(sink.events.contains(&AppEvent::OutputChanged {
        channel: 0,
        high: true
    }));
}

// ── Event stream ──────────────────────────────────────────────

#[test]
fn state_changes_are_reported_per_channel() {
    let (mut sup, mut hw, mut sink) = make(1);

    hw.set_level(0, true);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 0);
    hw.set_level(0, false);
    tick_at_secs(&mut sup, &mut hw, &mut sink, 5);

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::StateChanged { .. }))
        .collect();
    assert_eq!(
        changes,
        vec![
            &AppEvent::StateChanged {
                channel: 0,
                from: StateId::Idle,
                to: StateId::AwaitingDip,
            },
            &AppEvent::StateChanged {
                channel: 0,
                from: StateId::AwaitingDip,
                to: StateId::AwaitingConfirm,
            },
        ]
    );
}
