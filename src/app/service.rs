//! Channel supervisor — the hexagonal core.
//!
//! [`ChannelSupervisor`] owns up to three trigger channels, each with its
//! own edge detector and state machine, and runs the shared polling loop.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  GpioPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!               │      ChannelSupervisor        │
//!  GpioPort ◀── │  EdgeDetector · FSM (×3)      │
//!               └──────────────────────────────┘
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use heapless::Vec;
use log::{info, warn};

use crate::config::SystemConfig;
use crate::edge::EdgeDetector;
use crate::fsm::context::ChannelContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::pins;

use super::events::AppEvent;
use super::ports::{EventSink, GpioPort};

// ───────────────────────────────────────────────────────────────
// Channel
// ───────────────────────────────────────────────────────────────

/// One physical trigger: detector + state machine + write cache.
/// Created once at startup, lives for the process lifetime.
struct Channel {
    id: usize,
    detector: EdgeDetector,
    fsm: Fsm,
    ctx: ChannelContext,
    /// Level last successfully written to the relay. `None` until the first
    /// write succeeds; a failed write leaves this unchanged so the write is
    /// retried on the next tick.
    last_written: Option<bool>,
}

impl Channel {
    fn new(id: usize, ctx: ChannelContext) -> Self {
        let mut fsm = Fsm::new(build_state_table(), StateId::Idle);
        let mut ctx = ctx;
        fsm.start(&mut ctx);
        Self {
            id,
            detector: EdgeDetector::new(),
            fsm,
            ctx,
            last_written: None,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// ChannelSupervisor
// ───────────────────────────────────────────────────────────────

/// Owns the fixed channel set and drives it from a shared polling loop.
pub struct ChannelSupervisor {
    channels: Vec<Channel, { pins::CHANNEL_COUNT }>,
    poll_interval_ms: u32,
    tick_count: u64,
}

impl ChannelSupervisor {
    /// Construct the supervisor from validated configuration.
    ///
    /// Does **not** touch hardware — call [`seed_initial_states`] next.
    ///
    /// [`seed_initial_states`]: Self::seed_initial_states
    pub fn new(config: &SystemConfig) -> crate::error::Result<Self> {
        config.validate()?;

        let mut channels = Vec::new();
        for (id, ch_cfg) in config.channels.iter().enumerate() {
            let _ = channels.push(Channel::new(id, ChannelContext::new(*ch_cfg)));
        }

        Ok(Self {
            channels,
            poll_interval_ms: config.poll_interval_ms,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Read each input once and pick the channel's starting state: a line
    /// that is already high means the source device is up and settled, so
    /// the channel jumps straight to `On`; a low line starts in `Idle`.
    ///
    /// A read failure leaves the channel in `Idle` (output low, fail-safe)
    /// and is reported through the sink; the first successful read in the
    /// polling loop then takes over the seeding. The matching output level
    /// is written immediately so downstream equipment sees a defined state
    /// before the first tick.
    pub fn seed_initial_states(&mut self, hw: &mut impl GpioPort, sink: &mut impl EventSink) {
        for ch in &mut self.channels {
            match hw.read_input(ch.id) {
                Ok(level) => {
                    // Baseline for the edge detector; no edge is reported.
                    let _ = ch.detector.sample(level);
                    if level {
                        ch.fsm.force_transition(StateId::On, &mut ch.ctx);
                        info!("channel {}: input already high, starting on", ch.id);
                    }
                }
                Err(e) => {
                    warn!("channel {}: seed read failed, starting idle", ch.id);
                    sink.emit(&AppEvent::GpioFault(e));
                }
            }
            Self::apply_output(ch, hw, sink);
        }
        sink.emit(&AppEvent::Started);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one polling cycle at monotonic time `now_ms`: for every channel,
    /// sample the input, classify the edge, advance the state machine, and
    /// drive the relay if the output decision changed.
    ///
    /// A pin failure skips only the affected channel for this tick; every
    /// tick makes progress regardless of the previous tick's I/O failures.
    pub fn tick(&mut self, now_ms: u64, hw: &mut impl GpioPort, sink: &mut impl EventSink) {
        self.tick_count += 1;

        for ch in &mut self.channels {
            let level = match hw.read_input(ch.id) {
                Ok(level) => level,
                Err(e) => {
                    sink.emit(&AppEvent::GpioFault(e));
                    continue;
                }
            };

            // A failed seed read left this channel without a baseline; the
            // first successful read takes over the seeding role, so a line
            // that has been high the whole time still reaches On instead of
            // silently becoming the baseline and never rising.
            if ch.detector.level().is_none() {
                let _ = ch.detector.sample(level);
                ch.ctx.now_ms = now_ms;
                if level {
                    let prev = ch.fsm.current_state();
                    ch.fsm.force_transition(StateId::On, &mut ch.ctx);
                    info!("channel {}: late seed, input high, starting on", ch.id);
                    sink.emit(&AppEvent::StateChanged {
                        channel: ch.id,
                        from: prev,
                        to: StateId::On,
                    });
                }
                Self::apply_output(ch, hw, sink);
                continue;
            }

            ch.ctx.edge = ch.detector.sample(level);
            ch.ctx.now_ms = now_ms;

            let prev = ch.fsm.current_state();
            ch.fsm.tick(&mut ch.ctx);
            let next = ch.fsm.current_state();

            if next != prev {
                sink.emit(&AppEvent::StateChanged {
                    channel: ch.id,
                    from: prev,
                    to: next,
                });
            }

            Self::apply_output(ch, hw, sink);
        }
    }

    /// Run the polling loop until `stop` is set.
    ///
    /// `sleep` blocks for one poll interval (milliseconds); `now_ms` reports
    /// monotonic time. Both are injected so tests can run without real time.
    /// The stop flag is checked at tick boundaries only — an in-flight tick
    /// is never interrupted mid-channel. On exit, outputs are deliberately
    /// left in their last-driven state: the daemon tracks the real device,
    /// it does not reset hardware.
    pub fn run(
        &mut self,
        stop: &AtomicBool,
        hw: &mut impl GpioPort,
        sink: &mut impl EventSink,
        mut now_ms: impl FnMut() -> u64,
        mut sleep: impl FnMut(u32),
    ) {
        info!(
            "supervising {} channel(s) every {}ms",
            self.channels.len(),
            self.poll_interval_ms
        );
        while !stop.load(Ordering::Relaxed) {
            sleep(self.poll_interval_ms);
            self.tick(now_ms(), hw, sink);
        }
        sink.emit(&AppEvent::Stopped);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current state of a channel, or `None` for an unknown index.
    pub fn state_of(&self, channel: usize) -> Option<StateId> {
        self.channels.get(channel).map(|ch| ch.fsm.current_state())
    }

    /// Output level last successfully written for a channel.
    pub fn output_of(&self, channel: usize) -> Option<bool> {
        self.channels.get(channel).and_then(|ch| ch.last_written)
    }

    /// Number of supervised channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Total polling ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Drive the relay to the state machine's decision, but only when it
    /// differs from the last successfully written level.
    fn apply_output(ch: &mut Channel, hw: &mut impl GpioPort, sink: &mut impl EventSink) {
        let desired = ch.fsm.output_high();
        if ch.last_written == Some(desired) {
            return;
        }
        match hw.write_output(ch.id, desired) {
            Ok(()) => {
                ch.last_written = Some(desired);
                sink.emit(&AppEvent::OutputChanged {
                    channel: ch.id,
                    high: desired,
                });
            }
            Err(e) => sink.emit(&AppEvent::GpioFault(e)),
        }
    }
}
