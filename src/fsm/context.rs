//! Shared mutable context threaded through every state handler.
//!
//! `ChannelContext` is the single struct that state handlers read from and
//! write to: the edge sampled this tick, the monotonic time, the channel's
//! timeout configuration, and the one deadline the current state may have
//! armed. Think of it as the "blackboard" in a blackboard architecture.

use crate::config::ChannelConfig;
use crate::edge::Edge;

/// The shared context passed to every state handler function.
#[derive(Debug, Clone, Copy)]
pub struct ChannelContext {
    /// Edge detected this tick. Set by the supervisor before each FSM tick.
    pub edge: Edge,
    /// Monotonic time of this tick (milliseconds).
    pub now_ms: u64,
    /// Timeout windows for this channel.
    pub config: ChannelConfig,
    /// The armed deadline, if any (absolute monotonic milliseconds).
    ///
    /// Invariant: at most one deadline is armed per channel at any time;
    /// state `on_exit` handlers disarm it.
    pub deadline_ms: Option<u64>,
}

impl ChannelContext {
    /// Create a new context with the given channel configuration.
    pub fn new(config: ChannelConfig) -> Self {
        Self {
            edge: Edge::None,
            now_ms: 0,
            config,
            deadline_ms: None,
        }
    }

    /// Arm the deadline `window_secs` from now.
    pub fn arm_secs(&mut self, window_secs: u32) {
        self.deadline_ms = Some(self.now_ms + u64::from(window_secs) * 1000);
    }

    /// Disarm the deadline. Called from state `on_exit` handlers.
    pub fn disarm(&mut self) {
        self.deadline_ms = None;
    }

    /// Whether the armed deadline has been reached. `false` when disarmed.
    pub fn deadline_elapsed(&self) -> bool {
        self.deadline_ms.is_some_and(|d| self.now_ms >= d)
    }
}
