//! Outbound application events.
//!
//! The [`ChannelSupervisor`](super::service::ChannelSupervisor) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on the
//! other side decide what to do with them — the production adapter writes
//! them to the log stream.

use crate::error::GpioError;
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The supervisor has seeded its channels and is about to start polling.
    Started,

    /// A channel's state machine transitioned between states.
    StateChanged {
        channel: usize,
        from: StateId,
        to: StateId,
    },

    /// A channel's relay output was driven to a new level.
    OutputChanged { channel: usize, high: bool },

    /// A pin read/write failed; the channel was skipped for this tick.
    GpioFault(GpioError),

    /// The polling loop received the stop signal and exited. Outputs are
    /// left in their last-driven state.
    Stopped,
}
