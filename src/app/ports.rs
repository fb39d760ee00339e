//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ChannelSupervisor (domain)
//! ```
//!
//! Driven adapters (the Automation HAT, event sinks) implement these traits.
//! The [`ChannelSupervisor`](super::service::ChannelSupervisor) consumes
//! them via generics, so the domain core never touches hardware directly.

use crate::error::GpioError;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Digital I/O keyed by channel index.
///
/// Calls must return promptly — well within one poll interval. Failures are
/// reported per call, never raised globally; the supervisor recovers by
/// skipping the affected channel for the current tick.
pub trait GpioPort {
    /// Sample the channel's input level. `true` = trigger voltage present.
    fn read_input(&mut self, channel: usize) -> Result<bool, GpioError>;

    /// Drive the channel's relay output. `true` = energised.
    fn write_output(&mut self, channel: usize, high: bool) -> Result<(), GpioError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (the log stream, a
/// status socket, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
