//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! process log stream. A future status-socket adapter would implement the
//! same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | supervisor running");
            }
            AppEvent::StateChanged { channel, from, to } => {
                info!("STATE | ch{} | {:?} -> {:?}", channel, from, to);
            }
            AppEvent::OutputChanged { channel, high } => {
                info!(
                    "RELAY | ch{} | {}",
                    channel,
                    if *high { "energised" } else { "released" }
                );
            }
            AppEvent::GpioFault(e) => {
                warn!("GPIO  | {} — channel skipped this tick", e);
            }
            AppEvent::Stopped => {
                info!("STOP  | loop exited, outputs left as driven");
            }
        }
    }
}
