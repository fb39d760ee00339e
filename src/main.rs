//! Trigguard daemon — main entry point.
//!
//! Hexagonal architecture with a tick-driven polling loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  AutomationHat   LogEventSink   config_file   Monotonic  │
//! │  (GpioPort)      (EventSink)    (JSON load)   Clock      │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        ChannelSupervisor (pure logic)          │      │
//! │  │  EdgeDetector · trigger FSM (per channel)      │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::info;

use trigguard::adapters::config_file::{self, DEFAULT_CONFIG_PATH};
use trigguard::adapters::hardware;
use trigguard::adapters::log_sink::LogEventSink;
use trigguard::adapters::time::MonotonicClock;
use trigguard::app::service::ChannelSupervisor;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("trigguard v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Load config (or defaults) ──────────────────────────
    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = config_file::load_or_default(&path)?;

    // ── 3. Stop signal delivery ───────────────────────────────
    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&stop))?;
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&stop))?;

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = hardware::open(&config)?;
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    // ── 5. Construct the supervisor and seed channel states ───
    let mut supervisor = ChannelSupervisor::new(&config)?;
    supervisor.seed_initial_states(&mut hw, &mut sink);

    // ── 6. Polling loop ───────────────────────────────────────
    supervisor.run(
        &stop,
        &mut hw,
        &mut sink,
        || clock.now_ms(),
        |ms| thread::sleep(Duration::from_millis(u64::from(ms))),
    );

    info!("shutdown complete");
    Ok(())
}
