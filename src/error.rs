//! Unified error types for the trigguard daemon.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level control loop's error handling uniform. All variants are `Copy`
//! so they can be cheaply passed through the supervisor without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level daemon error
// ---------------------------------------------------------------------------

/// Every fallible operation in the daemon funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be loaded. Fatal at startup.
    Config(ConfigError),
    /// A single GPIO read/write failed. Recovered per tick, never fatal.
    Gpio(GpioError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Rejected before the polling loop starts; the operator sees these once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A timeout window is zero.
    ZeroWindow(&'static str),
    /// Poll interval is zero or too coarse to catch the shortest window.
    BadPollInterval,
    /// No channels configured. The channel list's fixed capacity bounds the
    /// upper end before validation runs.
    BadChannelCount,
    /// Two channels claim the same input or relay pin.
    DuplicatePin(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWindow(which) => write!(f, "{which} must be greater than zero"),
            Self::BadPollInterval => write!(f, "poll interval must be 1-250 ms"),
            Self::BadChannelCount => write!(f, "at least one channel must be configured"),
            Self::DuplicatePin(pin) => write!(f, "pin {pin} assigned more than once"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

/// A per-call pin failure. The supervisor skips the affected channel for the
/// current tick and retries on the next one; other channels are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Reading the input level failed.
    ReadFailed { channel: usize },
    /// Driving the relay output failed.
    WriteFailed { channel: usize },
}

impl GpioError {
    /// The channel the failed call was addressed to.
    pub const fn channel(self) -> usize {
        match self {
            Self::ReadFailed { channel } | Self::WriteFailed { channel } => channel,
        }
    }
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed { channel } => write!(f, "input read failed on channel {channel}"),
            Self::WriteFailed { channel } => write!(f, "relay write failed on channel {channel}"),
        }
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Daemon-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
