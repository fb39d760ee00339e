//! System configuration parameters.
//!
//! All tunable parameters for the trigguard daemon. Loaded once at startup
//! from a JSON file (see `adapters::config_file`); there is no runtime
//! reconfiguration.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins;

/// Per-channel configuration: which pins, and the three timeout windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// BCM pin of the buffered input this channel watches.
    pub input_gpio: u8,
    /// BCM pin of the relay this channel drives.
    pub relay_gpio: u8,

    /// Max time (seconds) between the first rising edge and the expected
    /// intermediate falling edge before giving up on the double-pulse
    /// pattern and turning on anyway.
    pub confirm_window_secs: u32,
    /// Max time (seconds) after the intermediate fall to wait for the
    /// confirming second rise before resetting to idle.
    pub second_rise_window_secs: u32,
    /// Max total time (seconds) the input may stay continuously high before
    /// the output is forced on regardless of pulse pattern.
    pub stuck_high_timeout_secs: u32,
}

impl ChannelConfig {
    /// The deadline actually armed while waiting for the dip.
    ///
    /// Continuous-high time only accumulates while waiting for the dip, so a
    /// single deadline at the earlier of the two windows covers both the
    /// confirm-window fallback and the stuck-high fallback.
    pub fn fallback_window_secs(&self) -> u32 {
        self.confirm_window_secs.min(self.stuck_high_timeout_secs)
    }
}

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Input sampling interval (milliseconds). Must be short enough to not
    /// miss a pulse shorter than the shortest window — capped at 250ms since
    /// the windows are measured in seconds.
    pub poll_interval_ms: u32,
    /// The channels to supervise (1-3).
    pub channels: Vec<ChannelConfig, { pins::CHANNEL_COUNT }>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        // Matches the original single-input wiring: the preamp trigger on
        // input 1 drives relay 1; 60s power-on hold, 30s armed hold, 200ms
        // read interval.
        let mut channels = Vec::new();
        let _ = channels.push(ChannelConfig {
            input_gpio: pins::INPUT_1_GPIO,
            relay_gpio: pins::RELAY_1_GPIO,
            confirm_window_secs: 60,
            second_rise_window_secs: 30,
            stuck_high_timeout_secs: 60,
        });
        Self {
            poll_interval_ms: 200,
            channels,
        }
    }
}

impl SystemConfig {
    /// Reject malformed configuration before the polling loop starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 || self.poll_interval_ms > 250 {
            return Err(ConfigError::BadPollInterval);
        }
        if self.channels.is_empty() {
            return Err(ConfigError::BadChannelCount);
        }

        let mut claimed: Vec<u8, { 2 * pins::CHANNEL_COUNT }> = Vec::new();
        for ch in &self.channels {
            if ch.confirm_window_secs == 0 {
                return Err(ConfigError::ZeroWindow("confirm_window_secs"));
            }
            if ch.second_rise_window_secs == 0 {
                return Err(ConfigError::ZeroWindow("second_rise_window_secs"));
            }
            if ch.stuck_high_timeout_secs == 0 {
                return Err(ConfigError::ZeroWindow("stuck_high_timeout_secs"));
            }
            for pin in [ch.input_gpio, ch.relay_gpio] {
                if claimed.contains(&pin) {
                    return Err(ConfigError::DuplicatePin(pin));
                }
                let _ = claimed.push(pin);
            }
        }
        Ok(())
    }
}
