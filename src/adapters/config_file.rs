//! JSON configuration loading.
//!
//! The daemon reads its configuration once at startup. A missing file is
//! not an error — the defaults reproduce the original single-channel
//! wiring — but a file that exists and fails to parse or validate is fatal
//! before the polling loop starts, so the operator sees it immediately.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::config::SystemConfig;
use crate::error::{Error, Result};

/// Default location when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/trigguard/config.json";

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist. Validation runs in both cases.
pub fn load_or_default(path: &Path) -> Result<SystemConfig> {
    let config = if path.exists() {
        let raw = fs::read_to_string(path).map_err(|e| {
            warn!("config read failed: {e}");
            Error::Init("config file unreadable")
        })?;
        let config = parse(&raw)?;
        info!("config loaded from {}", path.display());
        config
    } else {
        info!("no config at {}, using defaults", path.display());
        SystemConfig::default()
    };

    config.validate()?;
    Ok(config)
}

/// Parse a JSON document into a [`SystemConfig`]. Does not validate.
fn parse(raw: &str) -> Result<SystemConfig> {
    serde_json::from_str(raw).map_err(|e| {
        warn!("config parse failed: {e}");
        Error::Init("config file malformed")
    })
}
