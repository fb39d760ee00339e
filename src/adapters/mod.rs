//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements | Connects to                        |
//! |---------------|------------|------------------------------------|
//! | `hardware`    | GpioPort   | Automation HAT inputs and relays   |
//! | `log_sink`    | EventSink  | The process log stream             |
//! | `config_file` | —          | JSON configuration on disk         |
//! | `time`        | —          | The monotonic clock                |

pub mod config_file;
pub mod hardware;
pub mod log_sink;
pub mod time;
