//! GPIO pin assignments for the Pimoroni Automation HAT.
//!
//! Single source of truth — the hardware adapter references this module
//! rather than hard-coding BCM numbers. Change a pin here and it propagates
//! everywhere.
//!
//! The HAT exposes three 24V-tolerant buffered inputs and three relays;
//! both sides are plain BCM GPIO lines from the Pi's point of view.

// ---------------------------------------------------------------------------
// Buffered inputs (24V-tolerant, divided down to 3.3V logic)
// ---------------------------------------------------------------------------

/// Input 1 — the preamp's 12V trigger, via the HAT's voltage divider.
pub const INPUT_1_GPIO: u8 = 26;
/// Input 2.
pub const INPUT_2_GPIO: u8 = 20;
/// Input 3.
pub const INPUT_3_GPIO: u8 = 21;

// ---------------------------------------------------------------------------
// Relays (NO/NC, drive the downstream trigger outputs)
// ---------------------------------------------------------------------------

/// Relay 1 — active HIGH energises the coil.
pub const RELAY_1_GPIO: u8 = 13;
/// Relay 2.
pub const RELAY_2_GPIO: u8 = 19;
/// Relay 3.
pub const RELAY_3_GPIO: u8 = 16;

/// Number of input/relay pairs the HAT provides.
pub const CHANNEL_COUNT: usize = 3;

/// Input pins in channel order.
pub const INPUT_GPIOS: [u8; CHANNEL_COUNT] = [INPUT_1_GPIO, INPUT_2_GPIO, INPUT_3_GPIO];

/// Relay pins in channel order.
pub const RELAY_GPIOS: [u8; CHANNEL_COUNT] = [RELAY_1_GPIO, RELAY_2_GPIO, RELAY_3_GPIO];
