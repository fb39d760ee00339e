//! Hardware adapter — bridges the Automation HAT to the [`GpioPort`] trait.
//!
//! Generic over `embedded-hal` digital pin traits, so the same adapter
//! drives real `rppal` pins on the Pi (behind the `hardware` feature) and
//! plain fake pins in host-side tests. This is the only module in the
//! system that touches actual hardware.

use embedded_hal::digital::{InputPin, OutputPin};
use heapless::Vec;

use crate::app::ports::GpioPort;
use crate::error::GpioError;
use crate::pins;

/// Concrete adapter pairing one input pin with one relay pin per channel.
pub struct AutomationHat<I, O> {
    inputs: Vec<I, { pins::CHANNEL_COUNT }>,
    relays: Vec<O, { pins::CHANNEL_COUNT }>,
}

impl<I: InputPin, O: OutputPin> AutomationHat<I, O> {
    /// Build the adapter from matched input/relay pin lists.
    pub fn new(
        inputs: Vec<I, { pins::CHANNEL_COUNT }>,
        relays: Vec<O, { pins::CHANNEL_COUNT }>,
    ) -> crate::error::Result<Self> {
        if inputs.len() != relays.len() {
            return Err(crate::error::Error::Init("input/relay pin count mismatch"));
        }
        Ok(Self { inputs, relays })
    }
}

impl<I: InputPin, O: OutputPin> GpioPort for AutomationHat<I, O> {
    fn read_input(&mut self, channel: usize) -> Result<bool, GpioError> {
        self.inputs
            .get_mut(channel)
            .ok_or(GpioError::ReadFailed { channel })?
            .is_high()
            .map_err(|_| GpioError::ReadFailed { channel })
    }

    fn write_output(&mut self, channel: usize, high: bool) -> Result<(), GpioError> {
        let pin = self
            .relays
            .get_mut(channel)
            .ok_or(GpioError::WriteFailed { channel })?;
        let result = if high { pin.set_high() } else { pin.set_low() };
        result.map_err(|_| GpioError::WriteFailed { channel })
    }
}

// ── Raspberry Pi construction (hardware feature) ──────────────

/// Open the configured BCM pins through `rppal`. Relays start released
/// (low) only in the sense that the pin is read back as-is; the supervisor
/// writes the correct level during state seeding.
#[cfg(feature = "hardware")]
pub fn open(
    config: &crate::config::SystemConfig,
) -> crate::error::Result<AutomationHat<rppal::gpio::InputPin, rppal::gpio::OutputPin>> {
    use crate::error::Error;

    let gpio = rppal::gpio::Gpio::new().map_err(|e| {
        log::error!("gpio controller open failed: {e}");
        Error::Init("gpio controller unavailable")
    })?;

    let mut inputs = Vec::new();
    let mut relays = Vec::new();
    for ch in &config.channels {
        let input = gpio.get(ch.input_gpio).map_err(|e| {
            log::error!("input pin {} claim failed: {e}", ch.input_gpio);
            Error::Init("input pin unavailable")
        })?;
        let relay = gpio.get(ch.relay_gpio).map_err(|e| {
            log::error!("relay pin {} claim failed: {e}", ch.relay_gpio);
            Error::Init("relay pin unavailable")
        })?;
        let _ = inputs.push(input.into_input());
        let _ = relays.push(relay.into_output_low());
    }

    AutomationHat::new(inputs, relays)
}
