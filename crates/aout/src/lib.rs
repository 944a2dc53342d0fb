//! # aout
//!
//! Analog output ports for the robot controller's 12-bit DAC bank. Callers
//! claim a channel through a generic port handle, get back an opaque
//! [`Handle`], and drive the channel in volts; the crate converts to raw DAC
//! codes and talks to the register bank through [`hal::DacRegisters`].
//!
//! ## Module Overview
//! - [`outputs`] – The [`AnalogOutputs`] service.
//! - [`convert`] – Voltage/raw-code conversion.
//! - [`config`]  – Conversion parameters and their builder.
//! - [`port`]    – Per-channel record kept in the handle table.
//! - [`status`]  – Integer-status wrappers around the service.
//! - [`sim`]     – In-memory DAC bank and port resolver.

pub mod config;
pub mod convert;
pub mod outputs;
pub mod port;
pub mod sim;
pub mod status;

pub use config::{AnalogOutputConfig, AnalogOutputConfigBuilder, ConfigError};
pub use handles::{Handle, TableStats};
pub use outputs::AnalogOutputs;
pub use port::AnalogOutputPort;
pub use sim::{SimPortResolver, SimulatedDac};

/// Number of analog output channels on the controller.
pub const NUM_ANALOG_OUTPUTS: usize = 2;

/// True if `channel` names one of the controller's analog outputs.
///
/// Pure range check; valid before any port is initialized.
pub const fn is_valid_channel(channel: i32) -> bool {
    outputs::channel_in_range(channel, NUM_ANALOG_OUTPUTS)
}

#[cfg(test)]
mod tests;
