//! Analog output service.
//!
//! [`AnalogOutputs`] owns the handle table for every analog output channel of
//! the controller and is the only path to the DAC registers. Construct it once
//! during HAL bring-up and share it by reference (or `Arc`).

use core::panic::Location;
use core::sync::atomic::{AtomicU32, Ordering};

use hal::{DacRegisters, HalError, HalResult, PortHandle, PortResolver};
use handles::{Handle, HandleError, HandleKind, HandleTable, TableStats};
use log::{debug, error, trace, warn};

use crate::config::AnalogOutputConfig;
use crate::convert::{code_to_volts, volts_to_code};
use crate::port::AnalogOutputPort;
use crate::NUM_ANALOG_OUTPUTS;

/// True if `channel` lies in `0..capacity`.
pub const fn channel_in_range(channel: i32, capacity: usize) -> bool {
    channel >= 0 && (channel as usize) < capacity
}

/// Handle-managed analog output ports backed by a DAC register bank.
pub struct AnalogOutputs<R, P, const N: usize = NUM_ANALOG_OUTPUTS> {
    config: AnalogOutputConfig,
    registers: R,
    resolver: P,
    pub(crate) ports: HandleTable<AnalogOutputPort, N>,
    anomalies: AtomicU32,
}

impl<R, P, const N: usize> AnalogOutputs<R, P, N>
where
    R: DacRegisters,
    P: PortResolver,
{
    pub fn new(registers: R, resolver: P) -> Self {
        Self::with_config(AnalogOutputConfig::default(), registers, resolver)
    }

    pub fn with_config(config: AnalogOutputConfig, registers: R, resolver: P) -> Self {
        debug!(
            "{}: {} channels, {} V full scale, code ceiling {}",
            config.name, N, config.full_scale_volts, config.code_ceiling
        );
        Self {
            config,
            registers,
            resolver,
            ports: HandleTable::new(HandleKind::AnalogOutput),
            anomalies: AtomicU32::new(0),
        }
    }

    /// Claims the analog output addressed by `port`.
    ///
    /// Fails with [`HalError::ResourceOutOfRange`] if the port does not name
    /// a channel of this bank, and with
    /// [`HalError::ResourceAlreadyAllocated`] if another handle holds it.
    #[track_caller]
    pub fn initialize_port(&self, port: PortHandle) -> HalResult<Handle> {
        let location = Location::caller();

        let channel = match self.resolver.channel(port) {
            Some(channel) if self.is_valid_channel(channel) => channel,
            resolved => {
                warn!(
                    "{}: port {:#010x} resolves to {:?}, not an analog output channel",
                    self.config.name,
                    port.raw(),
                    resolved
                );
                return Err(HalError::ResourceOutOfRange);
            }
        };

        let handle = self
            .ports
            .allocate(channel as usize)
            .map_err(|err| self.report_allocation_failure(channel, err))?;

        self.bind(handle, channel as u8, location)
    }

    /// Releases `handle`. Invalid and already-freed handles are ignored.
    pub fn free_port(&self, handle: Handle) {
        let released = self.ports.take_with(handle, |port| {
            if let Some(channel) = port.channel() {
                self.registers.on_release(channel);
            }
        });
        let Some(port) = released else {
            trace!("{}: free of dead handle {:?}", self.config.name, handle);
            return;
        };
        if let Some(channel) = port.channel() {
            debug!("{}: channel {} released", self.config.name, channel);
        }
    }

    /// Drives the channel behind `handle` to `volts`.
    ///
    /// Voltages below zero write code 0; voltages above full scale write the
    /// code ceiling.
    pub fn set_voltage(&self, handle: Handle, volts: f64) -> HalResult<()> {
        let channel = self.channel(handle)?;
        let code = volts_to_code(volts, &self.config);
        trace!(
            "{}: channel {} <- {} V (code {})",
            self.config.name,
            channel,
            volts,
            code
        );
        self.registers.write_code(channel, code)
    }

    /// Reads the channel behind `handle` back as a voltage.
    pub fn voltage(&self, handle: Handle) -> HalResult<f64> {
        let channel = self.channel(handle)?;
        let code = self.registers.read_code(channel)?;
        Ok(code_to_volts(code, &self.config))
    }

    /// Writes a raw code, clamped to the code ceiling.
    pub fn set_raw(&self, handle: Handle, code: u16) -> HalResult<()> {
        let channel = self.channel(handle)?;
        self.registers
            .write_code(channel, code.min(self.config.code_ceiling))
    }

    /// Reads the raw code of the channel behind `handle`.
    pub fn raw(&self, handle: Handle) -> HalResult<u16> {
        let channel = self.channel(handle)?;
        self.registers.read_code(channel)
    }

    /// Hardware channel bound to `handle`.
    pub fn channel(&self, handle: Handle) -> HalResult<u8> {
        self.ports
            .get(handle)
            .and_then(|port| port.channel())
            .ok_or_else(|| {
                warn!("{}: invalid handle {:?}", self.config.name, handle);
                HalError::InvalidHandle
            })
    }

    /// Range check against this bank's capacity; independent of allocation.
    pub fn is_valid_channel(&self, channel: i32) -> bool {
        channel_in_range(channel, N)
    }

    /// Frees every port, notifying the registers for each bound channel.
    pub fn shutdown(&self) {
        self.ports.free_all_with(|port| {
            if let Some(channel) = port.channel() {
                self.registers.on_release(channel);
            }
        });
        debug!("{}: all channels released", self.config.name);
    }

    pub fn config(&self) -> &AnalogOutputConfig {
        &self.config
    }

    pub fn registers(&self) -> &R {
        &self.registers
    }

    pub fn stats(&self) -> TableStats {
        self.ports.stats()
    }

    /// Times a freshly allocated handle failed to resolve.
    pub fn resolution_anomalies(&self) -> u32 {
        self.anomalies.load(Ordering::Relaxed)
    }
}

impl<R, P, const N: usize> AnalogOutputs<R, P, N>
where
    R: DacRegisters,
    P: PortResolver,
{
    pub(crate) fn bind(
        &self,
        handle: Handle,
        channel: u8,
        location: &'static Location<'static>,
    ) -> HalResult<Handle> {
        let bound = self
            .ports
            .with_record(handle, |port| {
                let bound = port.bind(channel, location);
                if bound {
                    self.registers.on_bind(channel);
                }
                bound
            })
            .unwrap_or(false);

        if !bound {
            self.anomalies.fetch_add(1, Ordering::Relaxed);
            error!(
                "{}: handle {:?} for channel {} did not resolve to an unbound record",
                self.config.name, handle, channel
            );
            self.free_port(handle);
            return Err(HalError::HandleResolution);
        }

        debug!(
            "{}: channel {} bound to {:?} at {}",
            self.config.name, channel, handle, location
        );
        Ok(handle)
    }

    fn report_allocation_failure(&self, channel: i32, err: HandleError) -> HalError {
        match err {
            HandleError::AlreadyAllocated { index } => {
                match self.ports.record_at(index).and_then(|port| port.allocated_at()) {
                    Some(previous) => warn!(
                        "{}: channel {} already allocated at {}",
                        self.config.name, channel, previous
                    ),
                    None => warn!("{}: channel {} already allocated", self.config.name, channel),
                }
            }
            other => warn!("{}: channel {}: {}", self.config.name, channel, other),
        }
        err.into()
    }
}
