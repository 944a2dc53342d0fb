//! Simulated DAC bank and port resolver for host builds and tests.

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};

use hal::{DacRegisters, HalError, HalResult, PortHandle, PortResolver};
use handles::{Handle, HandleKind};
use log::trace;

use crate::NUM_ANALOG_OUTPUTS;

/// In-memory register bank. Each register transfer is a single atomic access.
pub struct SimulatedDac<const N: usize = NUM_ANALOG_OUTPUTS> {
    codes: [AtomicU16; N],
    bound: [AtomicBool; N],
    writes: AtomicUsize,
}

impl<const N: usize> SimulatedDac<N> {
    pub fn new() -> Self {
        Self {
            codes: core::array::from_fn(|_| AtomicU16::new(0)),
            bound: core::array::from_fn(|_| AtomicBool::new(false)),
            writes: AtomicUsize::new(0),
        }
    }

    /// Current register contents, bypassing any handle.
    pub fn code(&self, channel: u8) -> Option<u16> {
        self.codes
            .get(channel as usize)
            .map(|code| code.load(Ordering::Acquire))
    }

    /// True while a handle is bound to `channel`.
    pub fn is_bound(&self, channel: u8) -> bool {
        self.bound
            .get(channel as usize)
            .is_some_and(|bound| bound.load(Ordering::Acquire))
    }

    /// Total number of successful register writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    fn register(&self, channel: u8) -> HalResult<&AtomicU16> {
        self.codes
            .get(channel as usize)
            .ok_or(HalError::ResourceOutOfRange)
    }
}

impl<const N: usize> Default for SimulatedDac<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DacRegisters for SimulatedDac<N> {
    fn write_code(&self, channel: u8, code: u16) -> HalResult<()> {
        self.register(channel)?.store(code, Ordering::Release);
        self.writes.fetch_add(1, Ordering::Relaxed);
        trace!("sim dac: channel {} = {}", channel, code);
        Ok(())
    }

    fn read_code(&self, channel: u8) -> HalResult<u16> {
        Ok(self.register(channel)?.load(Ordering::Acquire))
    }

    fn on_bind(&self, channel: u8) {
        if let Some(bound) = self.bound.get(channel as usize) {
            bound.store(true, Ordering::Release);
        }
    }

    fn on_release(&self, channel: u8) {
        if let Some(bound) = self.bound.get(channel as usize) {
            bound.store(false, Ordering::Release);
        }
    }
}

/// Resolves port handles built by [`SimPortResolver::port`].
///
/// A port handle uses the regular handle layout with kind [`HandleKind::Port`]
/// and the channel in the index field. Anything else does not resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimPortResolver;

impl SimPortResolver {
    /// Port handle addressing `channel`. The channel is not range checked.
    pub const fn port(channel: u8) -> PortHandle {
        PortHandle(Handle::new(HandleKind::Port, 0, channel as usize).raw())
    }
}

impl PortResolver for SimPortResolver {
    fn channel(&self, port: PortHandle) -> Option<i32> {
        let handle = Handle::from_raw(port.raw());
        (handle.kind() == HandleKind::Port).then(|| handle.index() as i32)
    }
}
