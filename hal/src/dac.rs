//! DAC (Digital-to-Analog Converter) register interface

use crate::error::HalResult;

/// DAC resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DacResolution {
    Bits8,
    Bits10,
    #[default]
    Bits12,
    Bits16,
}

impl DacResolution {
    pub const fn bits(&self) -> u32 {
        match self {
            Self::Bits8 => 8,
            Self::Bits10 => 10,
            Self::Bits12 => 12,
            Self::Bits16 => 16,
        }
    }

    /// Number of distinct codes, `2^bits`.
    pub const fn code_span(&self) -> u32 {
        1 << self.bits()
    }
}

/// Memory-mapped DAC register bank, addressed by channel.
///
/// Implementations are shared between threads and must make each single
/// register transfer atomic per channel. Callers add no locking of their own.
pub trait DacRegisters: Send + Sync {
    /// Write a raw code to the channel's output register
    fn write_code(&self, channel: u8, code: u16) -> HalResult<()>;

    /// Read back the channel's raw code
    fn read_code(&self, channel: u8) -> HalResult<u16>;

    /// Called after a channel has been bound to a handle, before the handle
    /// can be released.
    fn on_bind(&self, _channel: u8) {}

    /// Called as a channel's handle is released, before the channel can be
    /// claimed again.
    ///
    /// Both hooks run with the channel's slot locked and must not call back
    /// into the service that owns the registers.
    fn on_release(&self, _channel: u8) {}
}

impl<T: DacRegisters + ?Sized> DacRegisters for &T {
    fn write_code(&self, channel: u8, code: u16) -> HalResult<()> {
        (**self).write_code(channel, code)
    }

    fn read_code(&self, channel: u8) -> HalResult<u16> {
        (**self).read_code(channel)
    }

    fn on_bind(&self, channel: u8) {
        (**self).on_bind(channel)
    }

    fn on_release(&self, channel: u8) {
        (**self).on_release(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_bit_span() {
        assert_eq!(DacResolution::default(), DacResolution::Bits12);
        assert_eq!(DacResolution::Bits12.code_span(), 4096);
        assert_eq!(DacResolution::Bits8.code_span(), 256);
    }
}
