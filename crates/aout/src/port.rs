//! Per-channel record stored in the handle table.

use core::panic::Location;

use once_cell::sync::OnceCell;

/// State owned by one allocated analog output handle.
///
/// The record is created empty when its slot is claimed and bound to a
/// channel right after; both fields are write-once.
#[derive(Debug, Default)]
pub struct AnalogOutputPort {
    channel: OnceCell<u8>,
    allocated_at: OnceCell<&'static Location<'static>>,
}

impl AnalogOutputPort {
    /// Hardware channel, once bound.
    pub fn channel(&self) -> Option<u8> {
        self.channel.get().copied()
    }

    /// Source location of the `initialize_port` call that claimed the port.
    pub fn allocated_at(&self) -> Option<&'static Location<'static>> {
        self.allocated_at.get().copied()
    }

    /// Binds the record to `channel`. Returns `false` if it was already bound.
    pub(crate) fn bind(&self, channel: u8, location: &'static Location<'static>) -> bool {
        let bound = self.channel.set(channel).is_ok();
        if bound {
            let _ = self.allocated_at.set(location);
        }
        bound
    }
}
