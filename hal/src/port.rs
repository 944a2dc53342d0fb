//! Generic port handles and their resolution to hardware channels

/// Opaque generic port handle handed out by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortHandle(pub u32);

impl PortHandle {
    pub const fn raw(&self) -> u32 {
        self.0
    }
}

/// Resolves generic port handles to channel indices.
pub trait PortResolver: Send + Sync {
    /// Channel addressed by `port`, or `None` if the handle does not name one.
    ///
    /// The returned channel is not range checked; callers validate it
    /// against their own inventory.
    fn channel(&self, port: PortHandle) -> Option<i32>;
}

impl<T: PortResolver + ?Sized> PortResolver for &T {
    fn channel(&self, port: PortHandle) -> Option<i32> {
        (**self).channel(port)
    }
}
