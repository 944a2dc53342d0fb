//! Platform abstraction for the per-slot locks.
//!
//! Provides unified `RwLock` and `Arc` types. With the default `std` feature
//! the lock wraps `parking_lot::RwLock`; with `lock-free` it uses
//! `spin::RwLock`, which never parks the calling thread. The crate itself
//! always links `std` (its error type derives `std::error::Error`).

pub use std::sync::Arc;

#[cfg(not(any(feature = "std", feature = "lock-free")))]
compile_error!("handles needs either the `std` or the `lock-free` feature");

#[cfg(all(feature = "std", not(feature = "lock-free")))]
pub type RwLockReadGuard<'a, T> = parking_lot::RwLockReadGuard<'a, T>;
#[cfg(feature = "lock-free")]
pub type RwLockReadGuard<'a, T> = spin::RwLockReadGuard<'a, T>;

#[cfg(all(feature = "std", not(feature = "lock-free")))]
pub type RwLockWriteGuard<'a, T> = parking_lot::RwLockWriteGuard<'a, T>;
#[cfg(feature = "lock-free")]
pub type RwLockWriteGuard<'a, T> = spin::RwLockWriteGuard<'a, T>;

/// Platform-agnostic reader/writer lock.
///
/// Neither backend poisons, so a panic while a slot is held never wedges
/// the table.
pub struct RwLock<T> {
    #[cfg(all(feature = "std", not(feature = "lock-free")))]
    inner: parking_lot::RwLock<T>,
    #[cfg(feature = "lock-free")]
    inner: spin::RwLock<T>,
}

impl<T> RwLock<T> {
    /// Creates a new lock protecting the given value.
    pub fn new(value: T) -> Self {
        Self {
            #[cfg(all(feature = "std", not(feature = "lock-free")))]
            inner: parking_lot::RwLock::new(value),
            #[cfg(feature = "lock-free")]
            inner: spin::RwLock::new(value),
        }
    }

    /// Acquires shared access, blocking while a writer holds the lock.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read()
    }

    /// Acquires exclusive access, blocking until all readers are gone.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.write()
    }
}
