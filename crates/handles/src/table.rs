//! Fixed-capacity handle table.
//!
//! Every slot sits behind its own reader/writer lock, so lookups on one
//! channel never wait on allocation traffic for another. Records are handed
//! out as `Arc<T>`: a `get` that races a `free` either gets a complete record
//! (which stays alive until the caller drops it) or nothing.

use core::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, trace};
use thiserror::Error;

use hal::HalError;

use crate::handle::{Handle, HandleKind, MAX_INDEX};
use crate::stats::TableStats;
use crate::sync::{Arc, RwLock};

/// Allocation failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    #[error("index {index} out of range for a table of {capacity} slots")]
    OutOfRange { index: usize, capacity: usize },
    #[error("slot {index} is already allocated")]
    AlreadyAllocated { index: usize },
    #[error("all {capacity} slots are allocated")]
    Exhausted { capacity: usize },
}

impl From<HandleError> for HalError {
    fn from(value: HandleError) -> Self {
        match value {
            HandleError::OutOfRange { .. } => HalError::ResourceOutOfRange,
            HandleError::AlreadyAllocated { .. } => HalError::ResourceAlreadyAllocated,
            HandleError::Exhausted { .. } => HalError::NoAvailableResources,
        }
    }
}

struct Slot<T> {
    generation: u8,
    record: Option<Arc<T>>,
}

impl<T> Slot<T> {
    const fn empty() -> Self {
        Self {
            generation: 0,
            record: None,
        }
    }
}

/// Table of `N` slots addressed by handles of a single [`HandleKind`].
///
/// Two allocation styles share the same slots:
/// - [`allocate`](Self::allocate) claims the slot matching a hardware index,
///   so at most one handle exists per index;
/// - [`allocate_any`](Self::allocate_any) claims the first free slot, for
///   resources where any slot will do.
pub struct HandleTable<T, const N: usize> {
    kind: HandleKind,
    slots: [RwLock<Slot<T>>; N],
    allocated: AtomicUsize,
    peak: AtomicUsize,
}

impl<T, const N: usize> HandleTable<T, N> {
    const CAPACITY_FITS: () = assert!(N <= MAX_INDEX + 1, "capacity exceeds handle index width");

    /// Creates an empty table issuing handles tagged with `kind`.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is [`HandleKind::Undefined`], which is reserved for
    /// the invalid sentinel.
    pub fn new(kind: HandleKind) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_FITS;
        assert!(
            kind != HandleKind::Undefined,
            "handle tables need a defined kind"
        );
        Self {
            kind,
            slots: core::array::from_fn(|_| RwLock::new(Slot::empty())),
            allocated: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub const fn kind(&self) -> HandleKind {
        self.kind
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Claims the slot for `index`, storing the record built by `init`.
    pub fn allocate_with<F>(&self, index: usize, init: F) -> Result<Handle, HandleError>
    where
        F: FnOnce() -> T,
    {
        let slot = self
            .slots
            .get(index)
            .ok_or(HandleError::OutOfRange { index, capacity: N })?;

        let mut slot = slot.write();
        if slot.record.is_some() {
            trace!("{:?} slot {} already allocated", self.kind, index);
            return Err(HandleError::AlreadyAllocated { index });
        }
        Ok(self.claim(&mut slot, index, init))
    }

    /// Claims the first free slot, storing the record built by `init`.
    pub fn allocate_any_with<F>(&self, init: F) -> Result<Handle, HandleError>
    where
        F: FnOnce() -> T,
    {
        for (index, slot) in self.slots.iter().enumerate() {
            let mut slot = slot.write();
            if slot.record.is_none() {
                return Ok(self.claim(&mut slot, index, init));
            }
        }
        trace!("{:?} table exhausted", self.kind);
        Err(HandleError::Exhausted { capacity: N })
    }

    /// Resolves a handle to its record.
    ///
    /// Returns `None` for handles of another kind, out-of-range indices,
    /// freed slots and stale generations.
    pub fn get(&self, handle: Handle) -> Option<Arc<T>> {
        if handle.kind() != self.kind {
            return None;
        }
        let slot = self.slots.get(handle.index())?.read();
        if slot.generation != handle.generation() {
            return None;
        }
        slot.record.clone()
    }

    /// Releases the slot named by `handle`.
    ///
    /// Anything that does not name a live slot is ignored, including a
    /// handle that was already freed.
    pub fn free(&self, handle: Handle) {
        let _ = self.take(handle);
    }

    /// Releases the slot named by `handle` and returns the record it held.
    ///
    /// Of several racing calls with the same handle, exactly one gets the
    /// record.
    pub fn take(&self, handle: Handle) -> Option<Arc<T>> {
        self.take_with(handle, |_| {})
    }

    /// Like [`take`](Self::take), but runs `on_release` on the record while
    /// the slot is still locked. No allocation of the same slot can happen
    /// until `on_release` returns.
    pub fn take_with<F>(&self, handle: Handle, on_release: F) -> Option<Arc<T>>
    where
        F: FnOnce(&T),
    {
        if handle.kind() != self.kind {
            trace!("ignoring release of foreign handle {:?}", handle);
            return None;
        }
        let slot = self.slots.get(handle.index())?;

        let released = {
            let mut slot = slot.write();
            if slot.generation != handle.generation() {
                return None;
            }
            let record = slot.record.take();
            if let Some(record) = &record {
                on_release(record);
                self.allocated.fetch_sub(1, Ordering::AcqRel);
            }
            record
        };

        if released.is_some() {
            debug!("{:?} slot {} freed", self.kind, handle.index());
        }
        released
    }

    /// Runs `f` on the record behind `handle` while holding the slot's read
    /// lock, so the slot cannot be released until `f` returns.
    ///
    /// Returns `None` where [`get`](Self::get) would.
    pub fn with_record<F, R>(&self, handle: Handle, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        if handle.kind() != self.kind {
            return None;
        }
        let slot = self.slots.get(handle.index())?.read();
        if slot.generation != handle.generation() {
            return None;
        }
        slot.record.as_deref().map(f)
    }

    /// Releases every slot. Handles issued before the call stay dead.
    pub fn free_all(&self) {
        self.free_all_with(|_| {});
    }

    /// Releases every slot, passing each released record to `on_release`
    /// while its slot is still locked.
    pub fn free_all_with<F>(&self, mut on_release: F)
    where
        F: FnMut(&T),
    {
        let mut released = 0usize;
        for slot in &self.slots {
            let mut slot = slot.write();
            if let Some(record) = slot.record.take() {
                on_release(&record);
                self.allocated.fetch_sub(1, Ordering::AcqRel);
                released += 1;
            }
        }
        debug!("{:?} table reset, {} slots released", self.kind, released);
    }

    /// Current occupant of the slot for `index`, if any.
    pub fn record_at(&self, index: usize) -> Option<Arc<T>> {
        self.slots.get(index)?.read().record.clone()
    }

    pub fn is_allocated(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .is_some_and(|slot| slot.read().record.is_some())
    }

    pub fn stats(&self) -> TableStats {
        TableStats::new(
            N,
            self.allocated.load(Ordering::Acquire),
            self.peak.load(Ordering::Acquire),
        )
    }

    fn claim<F>(&self, slot: &mut Slot<T>, index: usize, init: F) -> Handle
    where
        F: FnOnce() -> T,
    {
        slot.generation = slot.generation.wrapping_add(1);
        slot.record = Some(Arc::new(init()));

        let allocated = self.allocated.fetch_add(1, Ordering::AcqRel) + 1;
        self.peak.fetch_max(allocated, Ordering::AcqRel);

        let handle = Handle::new(self.kind, slot.generation, index);
        debug!("{:?} slot {} allocated as {:?}", self.kind, index, handle);
        handle
    }
}

impl<T: Default, const N: usize> HandleTable<T, N> {
    /// Claims the slot for `index` with a default-constructed record.
    pub fn allocate(&self, index: usize) -> Result<Handle, HandleError> {
        self.allocate_with(index, T::default)
    }

    /// Claims the first free slot with a default-constructed record.
    pub fn allocate_any(&self) -> Result<Handle, HandleError> {
        self.allocate_any_with(T::default)
    }
}
