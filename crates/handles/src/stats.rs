/// Occupancy snapshot of a handle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableStats {
    /// Total number of slots
    pub capacity: usize,
    /// Slots currently holding a record
    pub allocated: usize,
    /// Slots available for allocation
    pub free: usize,
    /// Highest `allocated` value observed since construction
    pub peak_allocated: usize,
}

impl TableStats {
    pub const fn new(capacity: usize, allocated: usize, peak_allocated: usize) -> Self {
        Self {
            capacity,
            allocated,
            free: capacity.saturating_sub(allocated),
            peak_allocated,
        }
    }

    pub const fn is_full(&self) -> bool {
        self.free == 0
    }

    pub const fn is_empty(&self) -> bool {
        self.allocated == 0
    }

    /// Get utilization as a percentage (0-100)
    pub fn utilization(&self) -> u8 {
        if self.capacity == 0 {
            0
        } else {
            ((self.allocated * 100) / self.capacity) as u8
        }
    }
}
