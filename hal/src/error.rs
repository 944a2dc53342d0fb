//! Common error types and status codes for HAL operations

use core::fmt;

/// Status value reported by operations that succeeded.
pub const STATUS_OK: i32 = 0;

const STATUS_HARDWARE: i32 = -1000;
const STATUS_NO_AVAILABLE_RESOURCES: i32 = -1004;
const STATUS_ALREADY_ALLOCATED: i32 = -1029;
const STATUS_OUT_OF_RANGE: i32 = -1030;
const STATUS_HANDLE_ERROR: i32 = -1098;
const STATUS_HANDLE_RESOLUTION: i32 = -1099;

/// HAL operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Requested channel or index lies outside the hardware inventory
    ResourceOutOfRange,
    /// The requested index is already claimed by a live handle
    ResourceAlreadyAllocated,
    /// Every slot of a pooled resource is in use
    NoAvailableResources,
    /// Handle does not resolve to a live record
    InvalidHandle,
    /// Allocation succeeded but the fresh record could not be resolved
    HandleResolution,
    /// Register transfer failed
    HardwareError,
    /// Vendor-specific error code
    VendorError(i32),
}

impl HalError {
    /// Integer status code for this error. Never [`STATUS_OK`].
    pub const fn status(&self) -> i32 {
        match self {
            Self::ResourceOutOfRange => STATUS_OUT_OF_RANGE,
            Self::ResourceAlreadyAllocated => STATUS_ALREADY_ALLOCATED,
            Self::NoAvailableResources => STATUS_NO_AVAILABLE_RESOURCES,
            Self::InvalidHandle => STATUS_HANDLE_ERROR,
            Self::HandleResolution => STATUS_HANDLE_RESOLUTION,
            Self::HardwareError => STATUS_HARDWARE,
            Self::VendorError(code) if *code != STATUS_OK => *code,
            Self::VendorError(_) => STATUS_HARDWARE,
        }
    }

    /// Maps a non-zero status code back to an error.
    ///
    /// Returns `None` for [`STATUS_OK`]. Codes outside the fixed table come
    /// back as [`HalError::VendorError`].
    pub const fn from_status(status: i32) -> Option<Self> {
        match status {
            STATUS_OK => None,
            STATUS_OUT_OF_RANGE => Some(Self::ResourceOutOfRange),
            STATUS_ALREADY_ALLOCATED => Some(Self::ResourceAlreadyAllocated),
            STATUS_NO_AVAILABLE_RESOURCES => Some(Self::NoAvailableResources),
            STATUS_HANDLE_ERROR => Some(Self::InvalidHandle),
            STATUS_HANDLE_RESOLUTION => Some(Self::HandleResolution),
            STATUS_HARDWARE => Some(Self::HardwareError),
            code => Some(Self::VendorError(code)),
        }
    }

    /// True for the two allocation-exhaustion flavours.
    pub const fn is_allocation_failure(&self) -> bool {
        matches!(
            self,
            Self::ResourceAlreadyAllocated | Self::NoAvailableResources
        )
    }
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceOutOfRange => write!(f, "resource index out of range"),
            Self::ResourceAlreadyAllocated => write!(f, "resource already allocated"),
            Self::NoAvailableResources => write!(f, "no available resources"),
            Self::InvalidHandle => write!(f, "invalid handle"),
            Self::HandleResolution => write!(f, "allocated handle could not be resolved"),
            Self::HardwareError => write!(f, "hardware error"),
            Self::VendorError(code) => write!(f, "vendor error code: {}", code),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;

/// Output-status rendering of a result: `0` on success, the error's code
/// otherwise.
pub fn status_of<T>(result: &HalResult<T>) -> i32 {
    match result {
        Ok(_) => STATUS_OK,
        Err(err) => err.status(),
    }
}
