//! Hardware Abstraction Layer (HAL) contracts for analog output peripherals
//!
//! This crate defines the vendor-agnostic pieces the analog output service is
//! built against: the status/error taxonomy, the DAC register interface and
//! the generic port resolver. Implementations live with the platform code.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod dac;
pub mod port;

// Re-export commonly used types
pub use dac::{DacRegisters, DacResolution};
pub use error::{status_of, HalError, HalResult, STATUS_OK};
pub use port::{PortHandle, PortResolver};
