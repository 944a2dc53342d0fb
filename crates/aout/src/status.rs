//! Status-code surface.
//!
//! Mirrors the service with the integer-status calling convention used by
//! HAL C bindings: every fallible call writes its status (`0` on success)
//! through `status`, and numeric outputs fall back to `0.0` or
//! [`Handle::INVALID`] on error.

use hal::{status_of, DacRegisters, PortHandle, PortResolver};
use handles::Handle;

use crate::outputs::AnalogOutputs;

pub use crate::is_valid_channel;

#[track_caller]
pub fn initialize_port<R, P, const N: usize>(
    outputs: &AnalogOutputs<R, P, N>,
    port: PortHandle,
    status: &mut i32,
) -> Handle
where
    R: DacRegisters,
    P: PortResolver,
{
    let result = outputs.initialize_port(port);
    *status = status_of(&result);
    result.unwrap_or(Handle::INVALID)
}

pub fn free_port<R, P, const N: usize>(outputs: &AnalogOutputs<R, P, N>, handle: Handle)
where
    R: DacRegisters,
    P: PortResolver,
{
    outputs.free_port(handle);
}

pub fn set_voltage<R, P, const N: usize>(
    outputs: &AnalogOutputs<R, P, N>,
    handle: Handle,
    volts: f64,
    status: &mut i32,
) where
    R: DacRegisters,
    P: PortResolver,
{
    *status = status_of(&outputs.set_voltage(handle, volts));
}

pub fn get_voltage<R, P, const N: usize>(
    outputs: &AnalogOutputs<R, P, N>,
    handle: Handle,
    status: &mut i32,
) -> f64
where
    R: DacRegisters,
    P: PortResolver,
{
    let result = outputs.voltage(handle);
    *status = status_of(&result);
    result.unwrap_or(0.0)
}
