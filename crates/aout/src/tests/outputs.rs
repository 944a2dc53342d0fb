use core::panic::Location;

use hal::HalError;

use crate::outputs::AnalogOutputs;
use crate::sim::{SimPortResolver, SimulatedDac};

type Outputs = AnalogOutputs<SimulatedDac, SimPortResolver>;

fn outputs() -> Outputs {
    AnalogOutputs::new(SimulatedDac::new(), SimPortResolver)
}

#[test]
fn bind_of_vanished_handle_is_a_resolution_error() {
    let outputs = outputs();
    let handle = outputs.initialize_port(SimPortResolver::port(0)).unwrap();
    outputs.free_port(handle);

    let result = outputs.bind(handle, 0, Location::caller());
    assert_eq!(result, Err(HalError::HandleResolution));
    assert_eq!(outputs.resolution_anomalies(), 1);
    assert!(!outputs.registers().is_bound(0));
    assert!(outputs.stats().is_empty());
}

#[test]
fn channel_is_bound_only_once() {
    let outputs = outputs();
    let handle = outputs.initialize_port(SimPortResolver::port(1)).unwrap();

    let result = outputs.bind(handle, 0, Location::caller());
    assert_eq!(result, Err(HalError::HandleResolution));
    assert_eq!(outputs.resolution_anomalies(), 1);

    // The failed bind hands the slot back instead of leaving it orphaned.
    assert_eq!(outputs.channel(handle), Err(HalError::InvalidHandle));
    assert!(outputs.stats().is_empty());
    assert!(!outputs.registers().is_bound(1));
    assert!(outputs.initialize_port(SimPortResolver::port(1)).is_ok());
}

#[test]
fn allocation_site_is_recorded() {
    let outputs = outputs();
    let line = line!() + 1;
    let handle = outputs.initialize_port(SimPortResolver::port(0)).unwrap();

    let port = outputs.ports.get(handle).unwrap();
    let site = port.allocated_at().unwrap();
    assert_eq!(site.line(), line);
    assert!(site.file().ends_with("outputs.rs"));
}
