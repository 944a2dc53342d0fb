//! Voltage <-> raw code conversion.
//!
//! The mapping is lossy: every voltage inside one quantization step lands on
//! the same code, and reading a code back yields that step's lower edge.

use crate::config::AnalogOutputConfig;

/// Converts a voltage to the raw code written to the DAC.
///
/// Negative voltages (and NaN) give `0`; voltages above full scale give the
/// code ceiling; everything else is `round(volts / full_scale * ceiling)`.
pub fn volts_to_code(volts: f64, config: &AnalogOutputConfig) -> u16 {
    if volts < 0.0 {
        0
    } else if volts > config.full_scale_volts {
        config.code_ceiling
    } else {
        // NaN falls through both comparisons and saturates to 0 in the cast.
        (volts / config.full_scale_volts * f64::from(config.code_ceiling)).round() as u16
    }
}

/// Converts a raw code read back from the DAC to a voltage.
pub fn code_to_volts(code: u16, config: &AnalogOutputConfig) -> f64 {
    f64::from(code) * config.full_scale_volts / f64::from(config.code_ceiling)
}
