//! Analog output configuration.

use std::fmt;

use hal::DacResolution;

const DEFAULT_FULL_SCALE_VOLTS: f64 = 5.0;

/// Conversion parameters for an analog output bank.
///
/// `code_ceiling` is both the scale factor of the volts-to-code conversion
/// and the code written for any voltage above full scale. The controller's
/// 12-bit bank uses 4096 for both, one past the largest 12-bit value.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogOutputConfig {
    pub name: &'static str,
    pub full_scale_volts: f64,
    pub code_ceiling: u16,
}

impl Default for AnalogOutputConfig {
    fn default() -> Self {
        Self {
            name: "aout",
            full_scale_volts: DEFAULT_FULL_SCALE_VOLTS,
            code_ceiling: DacResolution::Bits12.code_span() as u16,
        }
    }
}

impl AnalogOutputConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> AnalogOutputConfigBuilder {
        AnalogOutputConfigBuilder::default()
    }

    /// Smallest voltage difference the bank can express.
    pub fn step_volts(&self) -> f64 {
        self.full_scale_volts / f64::from(self.code_ceiling)
    }
}

/// Builder for [`AnalogOutputConfig`].
#[derive(Debug, Clone, Default)]
pub struct AnalogOutputConfigBuilder {
    config: AnalogOutputConfig,
}

impl AnalogOutputConfigBuilder {
    /// Sets the label used in log records.
    pub fn name(mut self, name: &'static str) -> Self {
        self.config.name = name;
        self
    }

    /// Sets the voltage that maps to the code ceiling.
    pub fn full_scale_volts(mut self, volts: f64) -> Self {
        self.config.full_scale_volts = volts;
        self
    }

    /// Sets the code ceiling directly.
    pub fn code_ceiling(mut self, ceiling: u16) -> Self {
        self.config.code_ceiling = ceiling;
        self
    }

    /// Derives the code ceiling from a DAC resolution (`2^bits`).
    ///
    /// [`DacResolution::Bits16`] saturates at `u16::MAX`.
    pub fn resolution(mut self, resolution: DacResolution) -> Self {
        self.config.code_ceiling = resolution.code_span().min(u32::from(u16::MAX)) as u16;
        self
    }

    /// Builds the configuration.
    ///
    /// Rejects a zero code ceiling and a full scale that is not a positive,
    /// finite voltage; either would make the conversions divide by zero.
    pub fn build(self) -> Result<AnalogOutputConfig, ConfigError> {
        let volts = self.config.full_scale_volts;
        if !(volts.is_finite() && volts > 0.0) {
            return Err(ConfigError::InvalidFullScale(volts));
        }
        if self.config.code_ceiling == 0 {
            return Err(ConfigError::ZeroCodeCeiling);
        }
        Ok(self.config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    InvalidFullScale(f64),
    ZeroCodeCeiling,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFullScale(volts) => {
                write!(f, "full scale of {volts} V is not a positive voltage")
            }
            Self::ZeroCodeCeiling => write!(f, "code ceiling must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}
