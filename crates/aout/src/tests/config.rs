use hal::DacResolution;

use crate::config::{AnalogOutputConfig, ConfigError};

#[test]
fn defaults_match_the_twelve_bit_bank() {
    let config = AnalogOutputConfig::default();
    assert_eq!(config.name, "aout");
    assert_eq!(config.full_scale_volts, 5.0);
    assert_eq!(config.code_ceiling, 4096);
    assert_eq!(config.step_volts(), 5.0 / 4096.0);
}

#[test]
fn builder_overrides_fields() {
    let config = AnalogOutputConfig::builder()
        .name("mxp")
        .full_scale_volts(3.3)
        .resolution(DacResolution::Bits10)
        .build()
        .unwrap();

    assert_eq!(config.name, "mxp");
    assert_eq!(config.full_scale_volts, 3.3);
    assert_eq!(config.code_ceiling, 1024);
}

#[test]
fn sixteen_bit_resolution_saturates() {
    let config = AnalogOutputConfig::builder()
        .resolution(DacResolution::Bits16)
        .build()
        .unwrap();
    assert_eq!(config.code_ceiling, u16::MAX);

    let config = AnalogOutputConfig::builder().code_ceiling(4095).build().unwrap();
    assert_eq!(config.code_ceiling, 4095);
}

#[test]
fn degenerate_scales_are_rejected() {
    assert_eq!(
        AnalogOutputConfig::builder().code_ceiling(0).build(),
        Err(ConfigError::ZeroCodeCeiling)
    );
    assert_eq!(
        AnalogOutputConfig::builder().full_scale_volts(0.0).build(),
        Err(ConfigError::InvalidFullScale(0.0))
    );
    assert_eq!(
        AnalogOutputConfig::builder().full_scale_volts(-5.0).build(),
        Err(ConfigError::InvalidFullScale(-5.0))
    );
    assert!(matches!(
        AnalogOutputConfig::builder().full_scale_volts(f64::NAN).build(),
        Err(ConfigError::InvalidFullScale(v)) if v.is_nan()
    ));
    assert!(AnalogOutputConfig::builder()
        .full_scale_volts(f64::INFINITY)
        .build()
        .is_err());
}
