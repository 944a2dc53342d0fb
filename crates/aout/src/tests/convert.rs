use crate::config::AnalogOutputConfig;
use crate::convert::{code_to_volts, volts_to_code};

fn cfg() -> AnalogOutputConfig {
    AnalogOutputConfig::default()
}

#[test]
fn mid_scale_maps_to_half_the_ceiling() {
    assert_eq!(volts_to_code(2.5, &cfg()), 2048);
    assert_eq!(code_to_volts(2048, &cfg()), 2.5);
}

#[test]
fn clamps_are_asymmetric() {
    assert_eq!(volts_to_code(-1.0, &cfg()), 0);
    assert_eq!(volts_to_code(0.0, &cfg()), 0);
    assert_eq!(volts_to_code(5.0, &cfg()), 4096);
    assert_eq!(volts_to_code(10.0, &cfg()), 4096);
    assert_eq!(code_to_volts(4096, &cfg()), 5.0);
    assert_eq!(code_to_volts(0, &cfg()), 0.0);
}

#[test]
fn rounds_to_nearest_code() {
    // 1.0 V sits at 819.2 codes, 1.0004 V at 819.53.
    assert_eq!(volts_to_code(1.0, &cfg()), 819);
    assert_eq!(volts_to_code(1.0004, &cfg()), 820);
}

#[test]
fn voltages_within_a_step_share_a_code() {
    let a = volts_to_code(1.0, &cfg());
    let b = volts_to_code(1.0001, &cfg());
    assert_eq!(a, b);
    assert_eq!(code_to_volts(a, &cfg()), code_to_volts(b, &cfg()));
}

#[test]
fn nan_writes_zero() {
    assert_eq!(volts_to_code(f64::NAN, &cfg()), 0);
}

#[test]
fn round_trip_stays_within_one_step() {
    let config = cfg();
    let step = config.step_volts();
    for millivolts in (0..=5000).step_by(37) {
        let volts = f64::from(millivolts) / 1000.0;
        let back = code_to_volts(volts_to_code(volts, &config), &config);
        assert!(
            (back - volts).abs() <= step,
            "{volts} V came back as {back} V"
        );
    }
}
