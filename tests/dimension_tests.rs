// Host-side tests for unit conversion and measurement settings.

use cellpaint_core::*;

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn hundred_centimeters_is_one_real_unit() {
    let cfg = MeasureConfig::default();
    let real = real_from_measure(&cfg, 100.0, Some(Unit::Centimeter)).unwrap();
    assert_eq!(real, 1.0);
    // display unit is centimeter by default
    let real = real_from_measure(&cfg, 100.0, None).unwrap();
    assert_eq!(real, 1.0);
}

#[test]
fn named_conversion_accepts_host_unit_names() {
    let cfg = MeasureConfig::default();
    assert_eq!(real_from_measure_named(&cfg, 100.0, "centimeter").unwrap(), 1.0);
    assert_eq!(real_from_measure_named(&cfg, 100.0, "cm").unwrap(), 1.0);
    assert_eq!(real_from_measure_named(&cfg, 2.0, "m").unwrap(), 2.0);
    assert_eq!(real_from_measure_named(&cfg, 100.0, "").unwrap(), 1.0);
}

#[test]
fn unknown_unit_name_passes_value_through() {
    let cfg = MeasureConfig::default();
    assert_eq!(real_from_measure_named(&cfg, 12.3456789, "furlong").unwrap(), 12.3456789);
    assert_eq!(measure_from_real_named(&cfg, 7.25, "parsec").unwrap(), 7.25);
    assert!(matches!("furlong".parse::<Unit>(), Err(CellPaintError::UnknownUnit(_))));
}

#[test]
fn round_trip_is_lossless_at_default_precision() {
    let cfg = MeasureConfig::default();
    for unit in Unit::ALL {
        for measure in [0.0, 0.001, 1.234, 12.5, 99.999, 1234.5, -7.125] {
            let real = real_from_measure(&cfg, measure, Some(unit)).unwrap();
            let back = measure_from_real(&cfg, real, Some(unit)).unwrap();
            assert!(
                approx(back, measure, 1e-9),
                "{unit}: {measure} -> {real} -> {back}"
            );
        }
    }
}

#[test]
fn round_trip_holds_at_unit_scale() {
    let cfg = MeasureConfig::default().with_scale(1.0).with_precision(2);
    for unit in Unit::ALL {
        let real = real_from_measure(&cfg, 3.75, Some(unit)).unwrap();
        let back = measure_from_real(&cfg, real, Some(unit)).unwrap();
        assert!(approx(back, 3.75, 1e-9), "{unit}: {real} -> {back}");
    }
}

#[test]
fn small_units_keep_extra_real_digits() {
    let cfg = MeasureConfig::default();
    // 1 mm is about 0.001 real units at the default scale
    assert_eq!(real_from_measure(&cfg, 12.5, Some(Unit::Millimeter)).unwrap(), 0.0125);
    assert_eq!(real_from_measure(&cfg, 12.5, Some(Unit::Inch)).unwrap(), 0.3175);
    assert_eq!(real_from_measure(&cfg, 2.5, Some(Unit::Meter)).unwrap(), 2.5);
}

#[test]
fn conversions_round_to_configured_precision() {
    let cfg = MeasureConfig::default().with_scale(1.0).with_precision(1);
    assert_eq!(real_from_measure(&cfg, 1.0, Some(Unit::Inch)).unwrap(), 2.5);
    assert_eq!(measure_from_real(&cfg, 1.0, Some(Unit::Inch)).unwrap(), 0.4);
    let cfg = cfg.with_precision(4);
    assert_eq!(real_from_measure(&cfg, 1.0, Some(Unit::Inch)).unwrap(), 2.54);
}

#[test]
fn zero_scale_reports_invalid_number() {
    let cfg = MeasureConfig::default().with_scale(0.0);
    let err = measure_from_real(&cfg, 5.0, None).unwrap_err();
    assert!(matches!(err, CellPaintError::InvalidNumber { .. }));
}

#[test]
fn nan_is_coerced_to_zero() {
    assert_eq!(round_to(f64::NAN, 3).unwrap(), 0.0);
    assert!(round_to(f64::INFINITY, 3).is_err());
    assert!(round_to(f64::NEG_INFINITY, 0).is_err());
}

#[test]
fn huge_finite_values_are_kept() {
    assert_eq!(round_to(1e306, 3).unwrap(), 1e306);
    assert_eq!(round_to(-1e300, 10).unwrap(), -1e300);
    assert_eq!(round_to(1.5, u32::MAX).unwrap(), 1.5);
}

#[test]
fn round_to_rounds_half_away_from_zero() {
    assert_eq!(round_to(1.25, 1).unwrap(), 1.3);
    assert_eq!(round_to(-1.25, 1).unwrap(), -1.3);
    assert_eq!(round_to(2.0, 0).unwrap(), 2.0);
}

#[test]
fn trim_float_parses_and_rounds() {
    assert_eq!(trim_float(" 3.14159 ", 2).unwrap(), 3.14);
    assert_eq!(trim_float("not a number", 3).unwrap(), 0.0);
    assert_eq!(trim_float("", 3).unwrap(), 0.0);
}

#[test]
fn pixel_conversions_use_pixels_per_real() {
    let cfg = MeasureConfig::default().with_pixels_per_real(20.0);
    assert_eq!(real_from_pixel(&cfg, 50.0).unwrap(), 2.5);
    assert_eq!(pixel_from_real(&cfg, 2.5).unwrap(), 50.0);
}

#[test]
fn settings_update_a_copy_of_the_config() {
    let base = MeasureConfig::default();
    let cfg = base
        .with_setting("unit", "mm")
        .and_then(|c| c.with_setting("scale", "0.1"))
        .and_then(|c| c.with_setting("precision", "4"))
        .and_then(|c| c.with_setting("pixels_per_real", "12.5"))
        .unwrap();
    assert_eq!(cfg.unit, Unit::Millimeter);
    assert_eq!(cfg.scale, 0.1);
    assert_eq!(cfg.precision, 4);
    assert_eq!(cfg.pixels_per_real, 12.5);
    assert_eq!(base, MeasureConfig::default());
}

#[test]
fn bad_settings_are_rejected() {
    let cfg = MeasureConfig::default();
    assert!(matches!(
        cfg.with_setting("colour", "red"),
        Err(CellPaintError::UnknownSetting(_))
    ));
    assert!(matches!(
        cfg.with_setting("scale", "zero"),
        Err(CellPaintError::InvalidNumber { .. })
    ));
    assert!(cfg.with_setting("precision", "-1").is_err());
    assert!(cfg.with_setting("unit", "league").is_err());
}

#[test]
fn unit_names_round_trip_through_display() {
    for unit in Unit::ALL {
        assert_eq!(unit.to_string().parse::<Unit>().unwrap(), unit);
    }
    assert_eq!("feet".parse::<Unit>().unwrap(), Unit::Foot);
}
