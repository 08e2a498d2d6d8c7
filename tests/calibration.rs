use panelvolt::calibration::{solve_two_point, DerivedProfile};
use panelvolt::data_types::LinearParams;
use panelvolt::error::CalibrationError;

#[test]
fn solves_worked_example() {
    // (0x1E = 30, -6.5 V) and (0x2E = 46, -9.3 V):
    // a = (-9.3 + 6.5) / (46 - 30) = -0.175, b = -6.5 - a * 30 = -1.25.
    let params = solve_two_point("0x1E", -6.5, "0x2E", -9.3).unwrap();
    assert!((params.a + 0.175).abs() < 1e-12, "a = {}", params.a);
    assert!((params.b + 1.25).abs() < 1e-9, "b = {}", params.b);
}

#[test]
fn rejects_coincident_codes() {
    // 0x1E and 30 are the same code in different bases.
    assert_eq!(
        solve_two_point("0x1E", -6.5, "30", -9.3).unwrap_err(),
        CalibrationError::CoincidentPoints
    );
}

#[test]
fn rejects_unparsable_codes() {
    assert!(matches!(
        solve_two_point("xx", -6.5, "0x2E", -9.3).unwrap_err(),
        CalibrationError::Code(_)
    ));
    assert!(matches!(
        solve_two_point("0x1E", -6.5, "", -9.3).unwrap_err(),
        CalibrationError::Code(_)
    ));
}

#[test]
fn rejects_non_finite_voltages() {
    assert_eq!(
        solve_two_point("0x1E", f64::NAN, "0x2E", -9.3).unwrap_err(),
        CalibrationError::NonFiniteVoltage
    );
    assert_eq!(
        solve_two_point("0x1E", -6.5, "0x2E", f64::INFINITY).unwrap_err(),
        CalibrationError::NonFiniteVoltage
    );
}

#[test]
fn derived_profile_roundtrips_exactly() {
    for params in [
        LinearParams::new(-0.175, -1.25),
        LinearParams::new(0.2, 0.0),
        LinearParams::new(-0.037_5, 2.5),
    ] {
        let derived = DerivedProfile::from_linear(params);
        assert_eq!(derived.to_linear(), params);
    }
}

#[test]
fn derived_profile_splits_sign_from_magnitude() {
    let derived = DerivedProfile::from_linear(LinearParams::new(-0.175, -1.25));
    assert_eq!(derived.sign, -1);
    assert_eq!(derived.scale, 0.175);
    assert_eq!(derived.offset, -1.25);

    let derived = DerivedProfile::from_linear(LinearParams::new(0.2, 1.0));
    assert_eq!(derived.sign, 1);
    assert_eq!(derived.scale, 0.2);
}
