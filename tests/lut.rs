use panelvolt::calculator::{ConversionMode, RailConverter};
use panelvolt::data_types::{LutPoint, Rail, VglPolarity, WidthConfig, SAMPLE_VGL_LUT};
use panelvolt::error::ConvertError;
use panelvolt::lut::LutTable;

#[test]
fn parses_sample_table_sorted() {
    let table = LutTable::parse(SAMPLE_VGL_LUT);
    assert_eq!(table.len(), 11);
    let codes: Vec<i64> = table.points().iter().map(|p| p.code).collect();
    assert_eq!(codes, [30, 46, 49, 56, 62, 66, 70, 74, 78, 82, 86]);
    assert_eq!(table.points()[0], LutPoint { code: 30, volts: -6.5 });
}

#[test]
fn skips_comments_and_malformed_rows() {
    let text = "# bench table\n\n0x1E,30,-6.5\ngarbage\n42\nabc,def\n0x2E,46,-9.3\n";
    let table = LutTable::parse(text);
    assert_eq!(table.len(), 2);
    assert_eq!(table.points()[1].code, 46);
}

#[test]
fn code_falls_back_to_second_field() {
    // First column unparsable: the true code sits in column two.
    let table = LutTable::parse("zz,0x2E,-9.3");
    assert_eq!(table.points(), [LutPoint { code: 46, volts: -9.3 }]);
}

#[test]
fn two_field_rows_use_second_field_as_volts() {
    let table = LutTable::parse("46,-9.3");
    assert_eq!(table.points(), [LutPoint { code: 46, volts: -9.3 }]);
}

#[test]
fn interpolation_is_identity_at_nodes() {
    let table = LutTable::parse(SAMPLE_VGL_LUT);
    for point in table.points() {
        assert_eq!(table.volts_at(point.code), Some(point.volts));
    }
}

#[test]
fn interpolation_clamps_at_table_ends() {
    let table = LutTable::parse(SAMPLE_VGL_LUT);
    assert_eq!(table.volts_at(0), Some(-6.5));
    assert_eq!(table.volts_at(30), Some(-6.5));
    assert_eq!(table.volts_at(86), Some(-18.0));
    assert_eq!(table.volts_at(200), Some(-18.0));
}

#[test]
fn interpolation_interior_midpoint() {
    // Code 38 sits halfway between 30 (-6.5 V) and 46 (-9.3 V) -> -7.9 V.
    let table = LutTable::parse(SAMPLE_VGL_LUT);
    let v = table.volts_at(38).unwrap();
    assert!((v + 7.9).abs() < 1e-9, "got {v}");
}

#[test]
fn empty_table_yields_nothing() {
    let table = LutTable::parse("# only comments\n\n");
    assert!(table.is_empty());
    assert_eq!(table.volts_at(30), None);
    assert_eq!(table.code_at(-9.3), None);
}

#[test]
fn inversion_rounds_to_nearest_code() {
    let table = LutTable::parse(SAMPLE_VGL_LUT);
    // Node voltage maps back to the node code.
    assert_eq!(table.code_at(-9.3), Some(46));
    // -7.9 V is the midpoint of [30, 46] -> code 38.
    assert_eq!(table.code_at(-7.9), Some(38));
}

#[test]
fn inversion_first_matching_segment_wins() {
    // The sample table is non-monotonic (-5.42 V at code 56). For -9.0 V the
    // first spanning segment in code order is [30, 46]:
    // t = (-9.0 + 6.5) / -2.8 = 0.8928..., code = 30 + t * 16 -> 44.
    let table = LutTable::parse(SAMPLE_VGL_LUT);
    assert_eq!(table.code_at(-9.0), Some(44));
}

#[test]
fn inversion_clamps_outside_an_ascending_table() {
    let table = LutTable::parse("0,0.0\n10,1.0");
    assert_eq!(table.code_at(-1.0), Some(0));
    assert_eq!(table.code_at(0.0), Some(0));
    assert_eq!(table.code_at(1.0), Some(10));
    assert_eq!(table.code_at(2.0), Some(10));
}

#[test]
fn inversion_boundary_rule_on_the_descending_sample() {
    // The boundary checks compare against the first and last point pairs:
    // a target at or below min(V[0], V[1]) clamps to the first code, one at
    // or above max(V[n-1], V[n]) clamps to the last code.
    let table = LutTable::parse(SAMPLE_VGL_LUT);
    assert_eq!(table.code_at(-30.0), Some(30));
    assert_eq!(table.code_at(-5.0), Some(86));
}

#[test]
fn duplicate_codes_keep_input_order() {
    // Stable sort: the first duplicate stays the left node, and the
    // boundary clamp resolves to it.
    let table = LutTable::parse("10,1.0\n10,2.0\n20,3.0");
    assert_eq!(table.volts_at(10), Some(1.0));
    assert_eq!(table.volts_at(5), Some(1.0));
}

#[test]
fn zero_width_segment_inverts_to_left_code() {
    let table = LutTable::from_points(vec![
        LutPoint { code: 10, volts: 2.0 },
        LutPoint { code: 20, volts: 2.0 },
        LutPoint { code: 30, volts: 4.0 },
    ]);
    // Flat segment: voltage 2.0 resolves to the left node's code.
    assert_eq!(table.code_at(2.0), Some(10));
}

#[test]
fn single_point_table_always_clamps() {
    let table = LutTable::parse("0x1E,30,-6.5");
    assert_eq!(table.volts_at(0), Some(-6.5));
    assert_eq!(table.volts_at(100), Some(-6.5));
    assert_eq!(table.code_at(-6.5), Some(30));
    assert_eq!(table.code_at(0.0), Some(30));
    assert_eq!(table.code_at(-20.0), Some(30));
}

#[test]
fn converter_lut_mode_reparses_per_call() {
    let conv = RailConverter {
        rail: Rail::Vgl,
        width: WidthConfig::S8,
        vgl_polarity: VglPolarity::Negative,
        mode: ConversionMode::Lut(SAMPLE_VGL_LUT),
    };
    let reading = conv.code_to_volts("0x31").unwrap();
    assert_eq!(reading.code, 49);
    assert!((reading.volts + 10.0).abs() < 1e-9);

    let est = conv.volts_to_code(-9.3).unwrap();
    assert_eq!(est.display_code, 46);
    assert_eq!(est.hex, "0x2E");
}

#[test]
fn converter_lut_mode_empty_table_errors() {
    let conv = RailConverter {
        rail: Rail::Vgl,
        width: WidthConfig::S8,
        vgl_polarity: VglPolarity::Negative,
        mode: ConversionMode::Lut("# nothing here"),
    };
    assert_eq!(
        conv.code_to_volts("0x31").unwrap_err(),
        ConvertError::EmptyTable
    );
    assert_eq!(
        conv.volts_to_code(-9.3).unwrap_err(),
        ConvertError::EmptyTable
    );
}
