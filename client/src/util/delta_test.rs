use super::*;

// =============================================================
// DeltaType
// =============================================================

#[test]
fn buckets_follow_thresholds() {
    assert_eq!(DeltaType::from_change(12.0), DeltaType::Increase);
    assert_eq!(DeltaType::from_change(5.0), DeltaType::ModerateIncrease);
    assert_eq!(DeltaType::from_change(1.5), DeltaType::ModerateIncrease);
    assert_eq!(DeltaType::from_change(1.0), DeltaType::Unchanged);
    assert_eq!(DeltaType::from_change(0.0), DeltaType::Unchanged);
    assert_eq!(DeltaType::from_change(-1.0), DeltaType::ModerateDecrease);
    assert_eq!(DeltaType::from_change(-4.9), DeltaType::ModerateDecrease);
    assert_eq!(DeltaType::from_change(-5.0), DeltaType::Decrease);
}

#[test]
fn delta_names_match_chart_keys() {
    assert_eq!(DeltaType::ModerateIncrease.as_str(), "moderateIncrease");
    assert_eq!(serde_json::to_value(DeltaType::ModerateDecrease).unwrap(), "moderateDecrease");
}

// =============================================================
// format_relative_amount
// =============================================================

#[test]
fn formats_small_values() {
    assert_eq!(format_relative_amount(12.5), "12.5%");
    assert_eq!(format_relative_amount(0.0), "0%");
    assert_eq!(format_relative_amount(-3.25), "-3.25%");
}

#[test]
fn rounds_to_three_fraction_digits() {
    assert_eq!(format_relative_amount(1.23456), "1.235%");
    assert_eq!(format_relative_amount(2.0001), "2%");
}

#[test]
fn groups_thousands() {
    assert_eq!(format_relative_amount(1234.5), "1,234.5%");
    assert_eq!(format_relative_amount(-1_000_000.0), "-1,000,000%");
    assert_eq!(format_relative_amount(999.0), "999%");
}

#[test]
fn negative_zero_after_rounding_has_no_sign() {
    assert_eq!(format_relative_amount(-0.0001), "0%");
}
