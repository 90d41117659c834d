// Severity classification tests

use deskstat::severity::*;

const MAXES: [f64; 5] = [1.0, 73.0, 82.0, 85.0, 358.15];

#[test]
fn test_at_max_is_critical() {
    for max in MAXES {
        assert_eq!(classify(max, max), Severity::Critical, "max = {}", max);
    }
}

#[test]
fn test_ten_percent_boundary_is_critical() {
    for max in MAXES {
        assert_eq!(classify(max * 0.9, max), Severity::Critical, "max = {}", max);
    }
}

#[test]
fn test_warning_band() {
    for max in MAXES {
        assert_eq!(classify(max * 0.75, max), Severity::Warning, "max = {}", max);
        assert_eq!(classify(max * 0.8, max), Severity::Warning, "max = {}", max);
        assert_eq!(classify(max * 0.89, max), Severity::Warning, "max = {}", max);
    }
}

#[test]
fn test_below_warning_band_is_normal() {
    for max in MAXES {
        assert_eq!(classify(max * 0.5, max), Severity::Normal, "max = {}", max);
        assert_eq!(classify(max * 0.69, max), Severity::Normal, "max = {}", max);
        assert_eq!(classify(0.0, max), Severity::Normal);
    }
}

#[test]
fn test_above_max_stays_critical() {
    assert_eq!(classify(120.0, 85.0), Severity::Critical);
}

#[test]
fn test_non_positive_max_is_normal() {
    assert_eq!(classify(50.0, 0.0), Severity::Normal);
    assert_eq!(classify(50.0, -10.0), Severity::Normal);
    assert_eq!(classify(50.0, f64::NAN), Severity::Normal);
}

#[test]
fn test_custom_bands() {
    let bands = SeverityBands {
        critical_band: 0.05,
        warning_band: 0.2,
    };
    assert_eq!(bands.classify(96.0, 100.0), Severity::Critical);
    assert_eq!(bands.classify(90.0, 100.0), Severity::Warning);
    assert_eq!(bands.classify(79.0, 100.0), Severity::Normal);
}

#[test]
fn test_severity_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&Severity::Warning).unwrap(),
        "\"warning\""
    );
}
