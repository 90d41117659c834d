// Unit conversion tests

use deskstat::units::*;

#[test]
fn test_kelvin_offset_is_exact_within_epsilon() {
    for c in [-40.0, -0.5, 0.0, 21.3, 37.0, 100.0, 1234.5] {
        assert!((to_kelvin(c) - c - 273.15).abs() < 1e-9, "c = {}", c);
    }
}

#[test]
fn test_fahrenheit_formula() {
    for c in [-40.0, 0.0, 37.0, 100.0] {
        assert!((to_fahrenheit(c) - (c * 1.8 + 32.0)).abs() < 1e-9);
    }
    assert_eq!(to_fahrenheit(100.0), 212.0);
    assert_eq!(to_fahrenheit(-40.0), -40.0);
}

#[test]
fn test_to_celsius_inverts_each_scale() {
    assert!((to_celsius(to_fahrenheit(42.0), Scale::Fahrenheit) - 42.0).abs() < 1e-9);
    assert!((to_celsius(to_kelvin(42.0), Scale::Kelvin) - 42.0).abs() < 1e-9);
    assert_eq!(to_celsius(42.0, Scale::Celsius), 42.0);
}

#[test]
fn test_normalize_tags_all_values_with_target_scale() {
    let t = normalize(40.0, 70.0, 82.0, Scale::Kelvin);
    assert_eq!(t.scale, Scale::Kelvin);
    assert!((t.current - 313.15).abs() < 1e-9);
    assert!((t.high - 343.15).abs() < 1e-9);
    assert!((t.critical - 355.15).abs() < 1e-9);

    let c = normalize(40.0, 70.0, 82.0, Scale::Celsius);
    assert_eq!((c.current, c.high, c.critical), (40.0, 70.0, 82.0));
}

#[test]
fn test_scale_symbols_and_parsing() {
    assert_eq!(Scale::from_symbol("C"), Some(Scale::Celsius));
    assert_eq!(Scale::from_symbol("F"), Some(Scale::Fahrenheit));
    assert_eq!(Scale::from_symbol("K"), Some(Scale::Kelvin));
    assert_eq!(Scale::from_symbol("*"), None);
    assert_eq!(Scale::Fahrenheit.symbol(), 'F');
}

#[test]
fn test_scale_serde_accepts_unit_names() {
    #[derive(serde::Deserialize)]
    struct W {
        unit: Scale,
    }
    let w: W = toml::from_str("unit = \"Fahrenheit\"").unwrap();
    assert_eq!(w.unit, Scale::Fahrenheit);
    assert_eq!(serde_json::to_string(&Scale::Kelvin).unwrap(), "\"K\"");
}
