// Temperature unit conversion. Readings enter the core in Celsius and are normalized to one scale per snapshot.

use serde::{Deserialize, Serialize};

const KELVIN_OFFSET: f64 = 273.15;

/// Temperature scale; serializes to its single-letter tag ("C", "F", "K").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scale {
    #[default]
    #[serde(rename = "C", alias = "Celsius")]
    Celsius,
    #[serde(rename = "F", alias = "Fahrenheit")]
    Fahrenheit,
    #[serde(rename = "K", alias = "Kelvin")]
    Kelvin,
}

impl Scale {
    pub fn symbol(self) -> char {
        match self {
            Scale::Celsius => 'C',
            Scale::Fahrenheit => 'F',
            Scale::Kelvin => 'K',
        }
    }

    /// Parse a scale tag as sent by the legacy daemon (`C` / `F`), also accepting `K`.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.trim() {
            "C" | "c" => Some(Scale::Celsius),
            "F" | "f" => Some(Scale::Fahrenheit),
            "K" | "k" => Some(Scale::Kelvin),
            _ => None,
        }
    }

    /// Convert a Celsius value into this scale.
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Scale::Celsius => celsius,
            Scale::Fahrenheit => to_fahrenheit(celsius),
            Scale::Kelvin => to_kelvin(celsius),
        }
    }
}

pub fn to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// Convert a value reported in `from` back to Celsius.
pub fn to_celsius(value: f64, from: Scale) -> f64 {
    match from {
        Scale::Celsius => value,
        Scale::Fahrenheit => (value - 32.0) / 1.8,
        Scale::Kelvin => value - KELVIN_OFFSET,
    }
}

/// Current/high/critical triple sharing one scale tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Temperatures {
    pub current: f64,
    pub high: f64,
    pub critical: f64,
    pub scale: Scale,
}

/// Convert a Celsius triple to `target` in one step so the three values can never disagree on scale.
pub fn normalize(current: f64, high: f64, critical: f64, target: Scale) -> Temperatures {
    Temperatures {
        current: target.from_celsius(current),
        high: target.from_celsius(high),
        critical: target.from_celsius(critical),
        scale: target,
    }
}
