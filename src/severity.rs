// Threshold-based severity tiers shared by CPU, storage and GPU temperatures.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Critical,
}

/// Distance-from-max bands, as fractions of `max`.
///
/// With the defaults a value in the top 10% of `max` is critical and one in the top 30% is a warning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityBands {
    #[serde(default = "default_critical_band")]
    pub critical_band: f64,
    #[serde(default = "default_warning_band")]
    pub warning_band: f64,
}

pub const DEFAULT_CRITICAL_BAND: f64 = 0.1;
pub const DEFAULT_WARNING_BAND: f64 = 0.3;

fn default_critical_band() -> f64 {
    DEFAULT_CRITICAL_BAND
}

fn default_warning_band() -> f64 {
    DEFAULT_WARNING_BAND
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self {
            critical_band: DEFAULT_CRITICAL_BAND,
            warning_band: DEFAULT_WARNING_BAND,
        }
    }
}

impl SeverityBands {
    pub fn classify(&self, current: f64, max: f64) -> Severity {
        if !max.is_finite() || max <= 0.0 {
            tracing::warn!(max, current, "severity max must be > 0; reporting normal");
            return Severity::Normal;
        }
        // current above max (even above the sensor's critical) is still just critical
        if current >= max * (1.0 - self.critical_band) {
            Severity::Critical
        } else if current >= max * (1.0 - self.warning_band) {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

/// Classify with the default 10% / 30% bands.
pub fn classify(current: f64, max: f64) -> Severity {
    SeverityBands::default().classify(current, max)
}
