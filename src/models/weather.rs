// Outdoor weather model

use serde::{Deserialize, Serialize};

use crate::units::Scale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub scale: Scale,
    pub humidity_percent: f64,
    pub pressure_hpa: f64,
    pub visibility_km: f64,
    pub wind_speed_ms: f64,
    /// 16-point compass abbreviation, e.g. "NNE".
    pub wind_direction: String,
    pub icon: String,
}
