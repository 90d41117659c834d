// CPU sensor and storage device temperature models

use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::units::Scale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureSnapshot {
    pub label: String,
    pub current: f64,
    pub high: f64,
    pub critical: f64,
    pub scale: Scale,
    pub severity: Severity,
}

/// One storage device. `current` may exceed `critical`; sensors do not guarantee ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceReading {
    pub device: String,
    pub model: String,
    pub current: f64,
    pub high: f64,
    pub critical: f64,
    pub scale: Scale,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceHealthSnapshot {
    pub devices: Vec<DeviceReading>,
}
