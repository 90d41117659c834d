// GPU temperature and load models

use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::units::Scale;

/// One configured GPU. High and critical are derived from the current temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuReading {
    pub index: u32,
    pub name: String,
    pub load_percent: f64,
    pub memory_used: u64,
    pub memory_total: u64,
    pub current: f64,
    pub high: f64,
    pub critical: f64,
    pub scale: Scale,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuSnapshot {
    pub gpus: Vec<GpuReading>,
}
